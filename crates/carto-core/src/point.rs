//! Geographic positions and the local metric projection.
//!
//! # Metric projection
//!
//! Every distance in this workspace is measured through a planar projection
//! relative to an origin point: the longitude offset is scaled by the radius
//! of the parallel at the *origin's* latitude, the latitude offset by the
//! mean Earth radius.  The approximation is accurate only for points close
//! to the origin — the footprint of one arc or one zone — and is never used
//! for long-range distances.

use crate::angle::{Angle, Latitude, Longitude};
use crate::earth::{self, EARTH_RADIUS_M};
use crate::zone::Zone;

// ── Position trait ────────────────────────────────────────────────────────────

/// Capability of having a geographic position.
///
/// Implemented by fixed coordinates, network nodes, and positions derived
/// from an arc and a relative offset.  The provided methods give every
/// implementor metric projection, distance, and a degenerate bounding zone.
pub trait Position {
    fn latitude(&self) -> Latitude;
    fn longitude(&self) -> Longitude;

    /// This position as a plain coordinate pair.
    fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude(), self.longitude())
    }

    /// Planar (x, y) metres of this position relative to `origin`.
    fn metric_from<P: Position + ?Sized>(&self, origin: &P) -> MetricCoords {
        MetricCoords {
            x: earth::parallel_radius(origin.latitude())
                * self.longitude().relative_to(origin.longitude()).radians(),
            y: EARTH_RADIUS_M * self.latitude().relative_to(origin.latitude()).radians(),
        }
    }

    /// Metric distance in metres between this position and `other`.
    fn distance_to<P: Position + ?Sized>(&self, other: &P) -> f64 {
        self.metric_from(other).norm()
    }

    /// The degenerate zone containing exactly this position.
    fn bounding_zone(&self) -> Zone {
        Zone::of_point(self.coordinates())
    }
}

// ── Coordinates ───────────────────────────────────────────────────────────────

/// A fixed geographic coordinate pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl Coordinates {
    pub fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self { latitude, longitude }
    }

    /// Construct from degree values (convenience for loaders and tests).
    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude: Latitude::new(latitude_deg.to_radians()),
            longitude: Longitude::new(longitude_deg.to_radians()),
        }
    }

    /// The point a fraction `t` of the way from `a` to `b`, interpolating
    /// each angle along its normalized difference.
    ///
    /// `t = 0` is `a`, `t = 1` is `b`.  Wrap-safe across the antimeridian
    /// because the offsets are normalized angular differences.
    pub fn interpolate(a: Coordinates, b: Coordinates, t: f64) -> Coordinates {
        Coordinates {
            latitude: Latitude::new(
                a.latitude.radians() + t * b.latitude.relative_to(a.latitude).radians(),
            ),
            longitude: Longitude::new(
                a.longitude.radians() + t * b.longitude.relative_to(a.longitude).radians(),
            ),
        }
    }
}

impl Position for Coordinates {
    fn latitude(&self) -> Latitude {
        self.latitude
    }

    fn longitude(&self) -> Longitude {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.latitude, self.longitude)
    }
}

// ── MetricCoords ──────────────────────────────────────────────────────────────

/// A planar coordinate pair in metres, relative to some projection origin.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricCoords {
    pub x: f64,
    pub y: f64,
}

impl MetricCoords {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to the projection origin.
    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product with another vector in the same frame.
    #[inline]
    pub fn dot(self, other: MetricCoords) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Both components multiplied by `factor` (rendering scale).
    #[inline]
    pub fn scaled(self, factor: f64) -> MetricCoords {
        MetricCoords { x: self.x * factor, y: self.y * factor }
    }
}

// ── GpsFix ────────────────────────────────────────────────────────────────────

/// A position as reported by a GPS sensor: coordinates plus heading and a
/// horizontal accuracy estimate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsFix {
    pub position: Coordinates,
    /// Heading relative to true north.
    pub heading: Angle,
    /// Horizontal position uncertainty in metres.
    pub accuracy_m: f64,
}

impl GpsFix {
    pub fn new(position: Coordinates, heading: Angle, accuracy_m: f64) -> Self {
        Self { position, heading, accuracy_m }
    }
}

impl Position for GpsFix {
    fn latitude(&self) -> Latitude {
        self.position.latitude
    }

    fn longitude(&self) -> Longitude {
        self.position.longitude
    }
}
