//! Axis-aligned latitude/longitude bounding boxes.

use crate::angle::{Latitude, Longitude};
use crate::earth::{self, EARTH_RADIUS_M};
use crate::point::{Coordinates, Position};

/// A rectangle of the latitude/longitude plane.
///
/// Invariant: `lat_min ≤ lat_max` and `lon_min ≤ lon_max`.  Longitude
/// wraparound is not modeled: a zone crossing the antimeridian is not
/// representable, so zones (and the grid built on them) are only reliable
/// away from ±π longitude.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    lat_min: Latitude,
    lat_max: Latitude,
    lon_min: Longitude,
    lon_max: Longitude,
}

impl Zone {
    pub fn new(lat_min: Latitude, lat_max: Latitude, lon_min: Longitude, lon_max: Longitude) -> Self {
        debug_assert!(lat_min.radians() <= lat_max.radians());
        debug_assert!(lon_min.radians() <= lon_max.radians());
        Self { lat_min, lat_max, lon_min, lon_max }
    }

    /// The degenerate zone containing exactly one point.
    pub fn of_point(point: Coordinates) -> Self {
        Self {
            lat_min: point.latitude,
            lat_max: point.latitude,
            lon_min: point.longitude,
            lon_max: point.longitude,
        }
    }

    /// The smallest zone containing every point of a non-empty set.
    pub fn of_points(points: &[Coordinates]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Zone::of_point(*first), |z, p| z.union(&Zone::of_point(*p))))
    }

    /// The smallest zone containing the disk of `radius_m` metres around
    /// `center`.
    ///
    /// The latitude span is exact on the sphere; the longitude span uses the
    /// parallel radius at the center, consistent with the metric projection.
    pub fn around<P: Position + ?Sized>(center: &P, radius_m: f64) -> Self {
        let d_lat = radius_m / EARTH_RADIUS_M;
        let d_lon = radius_m / earth::parallel_radius(center.latitude());
        Self {
            lat_min: Latitude::new(center.latitude().radians() - d_lat),
            lat_max: Latitude::new(center.latitude().radians() + d_lat),
            lon_min: Longitude::new(center.longitude().radians() - d_lon),
            lon_max: Longitude::new(center.longitude().radians() + d_lon),
        }
    }

    /// The smallest zone containing both `self` and `other`.
    pub fn union(&self, other: &Zone) -> Zone {
        Zone {
            lat_min: Latitude::min(self.lat_min, other.lat_min),
            lat_max: Latitude::max(self.lat_max, other.lat_max),
            lon_min: Longitude::min(self.lon_min, other.lon_min),
            lon_max: Longitude::max(self.lon_max, other.lon_max),
        }
    }

    /// `true` if `point` lies inside this zone (inclusive bounds).
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.lat_min.radians()..=self.lat_max.radians()).contains(&point.latitude.radians())
            && (self.lon_min.radians()..=self.lon_max.radians()).contains(&point.longitude.radians())
    }

    pub fn lat_min(&self) -> Latitude {
        self.lat_min
    }

    pub fn lat_max(&self) -> Latitude {
        self.lat_max
    }

    pub fn lon_min(&self) -> Longitude {
        self.lon_min
    }

    pub fn lon_max(&self) -> Longitude {
        self.lon_max
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} .. {}] x [{} .. {}]",
            self.lat_min, self.lat_max, self.lon_min, self.lon_max
        )
    }
}
