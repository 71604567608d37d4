//! Angle, latitude, and longitude value types.
//!
//! All three store a radian value normalized by the same rule:
//!
//!   normalized(a) = ((a + π) mod 2π) + (a ≥ −π ? −π : π)
//!
//! which maps any input into one period around zero.  Angular arithmetic
//! (`relative_to`) re-normalizes, so two angles describe the same direction
//! iff their normalized values are bit-equal.  `f64` throughout: at Earth
//! scale one ULP of a radian is sub-nanometre.

use std::f64::consts::PI;
use std::fmt;

/// An angle in radians, normalized on construction.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle(f64);

impl Angle {
    /// Construct from a radian value of any magnitude.
    pub fn new(radians: f64) -> Self {
        Angle(normalize(radians))
    }

    /// Construct from degrees, minutes, and seconds of arc.
    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Angle::new((degrees + minutes / 60.0 + seconds / 3600.0).to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// The normalized angular difference `self − reference`.
    ///
    /// Normalization makes the result wrap-safe: 170° relative to −170° is
    /// −20°, not 340°.
    pub fn relative_to(self, reference: Angle) -> Angle {
        Angle::new(self.0 - reference.0)
    }
}

/// Map a radian value into one period around zero.
///
/// Rust's `%` is a remainder with the dividend's sign, matching the
/// piecewise correction term.
fn normalize(radians: f64) -> f64 {
    (radians + PI) % (2.0 * PI) + if radians >= -PI { -PI } else { PI }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} rad", self.0)
    }
}

// ── Latitude ─────────────────────────────────────────────────────────────────

/// A latitude: 0 is the equator, positive is north.
///
/// Values are normalized like any [`Angle`] but **not** clamped to
/// [−π/2, π/2]; a caller passing an out-of-range latitude gets the wrapped
/// value.  All projection math in this workspace assumes a locally small
/// footprint, where this never arises.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Latitude(Angle);

impl Latitude {
    pub fn new(radians: f64) -> Self {
        Latitude(Angle::new(radians))
    }

    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Latitude(Angle::from_dms(degrees, minutes, seconds))
    }

    #[inline]
    pub fn angle(self) -> Angle {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.radians()
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0.degrees()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn relative_to(self, reference: Latitude) -> Angle {
        self.0.relative_to(reference.0)
    }

    pub fn min(a: Latitude, b: Latitude) -> Latitude {
        if a.radians() <= b.radians() { a } else { b }
    }

    pub fn max(a: Latitude, b: Latitude) -> Latitude {
        if a.radians() >= b.radians() { a } else { b }
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dms(f, self.0.degrees(), 'N', 'S')
    }
}

// ── Longitude ────────────────────────────────────────────────────────────────

/// A longitude: 0 is the Greenwich meridian, positive is east.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Longitude(Angle);

impl Longitude {
    pub fn new(radians: f64) -> Self {
        Longitude(Angle::new(radians))
    }

    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Longitude(Angle::from_dms(degrees, minutes, seconds))
    }

    #[inline]
    pub fn angle(self) -> Angle {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.radians()
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0.degrees()
    }

    pub fn relative_to(self, reference: Longitude) -> Angle {
        self.0.relative_to(reference.0)
    }

    pub fn min(a: Longitude, b: Longitude) -> Longitude {
        if a.radians() <= b.radians() { a } else { b }
    }

    pub fn max(a: Longitude, b: Longitude) -> Longitude {
        if a.radians() >= b.radians() { a } else { b }
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dms(f, self.0.degrees(), 'E', 'W')
    }
}

/// Render a signed degree value as `D° M' S" H` with the hemisphere suffix.
fn write_dms(f: &mut fmt::Formatter<'_>, degrees: f64, pos: char, neg: char) -> fmt::Result {
    let (abs, hemi) = if degrees >= 0.0 { (degrees, pos) } else { (-degrees, neg) };
    write!(
        f,
        "{}° {}' {}\" {}",
        abs as i64,
        (abs * 60.0) as i64 % 60,
        (abs * 3600.0) as i64 % 60,
        hemi
    )
}
