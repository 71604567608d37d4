//! Spherical Earth model.
//!
//! A single mean radius is used everywhere; polar flattening is ignored.
//! The error this introduces is well below the locality error of the planar
//! metric projection built on top of it.

use crate::angle::Latitude;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_365_000.0;

/// Radius of the parallel (circle of constant latitude) at `latitude`:
/// the distance from the polar axis to the surface.
#[inline]
pub fn parallel_radius(latitude: Latitude) -> f64 {
    EARTH_RADIUS_M * latitude.cos()
}
