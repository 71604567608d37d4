//! `carto-core` — foundational geodetic types for the `carto` road-network
//! crates.
//!
//! This crate is a dependency of every other `carto-*` crate.  It has no
//! `carto-*` dependencies and only optional `serde` externally.
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`angle`] | `Angle`, `Latitude`, `Longitude`                          |
//! | [`earth`] | Mean radius, parallel radius                              |
//! | [`point`] | `Position` trait, `Coordinates`, `MetricCoords`, `GpsFix` |
//! | [`zone`]  | `Zone` bounding boxes                                     |
//! | [`ids`]   | `NodeId`, `ArcId`, `RouteId`, `PoiId`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod angle;
pub mod earth;
pub mod ids;
pub mod point;
pub mod zone;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use angle::{Angle, Latitude, Longitude};
pub use earth::{parallel_radius, EARTH_RADIUS_M};
pub use ids::{ArcId, NodeId, PoiId, RouteId};
pub use point::{Coordinates, GpsFix, MetricCoords, Position};
pub use zone::Zone;
