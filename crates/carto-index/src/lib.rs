//! `carto-index` — dual-index entity container.
//!
//! Map entities (nodes, arcs, routes, points of interest) are stored once
//! and indexed twice: a hash map from identifier to entity, and a
//! fixed-resolution spatial grid from cell to the entities overlapping it.
//! Together they answer "entity with this id" and "entities near here" in
//! time independent of network size.
//!
//! # Crate layout
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`grid`]  | `SpatialGrid` fixed-resolution cell index             |
//! | [`store`] | `Identified`, `Localized`, `EntityStore`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Propagates serde derives to `carto-core` types.       |

pub mod grid;
pub mod store;


pub use grid::SpatialGrid;
pub use store::{EntityStore, Identified, Localized};
