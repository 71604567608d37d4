//! `carto-map` — road-network model and routing core.
//!
//! A [`map::Map`] owns the four entity families of a road network — nodes,
//! arcs, routes, and points of interest — in dual-index containers, keeps
//! them consistent through registration, answers nearest-entity and zone
//! queries, and extracts bounded weighted subgraphs for a pluggable
//! shortest-path solver.
//!
//! # Crate layout
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`node`]      | `Node` graph vertices with arc adjacency            |
//! | [`arc`]       | `Arc` directed edges, geometry, travel times        |
//! | [`route`]     | `Route` named roads over one or two arcs            |
//! | [`poi`]       | `Poi` arc-anchored points of interest               |
//! | [`map`]       | `Map` orchestrator, `CostMetric`                    |
//! | [`solver`]    | `PathSolver` trait, `DijkstraSolver`                |
//! | [`itinerary`] | `Itinerary` ordered arc-chain result                |
//! | [`error`]     | `MapError`                                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Serde derives on entity types, propagated to dependencies.|

pub mod arc;
pub mod error;
pub mod itinerary;
pub mod map;
pub mod node;
pub mod poi;
pub mod route;
pub mod solver;

#[cfg(test)]
mod tests;

pub use arc::{Arc, ArcAttributes, ArcPosition, ArcShape};
pub use error::{MapError, MapResult};
pub use itinerary::Itinerary;
pub use map::{CostMetric, Map};
pub use node::Node;
pub use poi::{Poi, PoiKind};
pub use route::Route;
pub use solver::{DijkstraSolver, PathSolver, WeightedSubgraph};
