//! Map-subsystem error type.

use thiserror::Error;

use carto_core::{ArcId, NodeId, PoiId, RouteId};

/// Errors produced by `carto-map`.
///
/// Plain lookups return `Option`; these variants cover registration and
/// routing requests that reference identifiers the map does not hold.
/// "No path between connected lookups" is *not* an error — it yields an
/// empty itinerary.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("node {0} not found in map")]
    UnknownNode(NodeId),

    #[error("arc {0} not found in map")]
    UnknownArc(ArcId),

    #[error("route {0} not found in map")]
    UnknownRoute(RouteId),

    #[error("point of interest {0} not found in map")]
    UnknownPoi(PoiId),
}

pub type MapResult<T> = Result<T, MapError>;
