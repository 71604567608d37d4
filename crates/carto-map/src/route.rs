//! Named roads composed of one or two complementary arcs.

use carto_core::{ArcId, RouteId, Zone};
use carto_index::{Identified, Localized};

/// A named road: a forward arc, and for two-way roads a return arc running
/// between the same nodes in the opposite direction.
///
/// The bounding zone is copied from the forward arc at registration time
/// (arc geometry is immutable after load).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    id: RouteId,
    name: String,
    forward: ArcId,
    backward: Option<ArcId>,
    zone: Zone,
}

impl Route {
    pub(crate) fn new(
        id: RouteId,
        name: String,
        forward: ArcId,
        backward: Option<ArcId>,
        zone: Zone,
    ) -> Self {
        Self { id, name, forward, backward, zone }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn forward(&self) -> ArcId {
        self.forward
    }

    pub fn backward(&self) -> Option<ArcId> {
        self.backward
    }

    pub fn is_one_way(&self) -> bool {
        self.backward.is_none()
    }
}

impl Identified for Route {
    type Id = RouteId;

    fn id(&self) -> RouteId {
        self.id
    }
}

impl Localized for Route {
    fn bounding_zone(&self) -> Zone {
        self.zone
    }
}
