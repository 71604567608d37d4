//! Road-network graph vertices.

use std::collections::BTreeSet;

use carto_core::{ArcId, Coordinates, Latitude, Longitude, NodeId, Position, Zone};
use carto_index::{Identified, Localized};

/// An intersection or dead end of the road network.
///
/// Nodes hold their adjacency as arc *identifiers*; the arcs themselves live
/// in the map's arc container.  The identifier sets are populated by arc
/// registration (each new arc records itself as outgoing from its start node
/// and incoming to its end node) and never mutated afterwards.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    position: Coordinates,
    incoming: BTreeSet<ArcId>,
    outgoing: BTreeSet<ArcId>,
}

impl Node {
    pub fn new(id: NodeId, position: Coordinates) -> Self {
        Self {
            id,
            position,
            incoming: BTreeSet::new(),
            outgoing: BTreeSet::new(),
        }
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }

    /// Identifiers of the arcs arriving at this node.
    pub fn incoming(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.incoming.iter().copied()
    }

    /// Identifiers of the arcs departing from this node.
    pub fn outgoing(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.outgoing.iter().copied()
    }

    pub fn degree_in(&self) -> usize {
        self.incoming.len()
    }

    pub fn degree_out(&self) -> usize {
        self.outgoing.len()
    }

    pub(crate) fn register_incoming(&mut self, arc: ArcId) {
        self.incoming.insert(arc);
    }

    pub(crate) fn register_outgoing(&mut self, arc: ArcId) {
        self.outgoing.insert(arc);
    }
}

impl Position for Node {
    fn latitude(&self) -> Latitude {
        self.position.latitude
    }

    fn longitude(&self) -> Longitude {
        self.position.longitude
    }
}

impl Identified for Node {
    type Id = NodeId;

    fn id(&self) -> NodeId {
        self.id
    }
}

impl Localized for Node {
    fn bounding_zone(&self) -> Zone {
        Zone::of_point(self.position)
    }
}
