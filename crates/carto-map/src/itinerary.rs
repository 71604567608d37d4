//! The result of a routing query: an ordered chain of arcs.

use carto_core::{ArcId, NodeId};

use crate::map::Map;

/// An ordered list of arc identifiers forming a path, or zero arcs when the
/// requested endpoints are unreachable from each other.
///
/// Arcs are held by identifier; the aggregate measures resolve them through
/// the map that produced the itinerary.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    arcs: Vec<ArcId>,
}

impl Itinerary {
    pub(crate) fn new(arcs: Vec<ArcId>) -> Self {
        Self { arcs }
    }

    /// `true` when no path exists (or the endpoints coincide).
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    /// The node this itinerary departs from.
    pub fn departure(&self, map: &Map) -> Option<NodeId> {
        self.arcs.first().and_then(|&a| map.arc(a)).map(|a| a.start())
    }

    /// The node this itinerary arrives at.
    pub fn arrival(&self, map: &Map) -> Option<NodeId> {
        self.arcs.last().and_then(|&a| map.arc(a)).map(|a| a.end())
    }

    /// Total length in metres.
    pub fn total_length_m(&self, map: &Map) -> f64 {
        self.measure(map, |arc| arc.length_m())
    }

    /// Total travel time in seconds under normal conditions.
    pub fn nominal_travel_time_s(&self, map: &Map) -> f64 {
        self.measure(map, |arc| arc.nominal_travel_time_s())
    }

    /// Total travel time in seconds under current conditions; `+∞` if any
    /// arc is blocked.
    pub fn current_travel_time_s(&self, map: &Map) -> f64 {
        self.measure(map, |arc| arc.current_travel_time_s())
    }

    fn measure<F: Fn(&crate::arc::Arc) -> f64>(&self, map: &Map, per_arc: F) -> f64 {
        self.arcs
            .iter()
            .filter_map(|&id| map.arc(id))
            .map(per_arc)
            .sum()
    }
}
