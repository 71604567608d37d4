//! The map orchestrator: owns the entity containers, answers proximity
//! queries, and extracts routing subgraphs.

use std::collections::BTreeSet;

use log::debug;

use carto_core::{ArcId, Coordinates, NodeId, PoiId, Position, RouteId, Zone};
use carto_index::{EntityStore, Identified, Localized};

use crate::arc::{Arc, ArcAttributes, ArcPosition};
use crate::error::{MapError, MapResult};
use crate::itinerary::Itinerary;
use crate::node::Node;
use crate::poi::{Poi, PoiKind};
use crate::route::Route;
use crate::solver::{PathSolver, WeightedSubgraph};

/// Default grid cell side at the equator, in metres.
const DEFAULT_CELL_SIZE_M: f64 = 1_000.0;

/// Margin factor applied to the endpoint distance when bounding the routing
/// subgraph.
const SUBGRAPH_MARGIN: f64 = 0.5;

/// Scalar edge-weight selector for shortest-path queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CostMetric {
    /// Arc length in metres.
    Length,
    /// Travel time under normal conditions.
    NominalTime,
    /// Travel time under current conditions (blocked arcs cost `+∞`).
    CurrentTime,
}

impl CostMetric {
    fn weight(self, arc: &Arc) -> f64 {
        match self {
            CostMetric::Length => arc.length_m(),
            CostMetric::NominalTime => arc.nominal_travel_time_s(),
            CostMetric::CurrentTime => arc.current_travel_time_s(),
        }
    }
}

/// A complete road network: nodes, arcs, routes, and points of interest,
/// each in its own dual-index container.
///
/// The map is built once by the loading collaborator and is read-mostly
/// afterwards; the only post-load mutations are an arc's live speed
/// coefficient and a parking's occupancy, both behind named update methods.
/// Cross-references between entities are identifiers resolved through the
/// containers, never direct references.
pub struct Map {
    nodes: EntityStore<Node>,
    arcs: EntityStore<Arc>,
    routes: EntityStore<Route>,
    pois: EntityStore<Poi>,
}

impl Map {
    /// Empty map with the default 1 km grid cells.
    pub fn new() -> Self {
        Self::with_cell_size(DEFAULT_CELL_SIZE_M)
    }

    /// Empty map whose grid cells are `cell_size_m` metres on a side at the
    /// equator.
    pub fn with_cell_size(cell_size_m: f64) -> Self {
        Self {
            nodes: EntityStore::with_cell_size(cell_size_m),
            arcs: EntityStore::with_cell_size(cell_size_m),
            routes: EntityStore::with_cell_size(cell_size_m),
            pois: EntityStore::with_cell_size(cell_size_m),
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub fn add_node(&mut self, id: NodeId, position: Coordinates) {
        self.nodes.insert(Node::new(id, position));
    }

    /// Register a straight arc and wire it into its endpoint nodes.
    pub fn add_simple_arc(
        &mut self,
        id: ArcId,
        start: NodeId,
        end: NodeId,
        attributes: ArcAttributes,
    ) -> MapResult<()> {
        let (start_pos, end_pos) = self.endpoint_positions(start, end)?;
        self.register_arc(Arc::straight(id, start, end, start_pos, end_pos, attributes))
    }

    /// Register a composite arc threading `shape_points` and wire it into
    /// its endpoint nodes.
    pub fn add_composite_arc(
        &mut self,
        id: ArcId,
        start: NodeId,
        end: NodeId,
        attributes: ArcAttributes,
        shape_points: Vec<Coordinates>,
    ) -> MapResult<()> {
        let (start_pos, end_pos) = self.endpoint_positions(start, end)?;
        self.register_arc(Arc::composite(
            id, start, end, start_pos, end_pos, attributes, shape_points,
        ))
    }

    /// Register a route over its forward (and optional return) arc.
    pub fn add_route(
        &mut self,
        id: RouteId,
        name: impl Into<String>,
        forward: ArcId,
        backward: Option<ArcId>,
    ) -> MapResult<()> {
        let zone = self
            .arcs
            .get(forward)
            .ok_or(MapError::UnknownArc(forward))?
            .bounding_zone();
        if let Some(back) = backward {
            if !self.arcs.contains(back) {
                return Err(MapError::UnknownArc(back));
            }
        }

        // Stamp the owning route on each member arc.
        for arc_id in std::iter::once(forward).chain(backward) {
            if let Some(arc) = self.arcs.get_mut(arc_id) {
                arc.set_route(id);
            }
        }
        self.routes.insert(Route::new(id, name.into(), forward, backward, zone));
        Ok(())
    }

    /// Register a point of interest on its host arc.
    ///
    /// The position is resolved from the host arc at `offset`; the poi id
    /// is recorded on every associated arc (the host is associated
    /// implicitly).
    pub fn add_poi(
        &mut self,
        id: PoiId,
        host: ArcId,
        offset: f64,
        associated: impl IntoIterator<Item = ArcId>,
        kind: PoiKind,
    ) -> MapResult<()> {
        let position = self
            .arcs
            .get(host)
            .ok_or(MapError::UnknownArc(host))?
            .coordinates_at(offset);

        let mut arcs: BTreeSet<ArcId> = associated.into_iter().collect();
        arcs.insert(host);
        for &arc_id in &arcs {
            self.arcs
                .get_mut(arc_id)
                .ok_or(MapError::UnknownArc(arc_id))?
                .register_poi(id);
        }
        self.pois.insert(Poi::new(id, host, offset, position, arcs, kind));
        Ok(())
    }

    fn endpoint_positions(
        &self,
        start: NodeId,
        end: NodeId,
    ) -> MapResult<(Coordinates, Coordinates)> {
        let start_pos = self
            .nodes
            .get(start)
            .ok_or(MapError::UnknownNode(start))?
            .position();
        let end_pos = self
            .nodes
            .get(end)
            .ok_or(MapError::UnknownNode(end))?
            .position();
        Ok((start_pos, end_pos))
    }

    fn register_arc(&mut self, arc: Arc) -> MapResult<()> {
        let id = arc.id();
        let (start, end) = (arc.start(), arc.end());
        self.arcs.insert(arc);
        // Wiring cannot fail here: endpoint_positions already resolved both.
        if let Some(node) = self.nodes.get_mut(start) {
            node.register_outgoing(id);
        }
        if let Some(node) = self.nodes.get_mut(end) {
            node.register_incoming(id);
        }
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn arc(&self, id: ArcId) -> Option<&Arc> {
        self.arcs.get(id)
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn poi(&self, id: PoiId) -> Option<&Poi> {
        self.pois.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.iter()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn pois(&self) -> impl Iterator<Item = &Poi> {
        self.pois.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    // ── Zone queries ──────────────────────────────────────────────────────

    pub fn nodes_in_zone(&self, zone: &Zone) -> Vec<&Node> {
        self.nodes.in_zone(zone)
    }

    pub fn arcs_in_zone(&self, zone: &Zone) -> Vec<&Arc> {
        self.arcs.in_zone(zone)
    }

    pub fn routes_in_zone(&self, zone: &Zone) -> Vec<&Route> {
        self.routes.in_zone(zone)
    }

    pub fn pois_in_zone(&self, zone: &Zone) -> Vec<&Poi> {
        self.pois.in_zone(zone)
    }

    // ── Live-condition updates ────────────────────────────────────────────

    /// Overwrite an arc's live fraction of the speed limit.
    pub fn set_arc_current_coefficient(&mut self, id: ArcId, coefficient: f64) -> MapResult<()> {
        self.arcs
            .get_mut(id)
            .ok_or(MapError::UnknownArc(id))?
            .set_current_coefficient(coefficient);
        Ok(())
    }

    /// Derive an arc's live coefficient from an observed speed in km/h.
    pub fn set_arc_current_speed(&mut self, id: ArcId, speed_kmh: f64) -> MapResult<()> {
        self.arcs
            .get_mut(id)
            .ok_or(MapError::UnknownArc(id))?
            .set_current_speed(speed_kmh);
        Ok(())
    }

    /// Mark an arc impassable.
    pub fn block_arc(&mut self, id: ArcId) -> MapResult<()> {
        self.arcs.get_mut(id).ok_or(MapError::UnknownArc(id))?.block();
        Ok(())
    }

    /// Mutable access to a point of interest for occupancy updates.
    pub fn poi_mut(&mut self, id: PoiId) -> Option<&mut Poi> {
        self.pois.get_mut(id)
    }

    // ── Proximity queries ─────────────────────────────────────────────────

    /// The node closest to `p`, or `None` on a map without nodes.
    pub fn nearest_node<P: Position + ?Sized>(&self, p: &P) -> Option<&Node> {
        let center = p.coordinates();
        self.nodes
            .nearest_where(center, |n| n.distance_to(&center))
            .map(|(node, _)| node)
    }

    /// The point of interest closest to `p`, or `None` on a map without
    /// any.
    pub fn nearest_poi<P: Position + ?Sized>(&self, p: &P) -> Option<&Poi> {
        let center = p.coordinates();
        self.pois
            .nearest_where(center, |poi| poi.distance_to(&center))
            .map(|(poi, _)| poi)
    }

    /// The position on the road network closest to `p` — the nearest point
    /// of any arc, not just the nearest vertex.  `None` on a map without
    /// arcs.
    pub fn nearest_arc_position<P: Position + ?Sized>(&self, p: &P) -> Option<ArcPosition> {
        let center = p.coordinates();
        self.arcs
            .nearest_where(center, |arc| {
                arc.nearest_position(&center).distance_to(&center)
            })
            .map(|(arc, _)| arc.nearest_position(&center))
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Compute the optimal itinerary from `departure` to `arrival` under
    /// the chosen cost metric, delegating the search to `solver`.
    ///
    /// The weighted graph is restricted to the union of two margin-expanded
    /// zones around the endpoints (margin = half the endpoint distance), a
    /// heuristic box wide enough for plausible shortest paths without
    /// scanning the whole network.  An unreachable arrival yields an empty
    /// itinerary, not an error.
    pub fn plan_itinerary<S: PathSolver>(
        &self,
        departure: NodeId,
        arrival: NodeId,
        metric: CostMetric,
        solver: &S,
    ) -> MapResult<Itinerary> {
        let from = self.nodes.get(departure).ok_or(MapError::UnknownNode(departure))?;
        let to = self.nodes.get(arrival).ok_or(MapError::UnknownNode(arrival))?;

        let graph = self.extract_subgraph(from, to, metric);
        debug!(
            "routing subgraph for {departure} -> {arrival}: {} nodes, {} arcs",
            graph.nodes.len(),
            graph.arcs.len()
        );

        let path = solver.shortest_path(&graph, departure, arrival);
        // Every returned id resolves: the solver only sees ids we supplied.
        Ok(Itinerary::new(path))
    }

    /// Collect the weighted subgraph inside the endpoint-bounded zone.
    fn extract_subgraph(&self, from: &Node, to: &Node, metric: CostMetric) -> WeightedSubgraph {
        let margin = SUBGRAPH_MARGIN * from.distance_to(to);
        let zone = Zone::around(from, margin).union(&Zone::around(to, margin));

        let mut node_ids: BTreeSet<NodeId> =
            self.nodes.in_zone(&zone).iter().map(|n| n.id()).collect();

        let arcs = self.arcs.in_zone(&zone);
        let mut graph = WeightedSubgraph::default();
        for arc in arcs {
            let weight = metric.weight(arc);
            debug_assert!(weight >= 0.0);
            graph.arcs.push(arc.id());
            graph.endpoints.push((arc.start(), arc.end()));
            graph.weights.push(weight);
            // The solver contract requires every arc endpoint in the node
            // array, even when the grid query missed the node itself.
            node_ids.insert(arc.start());
            node_ids.insert(arc.end());
        }
        graph.nodes = node_ids.into_iter().collect();
        graph
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}
