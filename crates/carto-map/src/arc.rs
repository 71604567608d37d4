//! Directed road arcs: straight or multi-vertex, with projection and
//! interpolation geometry.
//!
//! All geometry works in the local metric frame of the segment being
//! examined (see `carto_core::point`), so it inherits that projection's
//! locality assumption: an arc is expected to span at most a few kilometres.

use std::collections::BTreeSet;

use carto_core::{
    ArcId, Coordinates, Latitude, Longitude, MetricCoords, NodeId, PoiId, Position, RouteId, Zone,
};
use carto_index::{Identified, Localized};

/// Static attributes shared by both arc shapes.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcAttributes {
    /// Number of traffic lanes.
    pub lanes: u8,
    /// Legal speed limit in km/h.
    pub speed_limit_kmh: u16,
    /// Fraction of the limit typically driven under normal conditions.
    pub nominal_coefficient: f64,
}

/// Geometry variant of an arc.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArcShape {
    /// Straight line between the endpoint nodes.
    Straight,
    /// Ordered interior shape points between the endpoints, with the
    /// cumulative metric length at every vertex (0 at the start node, total
    /// length at the end node).  The table is non-decreasing by
    /// construction.
    Polyline {
        shape_points: Vec<Coordinates>,
        cumulative_m: Vec<f64>,
    },
}

/// A directed arc of the road network.
///
/// Arcs reference their endpoint nodes, owning route, and associated points
/// of interest by identifier; only the endpoint *coordinates* are copied in
/// at registration time (node positions are immutable once the network is
/// loaded) so that arc geometry needs no container lookups.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    id: ArcId,
    start: NodeId,
    end: NodeId,
    start_position: Coordinates,
    end_position: Coordinates,
    attributes: ArcAttributes,
    /// Live-conditions fraction of the speed limit; 0 means blocked.
    /// Mutable after load, only through the update methods.
    current_coefficient: f64,
    route: Option<RouteId>,
    pois: BTreeSet<PoiId>,
    shape: ArcShape,
}

/// A geographic position constrained to an arc, located by its relative
/// offset (0 = start node, 1 = end node) along the arc's length.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcPosition {
    pub arc: ArcId,
    pub offset: f64,
    /// The resolved coordinate, computed by the arc that produced this
    /// position.
    pub position: Coordinates,
}

impl Arc {
    /// Straight arc between two endpoint coordinates.
    pub(crate) fn straight(
        id: ArcId,
        start: NodeId,
        end: NodeId,
        start_position: Coordinates,
        end_position: Coordinates,
        attributes: ArcAttributes,
    ) -> Self {
        Self {
            id,
            start,
            end,
            start_position,
            end_position,
            current_coefficient: attributes.nominal_coefficient,
            attributes,
            route: None,
            pois: BTreeSet::new(),
            shape: ArcShape::Straight,
        }
    }

    /// Composite arc threading the given interior shape points.
    pub(crate) fn composite(
        id: ArcId,
        start: NodeId,
        end: NodeId,
        start_position: Coordinates,
        end_position: Coordinates,
        attributes: ArcAttributes,
        shape_points: Vec<Coordinates>,
    ) -> Self {
        let cumulative_m = cumulative_lengths(start_position, &shape_points, end_position);
        Self {
            id,
            start,
            end,
            start_position,
            end_position,
            current_coefficient: attributes.nominal_coefficient,
            attributes,
            route: None,
            pois: BTreeSet::new(),
            shape: ArcShape::Polyline { shape_points, cumulative_m },
        }
    }

    // ── Topology ──────────────────────────────────────────────────────────

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn start_position(&self) -> Coordinates {
        self.start_position
    }

    pub fn end_position(&self) -> Coordinates {
        self.end_position
    }

    pub fn attributes(&self) -> ArcAttributes {
        self.attributes
    }

    pub fn route(&self) -> Option<RouteId> {
        self.route
    }

    pub fn pois(&self) -> impl Iterator<Item = PoiId> + '_ {
        self.pois.iter().copied()
    }

    pub fn shape(&self) -> &ArcShape {
        &self.shape
    }

    pub(crate) fn set_route(&mut self, route: RouteId) {
        self.route = Some(route);
    }

    pub(crate) fn register_poi(&mut self, poi: PoiId) {
        self.pois.insert(poi);
    }

    // ── Live conditions ───────────────────────────────────────────────────

    pub fn current_coefficient(&self) -> f64 {
        self.current_coefficient
    }

    /// Overwrite the live fraction of the speed limit.
    pub(crate) fn set_current_coefficient(&mut self, coefficient: f64) {
        self.current_coefficient = coefficient.max(0.0);
    }

    /// Derive the live coefficient from an observed speed in km/h.
    pub(crate) fn set_current_speed(&mut self, speed_kmh: f64) {
        self.set_current_coefficient(speed_kmh / f64::from(self.attributes.speed_limit_kmh));
    }

    /// Mark the arc impassable (live coefficient 0).
    pub(crate) fn block(&mut self) {
        self.current_coefficient = 0.0;
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// All vertices of the arc, start to end.
    pub fn vertices(&self) -> Vec<Coordinates> {
        match &self.shape {
            ArcShape::Straight => vec![self.start_position, self.end_position],
            ArcShape::Polyline { shape_points, .. } => {
                let mut v = Vec::with_capacity(shape_points.len() + 2);
                v.push(self.start_position);
                v.extend_from_slice(shape_points);
                v.push(self.end_position);
                v
            }
        }
    }

    /// Length of the arc in metres: endpoint distance for a straight arc,
    /// the full polyline length for a composite one.
    pub fn length_m(&self) -> f64 {
        match &self.shape {
            ArcShape::Straight => self.end_position.distance_to(&self.start_position),
            ArcShape::Polyline { cumulative_m, .. } => {
                cumulative_m.last().copied().unwrap_or(0.0)
            }
        }
    }

    /// Travel time in seconds under normal conditions.
    ///
    /// `length × 3.6 / (limit × coefficient)` — the 3.6 converts km/h to
    /// m/s.  A non-positive coefficient or limit yields `+∞`.
    pub fn nominal_travel_time_s(&self) -> f64 {
        travel_time_s(
            self.length_m(),
            self.attributes.speed_limit_kmh,
            self.attributes.nominal_coefficient,
        )
    }

    /// Travel time in seconds under current conditions; `+∞` when blocked.
    pub fn current_travel_time_s(&self) -> f64 {
        travel_time_s(
            self.length_m(),
            self.attributes.speed_limit_kmh,
            self.current_coefficient,
        )
    }

    /// The position on this arc closest to `p`.
    ///
    /// The returned offset is always in [0, 1] and is relative to the whole
    /// arc length, whichever segment of a composite arc wins.
    pub fn nearest_position<P: Position + ?Sized>(&self, p: &P) -> ArcPosition {
        match &self.shape {
            ArcShape::Straight => {
                let offset = project_onto_segment(self.start_position, self.end_position, p);
                self.position_at(offset)
            }
            ArcShape::Polyline { cumulative_m, .. } => {
                let vertices = self.vertices();
                let total = cumulative_m.last().copied().unwrap_or(0.0);
                if total <= 0.0 {
                    return self.position_at(0.0);
                }

                let mut best_offset = 0.0;
                let mut best_distance = f64::INFINITY;
                for (i, pair) in vertices.windows(2).enumerate() {
                    let lambda = project_onto_segment(pair[0], pair[1], p);
                    let candidate = Coordinates::interpolate(pair[0], pair[1], lambda);
                    let distance = candidate.distance_to(p);
                    if distance < best_distance {
                        best_distance = distance;
                        let segment_len = cumulative_m[i + 1] - cumulative_m[i];
                        best_offset = (cumulative_m[i] + lambda * segment_len) / total;
                    }
                }
                self.position_at(best_offset.clamp(0.0, 1.0))
            }
        }
    }

    /// The coordinate a relative `offset ∈ [0, 1]` along the arc.
    pub fn coordinates_at(&self, offset: f64) -> Coordinates {
        match &self.shape {
            ArcShape::Straight => {
                Coordinates::interpolate(self.start_position, self.end_position, offset)
            }
            ArcShape::Polyline { cumulative_m, .. } => {
                let total = cumulative_m.last().copied().unwrap_or(0.0);
                if total <= 0.0 {
                    return self.start_position;
                }
                let target = offset.clamp(0.0, 1.0) * total;

                // Locate the bracketing segment in the cumulative table.
                let vertices = self.vertices();
                let mut i = 0;
                while i + 2 < vertices.len() && cumulative_m[i + 1] < target {
                    i += 1;
                }
                let segment_len = cumulative_m[i + 1] - cumulative_m[i];
                let t = if segment_len > 0.0 {
                    (target - cumulative_m[i]) / segment_len
                } else {
                    0.0
                };
                Coordinates::interpolate(vertices[i], vertices[i + 1], t)
            }
        }
    }

    /// [`ArcPosition`] at the given whole-arc offset, coordinates resolved.
    pub fn position_at(&self, offset: f64) -> ArcPosition {
        ArcPosition {
            arc: self.id,
            offset,
            position: self.coordinates_at(offset),
        }
    }

    /// The arc's vertices projected into the metric frame of `origin` and
    /// scaled, ready for a rendering collaborator to draw as a polyline.
    pub fn metric_polyline<P: Position + ?Sized>(
        &self,
        origin: &P,
        scale: f64,
    ) -> Vec<MetricCoords> {
        self.vertices()
            .into_iter()
            .map(|v| v.metric_from(origin).scaled(scale))
            .collect()
    }
}

/// Clamped projection parameter of `p` onto the segment `a → b`, computed
/// in the metric frame centered at `a`.
///
/// A zero-length segment would make the normalization degenerate, so it
/// maps every point to the segment start.
fn project_onto_segment<P: Position + ?Sized>(a: Coordinates, b: Coordinates, p: &P) -> f64 {
    let e = b.metric_from(&a);
    let v = p.metric_from(&a);
    let denominator = e.dot(e);
    if denominator <= 0.0 {
        return 0.0;
    }
    (e.dot(v) / denominator).clamp(0.0, 1.0)
}

/// Cumulative metric length at each vertex of `start, shape_points.., end`.
fn cumulative_lengths(
    start: Coordinates,
    shape_points: &[Coordinates],
    end: Coordinates,
) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(shape_points.len() + 2);
    lengths.push(0.0);
    let mut previous = start;
    let mut running = 0.0;
    for &vertex in shape_points.iter().chain(std::iter::once(&end)) {
        running += vertex.distance_to(&previous);
        lengths.push(running);
        previous = vertex;
    }
    lengths
}

fn travel_time_s(length_m: f64, speed_limit_kmh: u16, coefficient: f64) -> f64 {
    let effective = f64::from(speed_limit_kmh) * coefficient;
    if effective <= 0.0 {
        return f64::INFINITY;
    }
    length_m * 3.6 / effective
}

impl Position for ArcPosition {
    fn latitude(&self) -> Latitude {
        self.position.latitude
    }

    fn longitude(&self) -> Longitude {
        self.position.longitude
    }
}

impl Identified for Arc {
    type Id = ArcId;

    fn id(&self) -> ArcId {
        self.id
    }
}

impl Localized for Arc {
    /// Smallest zone containing every vertex.
    fn bounding_zone(&self) -> Zone {
        self.vertices()
            .into_iter()
            .map(Zone::of_point)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Zone::of_point(self.start_position))
    }
}
