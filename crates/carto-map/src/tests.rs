use carto_core::{ArcId, Coordinates, NodeId, PoiId, Position, RouteId, Zone};
use carto_index::Identified;

use crate::arc::{Arc, ArcAttributes, ArcShape};
use crate::error::MapError;
use crate::map::{CostMetric, Map};
use crate::poi::PoiKind;
use crate::solver::{DijkstraSolver, PathSolver, WeightedSubgraph};

mod helpers {
    use super::*;

    pub fn coord(lat_deg: f64, lon_deg: f64) -> Coordinates {
        Coordinates::from_degrees(lat_deg, lon_deg)
    }

    pub fn attrs() -> ArcAttributes {
        ArcAttributes {
            lanes: 2,
            speed_limit_kmh: 50,
            nominal_coefficient: 1.0,
        }
    }

    pub fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    /// A straight equatorial arc, roughly 1.1 km long.
    pub fn straight_arc() -> Arc {
        Arc::straight(
            ArcId(1),
            NodeId(1),
            NodeId(2),
            coord(0.0, 0.0),
            coord(0.0, 0.01),
            attrs(),
        )
    }

    /// An L-shaped composite arc: east along the equator, then due north.
    pub fn l_shaped_arc() -> Arc {
        Arc::composite(
            ArcId(1),
            NodeId(1),
            NodeId(2),
            coord(0.0, 0.0),
            coord(0.01, 0.01),
            attrs(),
            vec![coord(0.0, 0.01)],
        )
    }

    /// Three nodes near the equator, one hundredth of a degree apart:
    ///
    /// ```text
    ///            n3 (0.01, 0.01)
    ///           ↗  ↑
    ///         a3   a2
    ///         ↗    ↑
    ///       n1 →a1→ n2 (0.0, 0.01)
    /// ```
    ///
    /// The direct diagonal `a3` is shorter than the `a1` + `a2` detour.
    pub fn triangle_map() -> Map {
        let mut map = Map::new();
        map.add_node(NodeId(1), coord(0.0, 0.0));
        map.add_node(NodeId(2), coord(0.0, 0.01));
        map.add_node(NodeId(3), coord(0.01, 0.01));
        map.add_simple_arc(ArcId(1), NodeId(1), NodeId(2), attrs()).unwrap();
        map.add_simple_arc(ArcId(2), NodeId(2), NodeId(3), attrs()).unwrap();
        map.add_simple_arc(ArcId(3), NodeId(1), NodeId(3), attrs()).unwrap();
        map
    }
}

use helpers::*;

mod straight_arcs {
    use super::*;

    #[test]
    fn length_is_endpoint_distance() {
        let arc = straight_arc();
        let expected = arc.start_position().distance_to(&arc.end_position());
        assert!(close(arc.length_m(), expected, 1e-9));
        assert!(arc.length_m() > 1_000.0 && arc.length_m() < 1_200.0);
    }

    #[test]
    fn nearest_projects_perpendicularly() {
        let arc = straight_arc();
        let probe = coord(0.001, 0.005);
        let on_arc = arc.nearest_position(&probe);
        assert!(close(on_arc.offset, 0.5, 1e-3));
        assert!(on_arc.position.distance_to(&coord(0.0, 0.005)) < 1.0);
    }

    #[test]
    fn nearest_clamps_beyond_endpoints() {
        let arc = straight_arc();
        assert!(close(arc.nearest_position(&coord(0.0, 0.02)).offset, 1.0, 1e-12));
        assert!(close(arc.nearest_position(&coord(0.0, -0.02)).offset, 0.0, 1e-12));
    }

    #[test]
    fn coordinates_at_interpolates() {
        let arc = straight_arc();
        assert!(arc.coordinates_at(0.0).distance_to(&arc.start_position()) < 1e-6);
        assert!(arc.coordinates_at(1.0).distance_to(&arc.end_position()) < 1e-6);
        assert!(arc.coordinates_at(0.5).distance_to(&coord(0.0, 0.005)) < 1e-3);
    }

    #[test]
    fn travel_time_follows_speed_and_length() {
        let arc = straight_arc();
        let expected = arc.length_m() * 3.6 / 50.0;
        assert!(close(arc.nominal_travel_time_s(), expected, 1e-9));
        // Under nominal conditions both measures agree.
        assert!(close(arc.current_travel_time_s(), expected, 1e-9));
    }
}

mod composite_arcs {
    use super::*;

    #[test]
    fn cumulative_table_is_monotonic() {
        let arc = l_shaped_arc();
        let ArcShape::Polyline { cumulative_m, .. } = arc.shape() else {
            panic!("expected polyline shape");
        };
        assert_eq!(cumulative_m[0], 0.0);
        assert!(cumulative_m.windows(2).all(|w| w[0] <= w[1]));
        assert!(close(*cumulative_m.last().unwrap(), arc.length_m(), 1e-9));
    }

    #[test]
    fn length_exceeds_straight_line() {
        let arc = l_shaped_arc();
        let chord = arc.start_position().distance_to(&arc.end_position());
        assert!(arc.length_m() > chord * 1.3);
    }

    #[test]
    fn nearest_reports_whole_arc_offset() {
        let arc = l_shaped_arc();
        // Slightly east of the midpoint of the second (northbound) leg:
        // three quarters of the way along the full polyline.
        let on_arc = arc.nearest_position(&coord(0.005, 0.0102));
        assert!(close(on_arc.offset, 0.75, 0.01));
        assert!(on_arc.position.distance_to(&coord(0.005, 0.01)) < 5.0);
    }

    #[test]
    fn coordinates_at_walks_the_polyline() {
        let arc = l_shaped_arc();
        assert!(arc.coordinates_at(0.25).distance_to(&coord(0.0, 0.005)) < 1.0);
        assert!(arc.coordinates_at(0.5).distance_to(&coord(0.0, 0.01)) < 1.0);
        assert!(arc.coordinates_at(0.75).distance_to(&coord(0.005, 0.01)) < 1.0);
    }

    #[test]
    fn projection_round_trips_interpolation() {
        let arc = l_shaped_arc();
        for offset in [0.1, 0.4, 0.6, 0.9] {
            let point = arc.coordinates_at(offset);
            let back = arc.nearest_position(&point);
            assert!(close(back.offset, offset, 1e-6), "offset {offset}");
            assert!(back.position.distance_to(&point) < 1e-3);
        }
    }

    #[test]
    fn degenerate_arc_yields_start() {
        let p = coord(0.0, 0.0);
        let arc = Arc::composite(ArcId(9), NodeId(1), NodeId(1), p, p, attrs(), Vec::new());
        assert_eq!(arc.length_m(), 0.0);
        let on_arc = arc.nearest_position(&coord(0.001, 0.001));
        assert_eq!(on_arc.offset, 0.0);
        assert!(on_arc.position.latitude().radians().is_finite());
        assert!(arc.coordinates_at(0.5).distance_to(&p) < 1e-9);
    }
}

mod registration {
    use super::*;

    #[test]
    fn arcs_wire_into_their_endpoints() {
        let map = triangle_map();
        let n1 = map.node(NodeId(1)).unwrap();
        assert_eq!(n1.degree_out(), 2);
        assert_eq!(n1.degree_in(), 0);
        assert!(n1.outgoing().any(|a| a == ArcId(1)));
        assert!(n1.outgoing().any(|a| a == ArcId(3)));

        let n3 = map.node(NodeId(3)).unwrap();
        assert_eq!(n3.degree_in(), 2);
        assert_eq!(n3.degree_out(), 0);

        assert_eq!(map.node_count(), 3);
        assert_eq!(map.arc_count(), 3);
    }

    #[test]
    fn arc_with_unknown_endpoint_is_rejected() {
        let mut map = triangle_map();
        let err = map
            .add_simple_arc(ArcId(9), NodeId(1), NodeId(99), attrs())
            .unwrap_err();
        assert!(matches!(err, MapError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn routes_are_stamped_on_their_arcs() {
        let mut map = triangle_map();
        map.add_simple_arc(ArcId(4), NodeId(2), NodeId(1), attrs()).unwrap();
        map.add_route(RouteId(1), "D 117", ArcId(1), Some(ArcId(4))).unwrap();

        let route = map.route(RouteId(1)).unwrap();
        assert_eq!(route.name(), "D 117");
        assert!(!route.is_one_way());
        assert_eq!(map.arc(ArcId(1)).unwrap().route(), Some(RouteId(1)));
        assert_eq!(map.arc(ArcId(4)).unwrap().route(), Some(RouteId(1)));
        assert_eq!(map.arc(ArcId(2)).unwrap().route(), None);
    }

    #[test]
    fn route_over_unknown_arc_is_rejected() {
        let mut map = triangle_map();
        let err = map.add_route(RouteId(1), "D 117", ArcId(99), None).unwrap_err();
        assert!(matches!(err, MapError::UnknownArc(ArcId(99))));
    }

    #[test]
    fn poi_resolves_position_and_associations() {
        let mut map = triangle_map();
        map.add_poi(
            PoiId(1),
            ArcId(1),
            0.5,
            [ArcId(3)],
            PoiKind::Parking { name: "Centre".into(), capacity: 10, free_spaces: 3 },
        )
        .unwrap();

        let poi = map.poi(PoiId(1)).unwrap();
        let expected = map.arc(ArcId(1)).unwrap().coordinates_at(0.5);
        assert!(poi.position().distance_to(&expected) < 1e-6);
        // The host arc is associated implicitly.
        assert!(poi.associated_arcs().any(|a| a == ArcId(1)));
        assert!(poi.associated_arcs().any(|a| a == ArcId(3)));
        assert!(map.arc(ArcId(1)).unwrap().pois().any(|p| p == PoiId(1)));
        assert!(map.arc(ArcId(3)).unwrap().pois().any(|p| p == PoiId(1)));
        assert!(map.arc(ArcId(2)).unwrap().pois().next().is_none());
    }

    #[test]
    fn parking_occupancy_is_clamped() {
        let mut map = triangle_map();
        map.add_poi(
            PoiId(1),
            ArcId(1),
            0.2,
            [],
            PoiKind::Parking { name: "Gare".into(), capacity: 2, free_spaces: 1 },
        )
        .unwrap();

        let parking = map.poi_mut(PoiId(1)).unwrap();
        assert_eq!(parking.is_full(), Some(false));
        parking.record_vehicle_entry();
        assert_eq!(parking.is_full(), Some(true));
        parking.record_vehicle_entry(); // already full, saturates
        assert_eq!(parking.is_full(), Some(true));
        parking.record_vehicle_exit();
        parking.record_vehicle_exit();
        parking.record_vehicle_exit(); // clamped to capacity
        assert_eq!(parking.is_full(), Some(false));
        parking.set_free_spaces(50);
        if let PoiKind::Parking { free_spaces, .. } = parking.kind() {
            assert_eq!(*free_spaces, 2);
        }
    }

    #[test]
    fn fuel_station_has_no_occupancy() {
        let mut map = triangle_map();
        map.add_poi(
            PoiId(1),
            ArcId(1),
            0.8,
            [],
            PoiKind::FuelStation { operator: "Total".into() },
        )
        .unwrap();
        assert_eq!(map.poi(PoiId(1)).unwrap().is_full(), None);
    }
}

mod queries {
    use super::*;

    #[test]
    fn nearest_node_matches_brute_force() {
        let map = triangle_map();
        for probe in [coord(0.001, 0.009), coord(0.009, 0.009), coord(-0.002, 0.001)] {
            let found = map.nearest_node(&probe).unwrap();
            let best = map
                .nodes()
                .min_by(|a, b| a.distance_to(&probe).total_cmp(&b.distance_to(&probe)))
                .unwrap();
            assert_eq!(found.id(), best.id(), "probe {probe:?}");
        }
    }

    #[test]
    fn nearest_arc_position_beats_every_vertex() {
        let map = triangle_map();
        // North of the middle of a1: far from every node, close to the arc.
        let probe = coord(0.0005, 0.005);
        let on_arc = map.nearest_arc_position(&probe).unwrap();
        assert_eq!(on_arc.arc, ArcId(1));
        assert!((0.0..=1.0).contains(&on_arc.offset));

        let d_arc = on_arc.position.distance_to(&probe);
        let d_node = map.nearest_node(&probe).unwrap().distance_to(&probe);
        assert!(d_arc < d_node);
    }

    #[test]
    fn nearest_poi_picks_closest() {
        let mut map = triangle_map();
        map.add_poi(PoiId(1), ArcId(1), 0.1, [], PoiKind::FuelStation { operator: "Avia".into() })
            .unwrap();
        map.add_poi(PoiId(2), ArcId(1), 0.9, [], PoiKind::FuelStation { operator: "Esso".into() })
            .unwrap();
        let near_end = map.nearest_poi(&coord(0.0, 0.0095)).unwrap();
        assert_eq!(near_end.id(), PoiId(2));
    }

    #[test]
    fn zone_query_returns_entities_inside() {
        let map = triangle_map();
        let zone = Zone::of_points(&[coord(-0.001, -0.001), coord(0.001, 0.011)]).unwrap();
        let ids: Vec<NodeId> = map.nodes_in_zone(&zone).iter().map(|n| n.id()).collect();
        assert!(ids.contains(&NodeId(1)));
        assert!(ids.contains(&NodeId(2)));
        assert!(!ids.contains(&NodeId(3)));
    }

    #[test]
    fn empty_map_has_no_nearest() {
        let map = Map::new();
        assert!(map.nearest_node(&coord(0.0, 0.0)).is_none());
        assert!(map.nearest_arc_position(&coord(0.0, 0.0)).is_none());
        assert!(map.nearest_poi(&coord(0.0, 0.0)).is_none());
    }
}

mod routing {
    use super::*;

    #[test]
    fn shortest_by_length_takes_the_diagonal() {
        let map = triangle_map();
        let itinerary = map
            .plan_itinerary(NodeId(1), NodeId(3), CostMetric::Length, &DijkstraSolver)
            .unwrap();
        assert_eq!(itinerary.arcs(), &[ArcId(3)]);
        assert_eq!(itinerary.departure(&map), Some(NodeId(1)));
        assert_eq!(itinerary.arrival(&map), Some(NodeId(3)));
    }

    #[test]
    fn blocking_forces_the_detour_under_current_time() {
        let mut map = triangle_map();
        map.block_arc(ArcId(3)).unwrap();

        let itinerary = map
            .plan_itinerary(NodeId(1), NodeId(3), CostMetric::CurrentTime, &DijkstraSolver)
            .unwrap();
        assert_eq!(itinerary.arcs(), &[ArcId(1), ArcId(2)]);
        assert!(itinerary.current_travel_time_s(&map).is_finite());
    }

    #[test]
    fn blocking_does_not_affect_the_length_metric() {
        let mut map = triangle_map();
        map.block_arc(ArcId(3)).unwrap();
        let itinerary = map
            .plan_itinerary(NodeId(1), NodeId(3), CostMetric::Length, &DijkstraSolver)
            .unwrap();
        assert_eq!(itinerary.arcs(), &[ArcId(3)]);
        // The chosen path is impassable under current conditions.
        assert!(itinerary.current_travel_time_s(&map).is_infinite());
    }

    #[test]
    fn slowdown_reroutes_under_current_time() {
        let mut map = triangle_map();
        // Crawling traffic on the diagonal: 2 km/h out of 50.
        map.set_arc_current_speed(ArcId(3), 2.0).unwrap();
        let itinerary = map
            .plan_itinerary(NodeId(1), NodeId(3), CostMetric::CurrentTime, &DijkstraSolver)
            .unwrap();
        assert_eq!(itinerary.arcs(), &[ArcId(1), ArcId(2)]);
    }

    #[test]
    fn unreachable_arrival_yields_empty_itinerary() {
        let map = triangle_map();
        // Every arc points away from node 3.
        let itinerary = map
            .plan_itinerary(NodeId(3), NodeId(1), CostMetric::Length, &DijkstraSolver)
            .unwrap();
        assert!(itinerary.is_empty());
        assert_eq!(itinerary.departure(&map), None);
        assert_eq!(itinerary.total_length_m(&map), 0.0);
    }

    #[test]
    fn coincident_endpoints_yield_empty_itinerary() {
        let map = triangle_map();
        let itinerary = map
            .plan_itinerary(NodeId(2), NodeId(2), CostMetric::Length, &DijkstraSolver)
            .unwrap();
        assert!(itinerary.is_empty());
    }

    #[test]
    fn unknown_endpoint_is_an_error() {
        let map = triangle_map();
        let err = map
            .plan_itinerary(NodeId(1), NodeId(99), CostMetric::Length, &DijkstraSolver)
            .unwrap_err();
        assert!(matches!(err, MapError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn itinerary_measures_sum_over_arcs() {
        let mut map = triangle_map();
        map.block_arc(ArcId(3)).unwrap();
        let itinerary = map
            .plan_itinerary(NodeId(1), NodeId(3), CostMetric::CurrentTime, &DijkstraSolver)
            .unwrap();

        let a1 = map.arc(ArcId(1)).unwrap();
        let a2 = map.arc(ArcId(2)).unwrap();
        assert!(close(
            itinerary.total_length_m(&map),
            a1.length_m() + a2.length_m(),
            1e-9,
        ));
        assert!(close(
            itinerary.nominal_travel_time_s(&map),
            a1.nominal_travel_time_s() + a2.nominal_travel_time_s(),
            1e-9,
        ));
    }
}

mod solver {
    use super::*;

    /// Diamond: two branches from node 1 to node 4, the upper one cheaper.
    fn diamond() -> WeightedSubgraph {
        WeightedSubgraph {
            nodes: vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)],
            arcs: vec![ArcId(1), ArcId(2), ArcId(3), ArcId(4)],
            endpoints: vec![
                (NodeId(1), NodeId(2)),
                (NodeId(2), NodeId(4)),
                (NodeId(1), NodeId(3)),
                (NodeId(3), NodeId(4)),
            ],
            weights: vec![1.0, 1.0, 5.0, 1.0],
        }
    }

    #[test]
    fn picks_the_cheaper_branch() {
        let path = DijkstraSolver.shortest_path(&diamond(), NodeId(1), NodeId(4));
        assert_eq!(path, vec![ArcId(1), ArcId(2)]);
    }

    #[test]
    fn respects_arc_direction() {
        let path = DijkstraSolver.shortest_path(&diamond(), NodeId(4), NodeId(1));
        assert!(path.is_empty());
    }

    #[test]
    fn infinite_weights_are_impassable() {
        let mut graph = diamond();
        graph.weights[0] = f64::INFINITY;
        let path = DijkstraSolver.shortest_path(&graph, NodeId(1), NodeId(4));
        assert_eq!(path, vec![ArcId(3), ArcId(4)]);

        graph.weights[2] = f64::INFINITY;
        let path = DijkstraSolver.shortest_path(&graph, NodeId(1), NodeId(4));
        assert!(path.is_empty());
    }

    #[test]
    fn missing_endpoints_yield_no_path() {
        let graph = diamond();
        assert!(DijkstraSolver.shortest_path(&graph, NodeId(9), NodeId(4)).is_empty());
        assert!(DijkstraSolver.shortest_path(&graph, NodeId(1), NodeId(9)).is_empty());
    }

    #[test]
    fn zero_weight_arcs_are_traversable() {
        let mut graph = diamond();
        graph.weights = vec![0.0, 0.0, 0.0, 0.0];
        let path = DijkstraSolver.shortest_path(&graph, NodeId(1), NodeId(4));
        assert_eq!(path.len(), 2);
    }
}
