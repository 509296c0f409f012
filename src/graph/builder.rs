//! Navigation graph construction.
//!
//! Each travelable zone contributes waypoint nodes: aisles an ordered
//! centerline sequence derived from the ribbon polygon invariant, 2D
//! areas their centroid plus edge midpoints. Edges connect waypoints
//! that are mutually reachable in a straight line without crossing a
//! blocked zone, weighted by Euclidean distance and stored in both
//! directions.

use log::debug;

use crate::config::GraphSettings;
use crate::core::{line_segment_intersection, point_in_polygon, polygon_centroid, Point};
use crate::zones::{Zone, ZoneType};

use super::types::{AislePosition, GraphNode, GraphEdge, NavigationGraph, ZoneClass};

/// Builds a [`NavigationGraph`] from a merged zone set.
#[derive(Clone, Debug, Default)]
pub struct NavigationGraphBuilder {
    settings: GraphSettings,
}

impl NavigationGraphBuilder {
    /// Create a builder with the given settings.
    pub fn new(settings: GraphSettings) -> Self {
        Self { settings }
    }

    /// Build the waypoint graph for the current zone set.
    ///
    /// Degenerate zones (fewer than 3 vertices) contribute nothing;
    /// blocked zones contribute no nodes but gate edge visibility.
    pub fn build(&self, zones: &[Zone]) -> NavigationGraph {
        let blocked: Vec<&Zone> = zones
            .iter()
            .filter(|z| z.zone_type == ZoneType::BlockedArea && !z.is_degenerate())
            .collect();

        let mut graph = NavigationGraph::default();

        for zone in zones {
            if !zone.is_travelable() || zone.is_degenerate() {
                continue;
            }

            let (class, waypoints) = sample_zone_waypoints(zone);
            if waypoints.is_empty() {
                continue;
            }

            let mut ids = Vec::with_capacity(waypoints.len());
            let count = waypoints.len();
            for (index, position) in waypoints.into_iter().enumerate() {
                let aisle_position = match class {
                    ZoneClass::Aisle1D => Some(if index == 0 {
                        AislePosition::Start
                    } else if index == count - 1 {
                        AislePosition::End
                    } else {
                        AislePosition::Mid
                    }),
                    ZoneClass::Area2D => None,
                };

                let id = format!("{}:wp{}", zone.id, index);
                ids.push(id.clone());
                graph.nodes.push(GraphNode {
                    id,
                    position,
                    zone_id: zone.id.clone(),
                    zone_class: class,
                    aisle_position,
                    waypoint_index: index,
                });
            }

            if class == ZoneClass::Aisle1D {
                graph.aisle_zone_ids.insert(zone.id.clone());
            }
            graph.zone_waypoints.insert(zone.id.clone(), ids);
        }

        self.connect(&mut graph, &blocked);

        debug!(
            "[Graph] built {} nodes, {} edges from {} zones",
            graph.nodes.len(),
            graph.edges.len(),
            zones.len()
        );
        graph
    }

    /// Insert edges: consecutive aisle waypoints unconditionally, and
    /// every other line-of-sight pair within the connect radius.
    fn connect(&self, graph: &mut NavigationGraph, blocked: &[&Zone]) {
        let nodes = &graph.nodes;
        let mut edges = Vec::new();

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let a = &nodes[i];
                let b = &nodes[j];

                let same_zone = a.zone_id == b.zone_id;
                let consecutive_in_aisle = same_zone
                    && a.zone_class == ZoneClass::Aisle1D
                    && a.waypoint_index.abs_diff(b.waypoint_index) == 1;

                let connect = if consecutive_in_aisle {
                    // The corridor itself: always connected, even when a
                    // logged overlap puts a blocked zone across it.
                    true
                } else if same_zone && a.zone_class == ZoneClass::Area2D {
                    line_of_sight(a.position, b.position, blocked)
                } else if same_zone {
                    // Non-adjacent waypoints of the same aisle: only the
                    // corridor sequence is routable.
                    false
                } else {
                    a.position.distance(&b.position) <= self.settings.max_connect_distance
                        && line_of_sight(a.position, b.position, blocked)
                };

                if connect {
                    let weight = a.position.distance(&b.position);
                    edges.push(GraphEdge {
                        from: a.id.clone(),
                        to: b.id.clone(),
                        weight,
                    });
                    edges.push(GraphEdge {
                        from: b.id.clone(),
                        to: a.id.clone(),
                        weight,
                    });
                }
            }
        }

        graph.edges = edges;
    }
}

/// Sample a zone's waypoints and classify it.
///
/// Aisle polygons carrying the ribbon invariant (even vertex count,
/// at least 4) yield their centerline midpoints in start-to-end order.
/// Anything else is treated as a 2D area: centroid plus edge midpoints.
fn sample_zone_waypoints(zone: &Zone) -> (ZoneClass, Vec<Point>) {
    let polygon = &zone.polygon;
    let n = polygon.len();

    if zone.zone_type == ZoneType::AislePath && n >= 4 && n % 2 == 0 {
        let half_n = n / 2;
        let centerline: Vec<Point> = (0..half_n)
            .map(|i| polygon[i].midpoint(&polygon[n - 1 - i]))
            .collect();
        return (ZoneClass::Aisle1D, centerline);
    }

    let mut waypoints = vec![polygon_centroid(polygon)];
    for i in 0..n {
        waypoints.push(polygon[i].midpoint(&polygon[(i + 1) % n]));
    }
    (ZoneClass::Area2D, waypoints)
}

/// True when the segment between two waypoints crosses no blocked zone.
///
/// A segment is blocked when it intersects any blocked-zone edge or its
/// midpoint lies inside a blocked polygon (covers the fully-contained
/// case with no edge crossing).
fn line_of_sight(a: Point, b: Point, blocked: &[&Zone]) -> bool {
    for zone in blocked {
        let polygon = &zone.polygon;
        let n = polygon.len();
        for k in 0..n {
            if line_segment_intersection(a, b, polygon[k], polygon[(k + 1) % n]).is_some() {
                return false;
            }
        }
        if point_in_polygon(a.midpoint(&b), polygon) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::ZoneSource;

    fn lane(id: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> Zone {
        Zone::new(
            id,
            ZoneType::TravelLane,
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            ZoneSource::Coverage,
        )
    }

    /// Ribbon aisle with three centerline waypoints at y.
    fn aisle(id: &str, x0: f32, x_mid: f32, x1: f32, y: f32) -> Zone {
        Zone::new(
            id,
            ZoneType::AislePath,
            vec![
                Point::new(x0, y - 5.0),
                Point::new(x_mid, y - 5.0),
                Point::new(x1, y - 5.0),
                Point::new(x1, y + 5.0),
                Point::new(x_mid, y + 5.0),
                Point::new(x0, y + 5.0),
            ],
            ZoneSource::Tdoa,
        )
    }

    #[test]
    fn test_aisle_waypoints_ordered_and_tagged() {
        let builder = NavigationGraphBuilder::default();
        let graph = builder.build(&[aisle("a0", 0.0, 50.0, 100.0, 10.0)]);

        let ids = &graph.zone_waypoints["a0"];
        assert_eq!(ids.len(), 3);
        let positions: Vec<Option<AislePosition>> = ids
            .iter()
            .map(|id| graph.node(id).unwrap().aisle_position)
            .collect();
        assert_eq!(
            positions,
            vec![
                Some(AislePosition::Start),
                Some(AislePosition::Mid),
                Some(AislePosition::End)
            ]
        );
        assert!(graph.aisle_zone_ids.contains("a0"));

        // Centerline runs along y=10
        for id in ids {
            let node = graph.node(id).unwrap();
            assert!((node.position.y - 10.0).abs() < 1e-4);
            assert_eq!(node.zone_class, ZoneClass::Aisle1D);
        }
    }

    #[test]
    fn test_area_waypoints_include_centroid() {
        let builder = NavigationGraphBuilder::default();
        let graph = builder.build(&[lane("l0", 0.0, 0.0, 100.0, 100.0)]);

        // centroid + 4 edge midpoints
        assert_eq!(graph.nodes.len(), 5);
        assert!(graph.aisle_zone_ids.is_empty());
        let centroid = graph.node("l0:wp0").unwrap();
        assert!((centroid.position.x - 50.0).abs() < 1e-4);
        assert!((centroid.position.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_consecutive_aisle_waypoints_connected() {
        let builder = NavigationGraphBuilder::default();
        let graph = builder.build(&[aisle("a0", 0.0, 50.0, 100.0, 10.0)]);

        let has = |from: &str, to: &str| graph.edges.iter().any(|e| e.from == from && e.to == to);
        assert!(has("a0:wp0", "a0:wp1"));
        assert!(has("a0:wp1", "a0:wp0"));
        assert!(has("a0:wp1", "a0:wp2"));
        // Skip edge within the aisle must not exist
        assert!(!has("a0:wp0", "a0:wp2"));
    }

    #[test]
    fn test_blocked_zone_gates_cross_zone_edges() {
        let builder = NavigationGraphBuilder::default();
        let left = lane("left", 0.0, 0.0, 100.0, 100.0);
        let right = lane("right", 200.0, 0.0, 300.0, 100.0);
        let wall = Zone::new(
            "wall",
            ZoneType::BlockedArea,
            vec![
                Point::new(140.0, -10.0),
                Point::new(160.0, -10.0),
                Point::new(160.0, 110.0),
                Point::new(140.0, 110.0),
            ],
            ZoneSource::Ai,
        );

        let open = builder.build(&[left.clone(), right.clone()]);
        let crossing = open
            .edges
            .iter()
            .any(|e| e.from.starts_with("left") && e.to.starts_with("right"));
        assert!(crossing);

        let gated = builder.build(&[left, right, wall]);
        let crossing = gated
            .edges
            .iter()
            .any(|e| e.from.starts_with("left") && e.to.starts_with("right"));
        assert!(!crossing);
    }

    #[test]
    fn test_degenerate_zone_contributes_nothing() {
        let builder = NavigationGraphBuilder::default();
        let degenerate = Zone::new(
            "thin",
            ZoneType::TravelLane,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            ZoneSource::Manual,
        );
        let graph = builder.build(&[degenerate]);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_edge_weights_are_euclidean() {
        let builder = NavigationGraphBuilder::default();
        let graph = builder.build(&[aisle("a0", 0.0, 50.0, 100.0, 10.0)]);
        let edge = graph
            .edges
            .iter()
            .find(|e| e.from == "a0:wp0" && e.to == "a0:wp1")
            .unwrap();
        assert!((edge.weight - 50.0).abs() < 1e-4);
    }
}
