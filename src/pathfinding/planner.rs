//! Constrained A* route search.
//!
//! Shortest path between two arbitrary pixel points over the navigation
//! graph, honoring the aisle traversal rule: an aisle may only be left
//! from its start or end waypoint, never mid-corridor, even when a
//! direct edge to another zone exists.

use log::{debug, trace};
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::config::RouteSettings;
use crate::core::{point_in_polygon, Point};
use crate::graph::{GraphNode, NavigationGraph, ZoneClass};
use crate::zones::Zone;

use super::types::{PathSegment, RouteFailure, RoutePath, SearchNode};

/// Constrained shortest-path planner.
#[derive(Clone, Debug, Default)]
pub struct RoutePlanner {
    settings: RouteSettings,
}

impl RoutePlanner {
    /// Create a planner with the given settings.
    pub fn new(settings: RouteSettings) -> Self {
        Self { settings }
    }

    /// Find the shortest travelable route from `start` to `end`.
    ///
    /// `travelable` and `blocked` gate endpoint validation: when both
    /// are supplied non-empty, a start or end point inside a blocked
    /// polygon (or inside no travelable polygon) is rejected before any
    /// search runs. Pass empty slices to skip validation.
    pub fn find_shortest_path(
        &self,
        graph: &NavigationGraph,
        start: Point,
        end: Point,
        travelable: &[Zone],
        blocked: &[Zone],
    ) -> RoutePath {
        trace!(
            "[Route] query ({:.1},{:.1}) -> ({:.1},{:.1})",
            start.x,
            start.y,
            end.x,
            end.y
        );

        if graph.is_empty() {
            debug!("[Route] FAILED: empty graph");
            return RoutePath::failed(RouteFailure::NoTravelableZones);
        }

        if !travelable.is_empty() && !blocked.is_empty() {
            if !is_point_valid(start, travelable, blocked) {
                debug!("[Route] FAILED: start point invalid");
                return RoutePath::failed(RouteFailure::StartOutsideTravelable);
            }
            if !is_point_valid(end, travelable, blocked) {
                debug!("[Route] FAILED: end point invalid");
                return RoutePath::failed(RouteFailure::GoalOutsideTravelable);
            }
        }

        let Some(start_index) = self.find_nearest_node(graph, start) else {
            debug!("[Route] FAILED: no node near start");
            return RoutePath::failed(RouteFailure::StartNodeNotFound);
        };
        let Some(goal_index) = self.find_nearest_node(graph, end) else {
            debug!("[Route] FAILED: no node near end");
            return RoutePath::failed(RouteFailure::GoalNodeNotFound);
        };

        // Both endpoints snap to the same waypoint: the direct two-point
        // path needs no search.
        if start_index == goal_index {
            let distance = start.distance(&end);
            let zone_id = graph.nodes[start_index].zone_id.clone();
            return RoutePath {
                success: true,
                points: vec![start, end],
                segments: vec![PathSegment {
                    from: start,
                    to: end,
                    distance,
                    zone_id,
                }],
                total_distance: distance,
                failure: None,
            };
        }

        match self.search(graph, start_index, goal_index) {
            Ok(node_path) => assemble_route(graph, &node_path, start, end),
            Err(failure) => {
                debug!("[Route] FAILED: {}", failure);
                RoutePath::failed(failure)
            }
        }
    }

    /// Nearest graph node to a point, within the snap radius.
    pub fn find_nearest_node(&self, graph: &NavigationGraph, point: Point) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, node) in graph.nodes.iter().enumerate() {
            let d = point.distance_squared(&node.position);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((index, d));
            }
        }
        let (index, distance_squared) = best?;
        if distance_squared.sqrt() > self.settings.max_snap_distance {
            return None;
        }
        Some(index)
    }

    /// A* over node indices, returning the node index path start..=goal.
    fn search(
        &self,
        graph: &NavigationGraph,
        start_index: usize,
        goal_index: usize,
    ) -> Result<Vec<usize>, RouteFailure> {
        // Adjacency in edge insertion order, so expansion order is a
        // pure function of the input graph.
        let id_to_index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();
        let mut adjacency: Vec<Vec<(usize, f32)>> = vec![Vec::new(); graph.nodes.len()];
        for edge in &graph.edges {
            if let (Some(&from), Some(&to)) = (
                id_to_index.get(edge.from.as_str()),
                id_to_index.get(edge.to.as_str()),
            ) {
                adjacency[from].push((to, edge.weight));
            }
        }

        let goal_position = graph.nodes[goal_index].position;
        let heuristic = |index: usize| graph.nodes[index].position.distance(&goal_position);

        let mut open_set = BinaryHeap::new();
        let mut closed_set: HashSet<usize> = HashSet::new();
        let mut came_from: HashMap<usize, usize> = HashMap::new();
        let mut g_scores: HashMap<usize, f32> = HashMap::new();
        let mut seq: u64 = 0;

        let start_node = &graph.nodes[start_index];
        open_set.push(SearchNode {
            index: start_index,
            g_cost: 0.0,
            f_cost: heuristic(start_index),
            seq,
            in_aisle: start_node.zone_class == ZoneClass::Aisle1D,
            aisle_zone: aisle_zone_of(start_node),
        });
        g_scores.insert(start_index, 0.0);

        let mut nodes_expanded = 0usize;

        while let Some(current) = open_set.pop() {
            nodes_expanded += 1;
            if nodes_expanded > self.settings.max_iterations {
                return Err(RouteFailure::MaxIterationsExceeded);
            }

            if current.index == goal_index {
                let mut path = vec![goal_index];
                let mut walk = goal_index;
                while let Some(&previous) = came_from.get(&walk) {
                    path.push(previous);
                    walk = previous;
                }
                path.reverse();
                trace!(
                    "[Route] SUCCESS: {} nodes, {} expanded, cost {:.1}",
                    path.len(),
                    nodes_expanded,
                    current.g_cost
                );
                return Ok(path);
            }

            if closed_set.contains(&current.index) {
                continue;
            }
            closed_set.insert(current.index);

            let current_node = &graph.nodes[current.index];

            for &(neighbor_index, weight) in &adjacency[current.index] {
                if closed_set.contains(&neighbor_index) {
                    continue;
                }

                let neighbor = &graph.nodes[neighbor_index];

                // The aisle constraint: leaving the current aisle zone is
                // legal only from an endpoint waypoint. A cheaper
                // shortcut edge out of a mid waypoint is skipped outright.
                if current.in_aisle
                    && current.aisle_zone.as_deref() != Some(neighbor.zone_id.as_str())
                    && !current_node
                        .aisle_position
                        .map_or(false, |p| p.is_endpoint())
                {
                    continue;
                }

                let tentative_g = current.g_cost + weight;
                let known_g = g_scores.get(&neighbor_index).copied().unwrap_or(f32::INFINITY);
                if tentative_g < known_g {
                    came_from.insert(neighbor_index, current.index);
                    g_scores.insert(neighbor_index, tentative_g);
                    seq += 1;
                    open_set.push(SearchNode {
                        index: neighbor_index,
                        g_cost: tentative_g,
                        f_cost: tentative_g + heuristic(neighbor_index),
                        seq,
                        in_aisle: neighbor.zone_class == ZoneClass::Aisle1D,
                        aisle_zone: aisle_zone_of(neighbor),
                    });
                }
            }
        }

        Err(RouteFailure::NoPath)
    }
}

/// A point is valid when it avoids every blocked polygon and lies
/// inside at least one travelable polygon. Degenerate polygons are
/// ignored on both sides.
pub fn is_point_valid(point: Point, travelable: &[Zone], blocked: &[Zone]) -> bool {
    for zone in blocked {
        if !zone.is_degenerate() && point_in_polygon(point, &zone.polygon) {
            return false;
        }
    }
    travelable
        .iter()
        .any(|zone| !zone.is_degenerate() && point_in_polygon(point, &zone.polygon))
}

fn aisle_zone_of(node: &GraphNode) -> Option<String> {
    (node.zone_class == ZoneClass::Aisle1D).then(|| node.zone_id.clone())
}

/// Assemble the final path: literal start, waypoint positions, literal
/// end, with per-segment distances and zone attribution.
fn assemble_route(
    graph: &NavigationGraph,
    node_path: &[usize],
    start: Point,
    end: Point,
) -> RoutePath {
    let mut points = Vec::with_capacity(node_path.len() + 2);
    points.push(start);
    for &index in node_path {
        points.push(graph.nodes[index].position);
    }
    points.push(end);

    let mut segments = Vec::with_capacity(points.len() - 1);
    for i in 0..points.len() - 1 {
        // Boundary legs belong to the snapped node's zone; graph legs to
        // the destination waypoint's zone.
        let zone_index = if i + 1 < points.len() - 1 {
            node_path[i]
        } else {
            node_path[node_path.len() - 1]
        };
        let from = points[i];
        let to = points[i + 1];
        segments.push(PathSegment {
            from,
            to,
            distance: from.distance(&to),
            zone_id: graph.nodes[zone_index].zone_id.clone(),
        });
    }

    let total_distance = segments.iter().map(|s| s.distance).sum();
    RoutePath {
        success: true,
        points,
        segments,
        total_distance,
        failure: None,
    }
}
