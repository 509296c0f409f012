//! Route search types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

use crate::core::Point;

/// A node in the A* open set.
///
/// The aisle state travels with the entry, not with the closed set: a
/// node is finalized once regardless of how it was entered, because the
/// exit constraint is evaluated transitionally during expansion.
#[derive(Clone, Debug)]
pub(super) struct SearchNode {
    /// Index into the graph's node list.
    pub index: usize,
    /// Cost from the start node.
    pub g_cost: f32,
    /// g_cost + heuristic.
    pub f_cost: f32,
    /// Monotone insertion sequence; equal-cost entries pop in insertion
    /// order so the search is deterministic.
    pub seq: u64,
    /// Whether this entry sits inside an aisle zone.
    pub in_aisle: bool,
    /// The aisle zone, when `in_aisle` is set.
    pub aisle_zone: Option<String>,
}

impl Eq for SearchNode {}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.seq == other.seq
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; insertion order breaks
        // f-cost ties.
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Why a route query failed.
///
/// Callers discriminate invalid input (`*OutsideTravelable`), a missing
/// graph (`NoTravelableZones`, `*NodeNotFound`), and genuine
/// unreachability (`NoPath`) by variant; the messages are user-facing.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteFailure {
    #[error("No travelable zones available for routing")]
    NoTravelableZones,

    #[error("Start point is inside a blocked area or outside every travelable zone")]
    StartOutsideTravelable,

    #[error("End point is inside a blocked area or outside every travelable zone")]
    GoalOutsideTravelable,

    #[error("No graph node is reachable from the start point")]
    StartNodeNotFound,

    #[error("No graph node is reachable from the end point")]
    GoalNodeNotFound,

    #[error("No path found between the start and end points")]
    NoPath,

    #[error("Route search exceeded the iteration limit")]
    MaxIterationsExceeded,
}

/// One leg of a computed route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Segment start (pixels).
    pub from: Point,
    /// Segment end (pixels).
    pub to: Point,
    /// Euclidean length of the segment.
    pub distance: f32,
    /// Zone the segment belongs to (destination waypoint's zone; the
    /// snapped node's zone for the boundary legs).
    pub zone_id: String,
}

/// Result of a route query.
///
/// Invariants on success: `points.len() == segments.len() + 1` and
/// `total_distance` equals the sum of segment distances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    /// Whether a route was found.
    pub success: bool,
    /// Ordered route points, starting at the literal query start and
    /// ending at the literal query end.
    pub points: Vec<Point>,
    /// Per-leg breakdown.
    pub segments: Vec<PathSegment>,
    /// Sum of segment distances.
    pub total_distance: f32,
    /// Failure reason when `success` is false.
    pub failure: Option<RouteFailure>,
}

impl RoutePath {
    /// Create a failed result.
    pub fn failed(reason: RouteFailure) -> Self {
        Self {
            success: false,
            points: Vec::new(),
            segments: Vec::new(),
            total_distance: 0.0,
            failure: Some(reason),
        }
    }

    /// The failure message, empty on success.
    pub fn error_message(&self) -> String {
        self.failure
            .as_ref()
            .map(|f| f.to_string())
            .unwrap_or_default()
    }
}

/// Total polyline length: 0 for fewer than two points.
pub fn route_distance(points: &[Point]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_distance() {
        assert_eq!(route_distance(&[]), 0.0);
        assert_eq!(route_distance(&[Point::ZERO]), 0.0);
        let d = route_distance(&[Point::ZERO, Point::new(3.0, 4.0)]);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_failure_messages_are_distinct() {
        let reasons = [
            RouteFailure::NoTravelableZones,
            RouteFailure::StartOutsideTravelable,
            RouteFailure::GoalOutsideTravelable,
            RouteFailure::StartNodeNotFound,
            RouteFailure::GoalNodeNotFound,
            RouteFailure::NoPath,
            RouteFailure::MaxIterationsExceeded,
        ];
        for (i, a) in reasons.iter().enumerate() {
            for b in reasons.iter().skip(i + 1) {
                assert_ne!(a.to_string(), b.to_string());
            }
        }
        assert!(RouteFailure::NoTravelableZones
            .to_string()
            .contains("No travelable zones"));
    }

    #[test]
    fn test_heap_order_breaks_ties_by_insertion() {
        use std::collections::BinaryHeap;

        let entry = |f_cost: f32, seq: u64| SearchNode {
            index: 0,
            g_cost: 0.0,
            f_cost,
            seq,
            in_aisle: false,
            aisle_zone: None,
        };

        let mut heap = BinaryHeap::new();
        heap.push(entry(10.0, 1));
        heap.push(entry(5.0, 2));
        heap.push(entry(5.0, 0));

        assert_eq!(heap.pop().unwrap().seq, 0); // lower seq wins the tie
        assert_eq!(heap.pop().unwrap().seq, 2);
        assert_eq!(heap.pop().unwrap().f_cost, 10.0);
    }
}
