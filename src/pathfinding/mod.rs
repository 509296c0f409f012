//! Constrained shortest-path search over the navigation graph.

mod planner;
mod types;

pub use planner::{is_point_valid, RoutePlanner};
pub use types::{route_distance, PathSegment, RouteFailure, RoutePath};
