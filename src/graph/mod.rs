//! Waypoint graph derived from the merged zone set.

mod builder;
mod types;

pub use builder::NavigationGraphBuilder;
pub use types::{AislePosition, GraphEdge, GraphNode, NavigationGraph, ZoneClass};
