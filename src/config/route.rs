//! Route search settings section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Constrained pathfinder settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteSettings {
    /// Maximum nodes to expand before giving up.
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,

    /// Maximum distance from a query point to its snapped graph node
    /// (pixels). Infinite by default: the nearest node is always accepted
    /// when the graph is non-empty.
    #[serde(default = "defaults::max_snap_distance")]
    pub max_snap_distance: f32,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            max_iterations: defaults::max_iterations(),
            max_snap_distance: defaults::max_snap_distance(),
        }
    }
}
