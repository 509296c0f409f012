//! Navigation graph settings section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Navigation graph builder settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphSettings {
    /// Maximum straight-line distance between waypoints of different
    /// zones for an edge to be considered (pixels). Consecutive waypoints
    /// within an aisle are always connected regardless.
    #[serde(default = "defaults::max_connect_distance")]
    pub max_connect_distance: f32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            max_connect_distance: defaults::max_connect_distance(),
        }
    }
}
