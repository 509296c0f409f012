//! Navigation graph types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::Point;

/// Topological classification of the zone a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneClass {
    /// One-dimensional corridor: enter and leave only at the endpoints.
    #[serde(rename = "1d_aisle")]
    Aisle1D,
    /// Two-dimensional area: free movement between its waypoints.
    #[serde(rename = "2d_area")]
    Area2D,
}

/// Position of an aisle waypoint along its corridor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AislePosition {
    Start,
    Mid,
    End,
}

impl AislePosition {
    /// Whether an aisle may be exited from a node at this position.
    pub fn is_endpoint(&self) -> bool {
        matches!(self, AislePosition::Start | AislePosition::End)
    }
}

/// One routable waypoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique node id.
    pub id: String,
    /// Waypoint position (pixels).
    pub position: Point,
    /// Zone this node was sampled from.
    pub zone_id: String,
    /// Topological class of that zone.
    pub zone_class: ZoneClass,
    /// Corridor position tag; only set for aisle nodes.
    pub aisle_position: Option<AislePosition>,
    /// Index of this waypoint within its zone's ordered sequence.
    pub waypoint_index: usize,
}

/// A directed weighted connection between two waypoints.
///
/// Storage is directed; in practice every connection is inserted in
/// both directions with the same Euclidean weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node id.
    pub from: String,
    /// Destination node id.
    pub to: String,
    /// Euclidean distance along the connection (pixels).
    pub weight: f32,
}

/// The routable waypoint graph derived from a merged zone set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationGraph {
    /// All waypoint nodes.
    pub nodes: Vec<GraphNode>,
    /// All directed edges.
    pub edges: Vec<GraphEdge>,
    /// Zone id -> ordered node-id sequence. For aisles the order runs
    /// start to end along the corridor.
    pub zone_waypoints: BTreeMap<String, Vec<String>>,
    /// Zone ids classified as 1D aisles.
    pub aisle_zone_ids: BTreeSet<String>,
}

impl NavigationGraph {
    /// Whether the graph has no routable nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
