//! Configuration for the navigation pipeline.
//!
//! Every section deserializes with per-field defaults, so a partial
//! config document is always valid.

mod defaults;
mod extension;
mod graph;
mod route;

pub use extension::ExtensionSettings;
pub use graph::GraphSettings;
pub use route::RouteSettings;

use serde::{Deserialize, Serialize};

/// Umbrella configuration for zone generation and routing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NavConfig {
    /// Aisle extension engine settings.
    #[serde(default)]
    pub extension: ExtensionSettings,

    /// Navigation graph builder settings.
    #[serde(default)]
    pub graph: GraphSettings,

    /// Constrained pathfinder settings.
    #[serde(default)]
    pub route: RouteSettings,
}
