//! Aisle extension settings section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Aisle extension engine settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtensionSettings {
    /// Ray hits closer than this are discarded as self-hits at the seam
    /// between adjacent chain segments (pixels).
    #[serde(default = "defaults::self_hit_epsilon")]
    pub self_hit_epsilon: f32,

    /// Lower bound of the extension cap (pixels). The effective cap is
    /// `max(base_cap, nearest_coverage_distance + coverage_cap_slack)`.
    #[serde(default = "defaults::base_extension_cap")]
    pub base_cap: f32,

    /// Slack added past the nearest coverage polygon when computing the
    /// extension cap (pixels).
    #[serde(default = "defaults::coverage_cap_slack")]
    pub coverage_cap_slack: f32,

    /// Extra length added past a coverage boundary hit so the aisle edge
    /// lands at or slightly beyond the boundary, never short of it
    /// (pixels). Applied only for coverage-boundary targets.
    #[serde(default)]
    pub boundary_overhang: f32,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            self_hit_epsilon: defaults::self_hit_epsilon(),
            base_cap: defaults::base_extension_cap(),
            coverage_cap_slack: defaults::coverage_cap_slack(),
            boundary_overhang: 0.0,
        }
    }
}
