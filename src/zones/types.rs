//! Zone value types.
//!
//! A zone is a simple polygon over the floorplan plus classification and
//! provenance. Zones are immutable value objects once created by their
//! generator; the navigation graph and routes are derived from the
//! current zone set on demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{polygon_bounds, polygon_centroid, Bounds, Point};

/// Zone classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    /// Narrow travelable corridor derived from anchor pairs.
    AislePath,
    /// Broad travelable area derived from coverage polygons.
    TravelLane,
    /// Manually drawn travelable floor.
    OpenFloor,
    /// Travelable staging/buffer area.
    StagingArea,
    /// Travelable dock apron.
    Dock,
    /// Storage racking (not travelable).
    Racking,
    /// Obstacle or exclusion region (not travelable).
    BlockedArea,
    /// Structural wall (not travelable).
    Wall,
}

impl ZoneType {
    /// Whether this zone type can be traveled through.
    pub fn is_travelable(&self) -> bool {
        matches!(
            self,
            ZoneType::AislePath
                | ZoneType::TravelLane
                | ZoneType::OpenFloor
                | ZoneType::StagingArea
                | ZoneType::Dock
        )
    }

    /// Merge specificity rank: more specific types win overlap ordering.
    /// Lower rank sorts first.
    pub(crate) fn specificity_rank(&self) -> u8 {
        match self {
            ZoneType::BlockedArea => 0,
            ZoneType::AislePath => 1,
            ZoneType::TravelLane => 2,
            _ => 3,
        }
    }
}

/// Where a zone came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSource {
    /// Drawn by hand in the editor.
    Manual,
    /// Detected by the AI vision layer.
    Ai,
    /// Derived from anchor-pair timing measurements.
    Tdoa,
    /// Synthesized from a coverage polygon.
    Coverage,
    /// Loaded from an external file.
    Imported,
}

/// Dominant axis of an aisle corridor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AisleDirection {
    Horizontal,
    Vertical,
}

/// Free-form zone metadata: directionality plus string-keyed provenance
/// properties (chain membership, extension targets, coverage uid).
///
/// A `BTreeMap` keeps key iteration deterministic across runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneMetadata {
    /// Dominant aisle axis, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<AisleDirection>,

    /// Arbitrary provenance properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
}

impl ZoneMetadata {
    /// Set a custom property, returning self for chaining.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }
}

/// An annotated floorplan region.
///
/// Invariant: `polygon` should have at least 3 vertices. Degenerate
/// zones are tolerated by consumers (skipped during overlap testing,
/// excluded from pathfinding) but flagged by [`Zone::is_degenerate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique id within the zone set.
    pub id: String,
    /// Classification.
    pub zone_type: ZoneType,
    /// Ordered vertex sequence (no repeated closing vertex), pixel frame.
    pub polygon: Vec<Point>,
    /// Provenance of the zone.
    pub source: ZoneSource,
    /// Detection confidence in [0, 1]; 1.0 for programmatic zones.
    pub confidence: f32,
    /// Directionality and custom properties.
    #[serde(default)]
    pub metadata: ZoneMetadata,
}

impl Zone {
    /// Create a zone with full confidence and empty metadata.
    pub fn new(
        id: impl Into<String>,
        zone_type: ZoneType,
        polygon: Vec<Point>,
        source: ZoneSource,
    ) -> Self {
        Self {
            id: id.into(),
            zone_type,
            polygon,
            source,
            confidence: 1.0,
            metadata: ZoneMetadata::default(),
        }
    }

    /// Whether the polygon is too degenerate for geometric queries.
    pub fn is_degenerate(&self) -> bool {
        self.polygon.len() < 3
    }

    /// Whether this zone can be traveled through.
    pub fn is_travelable(&self) -> bool {
        self.zone_type.is_travelable()
    }

    /// Axis-aligned bounding box of the polygon.
    pub fn bounds(&self) -> Bounds {
        polygon_bounds(&self.polygon)
    }

    /// Centroid of the polygon.
    pub fn centroid(&self) -> Point {
        polygon_centroid(&self.polygon)
    }
}
