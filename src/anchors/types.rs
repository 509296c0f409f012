//! Anchor and measurement input types.
//!
//! These mirror what the config/parsing layer hands over: anchor
//! positions, pairwise timing measurements (CSV rows), and coverage
//! polygons (JSON), all in millimeters until they cross the
//! [`FloorplanTransform`](super::FloorplanTransform) boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::Point;

/// Named anchor positions in millimeters, keyed by anchor name.
///
/// `BTreeMap` keeps lookup iteration deterministic.
pub type AnchorMap = BTreeMap<String, Point>;

/// Measurement dimensionality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairDimension {
    /// Corridor between two anchors (an aisle).
    #[serde(rename = "1D")]
    OneD,
    /// Coverage area measurement (not used by the aisle pipeline).
    #[serde(rename = "2D")]
    TwoD,
}

/// One anchor-to-anchor timing measurement (a parsed CSV row).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TdoaPair {
    /// Row number in the source file, used for stable tie-breaks.
    pub row_number: u32,
    /// Name of the source anchor.
    pub source: String,
    /// Name of the destination anchor.
    pub destination: String,
    /// 1D (aisle) or 2D (coverage) measurement.
    pub dimension: PairDimension,
    /// Anchor-to-anchor distance in millimeters.
    pub distance_mm: f32,
    /// Corridor half-width margin in millimeters.
    pub margin_mm: f32,
    /// Timing slot assignment.
    pub slot: u32,
}

impl TdoaPair {
    /// The anchor at the other end of this pair, or `None` if `anchor`
    /// is not part of the pair.
    pub fn other_anchor(&self, anchor: &str) -> Option<&str> {
        if self.source == anchor {
            Some(&self.destination)
        } else if self.destination == anchor {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Whether this pair references the given anchor.
    pub fn references(&self, anchor: &str) -> bool {
        self.source == anchor || self.destination == anchor
    }
}

/// A coverage area polygon, in millimeters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoveragePolygon {
    /// Unique coverage id.
    pub uid: String,
    /// 1D or 2D coverage.
    pub dimension: PairDimension,
    /// Exclusion polygons mark areas to avoid rather than cover.
    pub exclusion: bool,
    /// Polygon vertices in millimeters.
    pub points_mm: Vec<Point>,
    /// Margin around the polygon in millimeters.
    pub margin_mm: f32,
}

impl CoveragePolygon {
    /// Whether this polygon denotes a travelable open area.
    pub fn is_travelable_area(&self) -> bool {
        self.dimension == PairDimension::TwoD && !self.exclusion
    }
}
