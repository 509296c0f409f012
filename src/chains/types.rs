//! Aisle chain types.

use serde::{Deserialize, Serialize};

use crate::anchors::TdoaPair;

/// An ordered run of 1D pairs joined end-to-end via shared anchors.
///
/// Invariant: consecutive pairs share an anchor, so a chain of N pairs
/// visits N+1 distinct anchors. Cycles are not specially handled; pairs
/// left over after endpoint walks become single-pair chains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AisleChain {
    /// The pairs, in traversal order.
    pub pairs: Vec<TdoaPair>,
    /// Anchor names in traversal order (one more than `pairs`).
    pub anchor_sequence: Vec<String>,
    /// Sum of pair distances, millimeters.
    pub total_length_mm: f32,
    /// Mean of pair margins, millimeters.
    pub average_margin_mm: f32,
}

impl AisleChain {
    /// Build a chain from walked pairs and their anchor traversal order,
    /// computing the derived length and margin.
    pub fn new(pairs: Vec<TdoaPair>, anchor_sequence: Vec<String>) -> Self {
        let total_length_mm = pairs.iter().map(|p| p.distance_mm).sum();
        let average_margin_mm = if pairs.is_empty() {
            0.0
        } else {
            pairs.iter().map(|p| p.margin_mm).sum::<f32>() / pairs.len() as f32
        };
        Self {
            pairs,
            anchor_sequence,
            total_length_mm,
            average_margin_mm,
        }
    }
}
