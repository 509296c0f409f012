//! Joining pairwise measurements into aisle chains.
//!
//! Pairs that share an anchor (A–B, B–C, ...) are walked into ordered
//! chains so each corridor becomes one continuous polygon instead of
//! disconnected segments.

use log::{debug, warn};
use std::collections::BTreeMap;

use crate::anchors::{PairDimension, TdoaPair};

use super::types::AisleChain;

/// Join 1D pairs into chains via shared anchors.
///
/// An anchor referenced by exactly one pair is a chain endpoint. Starting
/// from each endpoint (in order of first appearance in the input), the
/// walk greedily takes the lowest-index unused pair touching the current
/// anchor and moves to its far end until no unused pair remains there.
/// This is a simple path traversal: branching (3+ unused pairs at an
/// anchor) and cycles are not detected; any pair left unused afterwards
/// is emitted as its own single-pair chain, in input order.
///
/// Deterministic: identical input always produces identical chains; all
/// tie-breaks resolve by original input index.
pub fn find_aisle_chains(pairs: &[TdoaPair]) -> Vec<AisleChain> {
    // Indices of 1D pairs only, preserving input order.
    let one_d: Vec<usize> = pairs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.dimension == PairDimension::OneD)
        .map(|(i, _)| i)
        .collect();

    if one_d.is_empty() {
        return Vec::new();
    }

    // Anchor -> referencing pair indices, in input order.
    let mut adjacency: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for &i in &one_d {
        adjacency.entry(&pairs[i].source).or_default().push(i);
        adjacency.entry(&pairs[i].destination).or_default().push(i);
    }

    // Chain endpoints: anchors used by exactly one pair, in order of
    // first appearance in the input (not map order).
    let mut endpoints: Vec<&str> = Vec::new();
    for &i in &one_d {
        for anchor in [pairs[i].source.as_str(), pairs[i].destination.as_str()] {
            if adjacency[anchor].len() == 1 && !endpoints.contains(&anchor) {
                endpoints.push(anchor);
            }
        }
    }

    let mut used = vec![false; pairs.len()];
    let mut chains = Vec::new();

    for start in endpoints {
        if !adjacency[start].iter().any(|&i| !used[i]) {
            continue; // endpoint consumed by a walk from the other end
        }
        let mut current = start.to_string();
        let mut chain_pairs = Vec::new();
        let mut sequence = vec![current.clone()];

        while let Some(&next) = adjacency
            .get(current.as_str())
            .and_then(|idxs| idxs.iter().find(|&&i| !used[i]))
        {
            used[next] = true;
            let pair = &pairs[next];
            // references() held when the pair was indexed under this anchor
            let far = pair.other_anchor(&current).unwrap_or(&pair.destination);
            current = far.to_string();
            sequence.push(current.clone());
            chain_pairs.push(pair.clone());
        }

        if !chain_pairs.is_empty() {
            debug!(
                "[Chains] walked chain of {} pairs from endpoint '{}'",
                chain_pairs.len(),
                start
            );
            chains.push(AisleChain::new(chain_pairs, sequence));
        }
    }

    // Leftovers (cycles, branch remainders): one chain per pair.
    for &i in &one_d {
        if !used[i] {
            let pair = &pairs[i];
            warn!(
                "[Chains] pair row {} ({}-{}) not reachable from any endpoint, emitting as single-pair chain",
                pair.row_number, pair.source, pair.destination
            );
            chains.push(AisleChain::new(
                vec![pair.clone()],
                vec![pair.source.clone(), pair.destination.clone()],
            ));
        }
    }

    chains
}
