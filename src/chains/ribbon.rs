//! Chain-to-polygon generation.
//!
//! Turns an aisle chain's anchor sequence (millimeters) into one ribbon
//! polygon of the chain's average half-width, then converts it to
//! pixels. The vertex order is a structural invariant the extension
//! engine indexes by: the left-side run first, then the right-side run
//! reversed; `[left_0 .. left_n, right_n .. right_0]`.

use log::debug;

use crate::anchors::{AnchorMap, FloorplanTransform};
use crate::core::Point;
use crate::error::{NavError, Result};
use crate::zones::{AisleDirection, Zone, ZoneMetadata, ZoneSource, ZoneType};

use super::types::AisleChain;

/// Generate the aisle zone polygon for a chain.
///
/// Fails (and must be reported by the caller, not dropped) when the
/// chain references an anchor missing from the map or collapses to
/// fewer than 2 distinct anchors.
pub fn generate_chained_aisle_zone(
    chain: &AisleChain,
    anchors: &AnchorMap,
    transform: &dyn FloorplanTransform,
    zone_id: String,
) -> Result<Zone> {
    let mut centerline_mm = Vec::with_capacity(chain.anchor_sequence.len());
    for name in &chain.anchor_sequence {
        let position = anchors
            .get(name)
            .ok_or_else(|| NavError::UnknownAnchor(name.clone()))?;
        centerline_mm.push(*position);
    }

    let mut distinct = centerline_mm.clone();
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(NavError::DegenerateChain(zone_id));
    }

    let half_width = chain.average_margin_mm;
    let polygon_mm = ribbon_polygon(&centerline_mm, half_width);
    let polygon = transform.polygon_to_pixels(&polygon_mm);

    let first = centerline_mm[0];
    let last = centerline_mm[centerline_mm.len() - 1];
    let span = last - first;
    let direction = if span.x.abs() >= span.y.abs() {
        AisleDirection::Horizontal
    } else {
        AisleDirection::Vertical
    };

    debug!(
        "[Chains] zone '{}': {} anchors, length {:.0}mm, half-width {:.0}mm",
        zone_id,
        chain.anchor_sequence.len(),
        chain.total_length_mm,
        half_width
    );

    let metadata = ZoneMetadata {
        direction: Some(direction),
        ..Default::default()
    }
    .with_property("chain_anchors", chain.anchor_sequence.join(","))
    .with_property("chain_pairs", chain.pairs.len().to_string())
    .with_property("average_margin_mm", format!("{:.1}", half_width));

    Ok(Zone {
        id: zone_id,
        zone_type: ZoneType::AislePath,
        polygon,
        source: ZoneSource::Tdoa,
        confidence: 1.0,
        metadata,
    })
}

/// Offset a centerline into a closed ribbon of the given half-width.
///
/// Endpoint vertices offset perpendicular to their single adjacent
/// segment; interior vertices along the mitered average of the two
/// adjacent segment directions. A zero-length segment falls back to the
/// previous direction so reversals cannot produce NaN offsets.
fn ribbon_polygon(centerline: &[Point], half_width: f32) -> Vec<Point> {
    let n = centerline.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    let mut previous_dir = Point::new(1.0, 0.0);
    for i in 0..n {
        let dir = if i == 0 {
            segment_dir(centerline[0], centerline[1], previous_dir)
        } else if i == n - 1 {
            segment_dir(centerline[n - 2], centerline[n - 1], previous_dir)
        } else {
            let incoming = segment_dir(centerline[i - 1], centerline[i], previous_dir);
            let outgoing = segment_dir(centerline[i], centerline[i + 1], incoming);
            let averaged = (incoming + outgoing).normalized();
            if averaged.length() > 0.0 {
                averaged
            } else {
                incoming
            }
        };
        previous_dir = dir;

        let offset = dir.perpendicular() * half_width;
        left.push(centerline[i] + offset);
        right.push(centerline[i] - offset);
    }

    right.reverse();
    left.extend(right);
    left
}

fn segment_dir(a: Point, b: Point, fallback: Point) -> Point {
    let dir = (b - a).normalized();
    if dir.length() > 0.0 {
        dir
    } else {
        fallback
    }
}
