//! Zone set merging.
//!
//! Combines programmatic zones (aisles and coverage-derived travel
//! lanes), AI-detected zones, and raw coverage polygons into one
//! deduplicated set. Overlap handling is informational only: conflicts
//! between different-typed zones are logged, and both zones are kept.

use log::debug;

use crate::anchors::{CoveragePolygon, FloorplanTransform};
use crate::zones::{Zone, ZoneMetadata, ZoneSource, ZoneType};

/// Metadata key tracking which coverage polygon a zone represents.
pub const COVERAGE_UID_KEY: &str = "coverage_uid";

/// Merge programmatic, AI, and coverage-derived zones into one set.
///
/// Coverage polygons that are 2D, non-exclusion, and not already
/// represented by a programmatic zone (tracked by coverage UID) are
/// synthesized into travel-lane zones. The combined list is ordered by
/// type specificity (blocked > aisle > travel lane > rest, stable within
/// rank), and cross-type bounding-box overlaps are logged without
/// removing or clipping either zone. Applying the merge to its own
/// output with no new inputs yields the same set.
pub fn merge_zone_sets(
    programmatic: &[Zone],
    ai_zones: &[Zone],
    coverage: &[CoveragePolygon],
    transform: &dyn FloorplanTransform,
) -> Vec<Zone> {
    let mut combined: Vec<Zone> = programmatic.to_vec();

    // Coverage polygons already carried by a programmatic travel lane.
    let represented: Vec<&str> = programmatic
        .iter()
        .filter_map(|z| z.metadata.custom.get(COVERAGE_UID_KEY))
        .map(String::as_str)
        .collect();

    for polygon in coverage {
        if !polygon.is_travelable_area() {
            continue;
        }
        if represented.contains(&polygon.uid.as_str()) {
            debug!(
                "[Merger] coverage '{}' already represented, skipping",
                polygon.uid
            );
            continue;
        }
        combined.push(travel_lane_from_coverage(polygon, transform));
    }

    combined.extend(ai_zones.iter().cloned());

    // Most specific types first; stable within a rank, so input order is
    // the only remaining tie-break.
    combined.sort_by_key(|z| z.zone_type.specificity_rank());

    let mut accepted: Vec<Zone> = Vec::with_capacity(combined.len());
    for zone in combined {
        if !zone.is_degenerate() {
            let bounds = zone.bounds();
            for existing in accepted.iter().filter(|e| !e.is_degenerate()) {
                if existing.zone_type != zone.zone_type && bounds.intersects(&existing.bounds()) {
                    // Open question upstream: overlap is reported, never
                    // resolved; both zones stay in the set.
                    debug!(
                        "[Merger] zone '{}' ({:?}) overlaps more specific '{}' ({:?}), keeping both",
                        zone.id, zone.zone_type, existing.id, existing.zone_type
                    );
                }
            }
        }
        accepted.push(zone);
    }

    accepted
}

/// Synthesize a travel-lane zone from a coverage polygon.
pub fn travel_lane_from_coverage(
    polygon: &CoveragePolygon,
    transform: &dyn FloorplanTransform,
) -> Zone {
    Zone {
        id: format!("travel_lane_{}", polygon.uid),
        zone_type: ZoneType::TravelLane,
        polygon: transform.polygon_to_pixels(&polygon.points_mm),
        source: ZoneSource::Coverage,
        confidence: 1.0,
        metadata: ZoneMetadata::default().with_property(COVERAGE_UID_KEY, polygon.uid.clone()),
    }
}

/// Zones whose type can be traveled through.
pub fn travelable_zones(zones: &[Zone]) -> Vec<&Zone> {
    zones.iter().filter(|z| z.is_travelable()).collect()
}

/// Blocked-area zones only.
pub fn blocked_zones(zones: &[Zone]) -> Vec<&Zone> {
    zones
        .iter()
        .filter(|z| z.zone_type == ZoneType::BlockedArea)
        .collect()
}

/// Zones filtered by provenance.
pub fn zones_by_source(zones: &[Zone], source: ZoneSource) -> Vec<&Zone> {
    zones.iter().filter(|z| z.source == source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::{PairDimension, ScaleTransform};
    use crate::core::Point;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    fn coverage(uid: &str, exclusion: bool) -> CoveragePolygon {
        CoveragePolygon {
            uid: uid.to_string(),
            dimension: PairDimension::TwoD,
            exclusion,
            points_mm: rect(0.0, 0.0, 100.0, 100.0),
            margin_mm: 0.0,
        }
    }

    #[test]
    fn test_synthesizes_travel_lanes_from_coverage() {
        let transform = ScaleTransform::identity();
        let merged = merge_zone_sets(&[], &[], &[coverage("c1", false)], &transform);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].zone_type, ZoneType::TravelLane);
        assert_eq!(merged[0].id, "travel_lane_c1");
        assert_eq!(
            merged[0].metadata.custom.get(COVERAGE_UID_KEY).unwrap(),
            "c1"
        );
    }

    #[test]
    fn test_exclusion_coverage_is_skipped() {
        let transform = ScaleTransform::identity();
        let merged = merge_zone_sets(&[], &[], &[coverage("c1", true)], &transform);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_represented_coverage_not_duplicated() {
        let transform = ScaleTransform::identity();
        let lane = travel_lane_from_coverage(&coverage("c1", false), &transform);
        let merged = merge_zone_sets(&[lane], &[], &[coverage("c1", false)], &transform);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_specificity_ordering() {
        let transform = ScaleTransform::identity();
        let lane = Zone::new("lane", ZoneType::TravelLane, rect(0.0, 0.0, 100.0, 100.0), ZoneSource::Coverage);
        let aisle = Zone::new("aisle", ZoneType::AislePath, rect(0.0, 0.0, 50.0, 10.0), ZoneSource::Tdoa);
        let blocked = Zone::new("blocked", ZoneType::BlockedArea, rect(20.0, 20.0, 40.0, 40.0), ZoneSource::Ai);

        let merged = merge_zone_sets(&[lane, aisle], &[blocked], &[], &transform);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].id, "blocked");
        assert_eq!(merged[1].id, "aisle");
        assert_eq!(merged[2].id, "lane");
    }

    #[test]
    fn test_overlapping_zones_both_kept() {
        let transform = ScaleTransform::identity();
        let lane = Zone::new("lane", ZoneType::TravelLane, rect(0.0, 0.0, 100.0, 100.0), ZoneSource::Coverage);
        let blocked = Zone::new("blocked", ZoneType::BlockedArea, rect(10.0, 10.0, 90.0, 90.0), ZoneSource::Ai);
        let merged = merge_zone_sets(&[lane], &[blocked], &[], &transform);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_degenerate_zone_survives_merge() {
        let transform = ScaleTransform::identity();
        let degenerate = Zone::new(
            "thin",
            ZoneType::TravelLane,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
            ZoneSource::Manual,
        );
        let merged = merge_zone_sets(&[degenerate], &[], &[], &transform);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_idempotent_on_own_output() {
        let transform = ScaleTransform::identity();
        let lane = Zone::new("lane", ZoneType::TravelLane, rect(0.0, 0.0, 100.0, 100.0), ZoneSource::Coverage);
        let blocked = Zone::new("blocked", ZoneType::BlockedArea, rect(10.0, 10.0, 40.0, 40.0), ZoneSource::Ai);

        let first = merge_zone_sets(&[lane], &[blocked], &[coverage("c1", false)], &transform);
        let second = merge_zone_sets(&first, &[], &[], &transform);
        assert_eq!(first.len(), second.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_queries() {
        let transform = ScaleTransform::identity();
        let lane = Zone::new("lane", ZoneType::TravelLane, rect(0.0, 0.0, 100.0, 100.0), ZoneSource::Coverage);
        let blocked = Zone::new("blocked", ZoneType::BlockedArea, rect(200.0, 0.0, 300.0, 100.0), ZoneSource::Ai);
        let merged = merge_zone_sets(&[lane], &[blocked], &[], &transform);

        assert_eq!(travelable_zones(&merged).len(), 1);
        assert_eq!(blocked_zones(&merged).len(), 1);
        assert_eq!(zones_by_source(&merged, ZoneSource::Ai).len(), 1);
        assert!(zones_by_source(&merged, ZoneSource::Manual).is_empty());
    }
}
