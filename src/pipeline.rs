//! The two pipeline entry points the owning application calls:
//! programmatic zone generation and route calculation.
//!
//! Both run synchronously to completion over their full input and
//! retain no state between calls; any async or cancellation behavior
//! belongs to the caller's boundary, not here.

use log::warn;

use crate::anchors::{AnchorMap, CoveragePolygon, FloorplanTransform, TdoaPair};
use crate::chains::{find_aisle_chains, generate_chained_aisle_zone};
use crate::config::NavConfig;
use crate::core::{Point, ZoneIdGenerator};
use crate::error::NavError;
use crate::extension::AisleExtensionEngine;
use crate::graph::NavigationGraphBuilder;
use crate::pathfinding::{RoutePath, RoutePlanner};
use crate::zones::{merge_zone_sets, travel_lane_from_coverage, Zone, ZoneType};

/// What the zone generation pass should produce.
#[derive(Clone, Copy, Debug)]
pub struct ZoneGenerationOptions {
    /// Build aisle zones from 1D anchor pairs.
    pub generate_aisles: bool,
    /// Include travel-lane zones derived from coverage polygons.
    pub generate_travel_lanes: bool,
}

impl Default for ZoneGenerationOptions {
    fn default() -> Self {
        Self {
            generate_aisles: true,
            generate_travel_lanes: true,
        }
    }
}

/// Output of the zone generation pass.
///
/// Per-record failures (missing anchors, collapsed chains) land in
/// `errors` while the rest of the batch proceeds.
#[derive(Clone, Debug, Default)]
pub struct ZoneGenerationResult {
    /// The merged zone set.
    pub zones: Vec<Zone>,
    /// Validation errors for records that were skipped.
    pub errors: Vec<NavError>,
}

/// Orchestrates chain building, extension, merging, graph construction,
/// and route search under one configuration.
#[derive(Clone, Debug, Default)]
pub struct NavPipeline {
    config: NavConfig,
}

impl NavPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    /// Generate the programmatic zone set from anchor measurements and
    /// coverage polygons: chains -> aisle polygons -> extension ->
    /// merge.
    pub fn generate_programmatic_zones(
        &self,
        anchors: &AnchorMap,
        pairs: &[TdoaPair],
        coverage: &[CoveragePolygon],
        transform: &dyn FloorplanTransform,
        options: ZoneGenerationOptions,
    ) -> ZoneGenerationResult {
        let mut errors = Vec::new();

        // Travel lanes in pixel space; extension targets even when the
        // caller excludes them from the output.
        let lanes: Vec<Zone> = coverage
            .iter()
            .filter(|c| c.is_travelable_area())
            .map(|c| travel_lane_from_coverage(c, transform))
            .collect();

        let mut aisles: Vec<Zone> = Vec::new();
        if options.generate_aisles {
            let mut ids = ZoneIdGenerator::new("aisle");
            for chain in find_aisle_chains(pairs) {
                let zone_id = ids.next_id();
                match generate_chained_aisle_zone(&chain, anchors, transform, zone_id) {
                    Ok(zone) => aisles.push(zone),
                    Err(error) => {
                        warn!("[Pipeline] skipping chain: {}", error);
                        errors.push(error);
                    }
                }
            }

            let engine = AisleExtensionEngine::new(self.config.extension.clone());
            aisles = engine
                .extend_all_aisles(&aisles, &lanes)
                .into_iter()
                .map(|extended| extended.zone)
                .collect();
        }

        let mut programmatic = aisles;
        let coverage_for_merge: &[CoveragePolygon] = if options.generate_travel_lanes {
            programmatic.extend(lanes);
            coverage
        } else {
            &[]
        };

        let zones = merge_zone_sets(&programmatic, &[], coverage_for_merge, transform);
        ZoneGenerationResult { zones, errors }
    }

    /// Compute the shortest travelable route between two pixel points
    /// against the current zone set.
    pub fn calculate_route(&self, zones: &[Zone], start: Point, end: Point) -> RoutePath {
        let travelable: Vec<Zone> = zones.iter().filter(|z| z.is_travelable()).cloned().collect();
        let blocked: Vec<Zone> = zones
            .iter()
            .filter(|z| z.zone_type == ZoneType::BlockedArea)
            .cloned()
            .collect();

        let graph = NavigationGraphBuilder::new(self.config.graph.clone()).build(zones);
        let planner = RoutePlanner::new(self.config.route.clone());
        planner.find_shortest_path(&graph, start, end, &travelable, &blocked)
    }
}
