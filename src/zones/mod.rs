//! Zone model and zone-set merging.

pub mod merger;
mod types;

pub use merger::{
    blocked_zones, merge_zone_sets, travel_lane_from_coverage, travelable_zones, zones_by_source,
    COVERAGE_UID_KEY,
};
pub use types::{AisleDirection, Zone, ZoneMetadata, ZoneSource, ZoneType};
