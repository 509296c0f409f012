//! Default value functions for serde deserialization.

pub fn self_hit_epsilon() -> f32 {
    1.0
}

pub fn base_extension_cap() -> f32 {
    200.0
}

pub fn coverage_cap_slack() -> f32 {
    50.0
}

pub fn max_connect_distance() -> f32 {
    600.0
}

pub fn max_iterations() -> usize {
    100_000
}

pub fn max_snap_distance() -> f32 {
    f32::INFINITY
}
