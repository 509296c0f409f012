//! Aisle extension engine.
//!
//! Chained aisle polygons end exactly at their terminal anchors, which
//! usually leaves a gap to the surrounding travel lanes. For each aisle
//! endpoint not already inside a travelable area, this engine casts a
//! ray along the aisle's axis, finds the nearest coverage boundary or
//! other aisle, and stretches the aisle polygon to meet it so the
//! navigation graph comes out connected.
//!
//! Aisle polygons follow the ribbon structural invariant
//! `[left_0 .. left_n, right_n .. right_0]`; the corner vertices moved
//! here are identified purely by index through that invariant.

use log::{debug, trace};

use crate::config::ExtensionSettings;
use crate::core::{
    point_in_polygon, point_to_segment_distance, ray_segment_intersection, Point, RayHit,
};
use crate::zones::Zone;

use super::types::{ExtendedAisle, ExtensionTarget, ExtensionTargetKind};

/// The two endpoint midpoints of an aisle ribbon and its axis direction.
#[derive(Clone, Copy, Debug)]
struct AisleAxis {
    start: Point,
    end: Point,
    /// Unit vector pointing start -> end.
    direction: Point,
}

/// Extends aisle polygons until they reach a travelable boundary.
#[derive(Clone, Debug, Default)]
pub struct AisleExtensionEngine {
    settings: ExtensionSettings,
}

impl AisleExtensionEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: ExtensionSettings) -> Self {
        Self { settings }
    }

    /// Extend every aisle toward the given coverage areas and the other
    /// aisles, independently and in input order.
    ///
    /// Extending one aisle never re-triggers extension of another within
    /// the pass, so when two aisles could each serve as the other's
    /// target the result depends on the fixed input order. That
    /// single-pass greedy behavior is intentional and must stay
    /// deterministic.
    pub fn extend_all_aisles(&self, aisles: &[Zone], coverage: &[Zone]) -> Vec<ExtendedAisle> {
        aisles
            .iter()
            .enumerate()
            .map(|(i, aisle)| {
                let others: Vec<&Zone> = aisles
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, z)| z)
                    .collect();
                self.extend_aisle(aisle, coverage, &others)
            })
            .collect()
    }

    /// Extend aisles toward the travel lanes of a merged zone set.
    ///
    /// Convenience wrapper that picks the travelable non-aisle zones out
    /// of `zones` as coverage targets.
    pub fn extend_aisles_to_travel_lanes(
        &self,
        aisles: &[Zone],
        zones: &[Zone],
    ) -> Vec<ExtendedAisle> {
        let lanes: Vec<Zone> = zones
            .iter()
            .filter(|z| z.is_travelable() && z.zone_type != crate::zones::ZoneType::AislePath)
            .cloned()
            .collect();
        self.extend_all_aisles(aisles, &lanes)
    }

    /// Extend a single aisle: find a target per endpoint, then translate
    /// the affected corner vertices.
    pub fn extend_aisle(
        &self,
        aisle: &Zone,
        coverage: &[Zone],
        other_aisles: &[&Zone],
    ) -> ExtendedAisle {
        let Some(axis) = aisle_axis(aisle) else {
            // Extension is undefined for degenerate aisles.
            return ExtendedAisle {
                zone: aisle.clone(),
                start_extension: None,
                end_extension: None,
            };
        };

        let start_target = self.find_extension_target(
            aisle,
            axis.start,
            axis.direction * -1.0,
            coverage,
            other_aisles,
        );
        let end_target =
            self.find_extension_target(aisle, axis.end, axis.direction, coverage, other_aisles);

        let zone = self.extend_aisle_to_targets(aisle, start_target.as_ref(), end_target.as_ref());

        ExtendedAisle {
            zone,
            start_extension: start_target,
            end_extension: end_target,
        }
    }

    /// Raycast one endpoint along its outward direction and pick the
    /// nearest valid target, or `None` when the endpoint is already
    /// inside a coverage polygon or nothing is hit.
    pub fn find_extension_target(
        &self,
        aisle: &Zone,
        endpoint: Point,
        outward: Point,
        coverage: &[Zone],
        other_aisles: &[&Zone],
    ) -> Option<ExtensionTarget> {
        // Already connected: no extension needed.
        if coverage
            .iter()
            .any(|c| !c.is_degenerate() && point_in_polygon(endpoint, &c.polygon))
        {
            trace!(
                "[Extension] aisle '{}' endpoint already inside coverage, skipping",
                aisle.id
            );
            return None;
        }

        let eps = self.settings.self_hit_epsilon;
        let mut best: Option<ExtensionTarget> = None;

        // Coverage boundaries first: on an exact distance tie the
        // earlier-tested target wins. Hits under epsilon are seam
        // contacts, not real targets; the next edge along the ray still
        // counts.
        for zone in coverage {
            if zone.is_degenerate() {
                continue;
            }
            if let Some(hit) = nearest_ray_hit(endpoint, outward, &zone.polygon, eps) {
                if best.as_ref().map_or(true, |b| hit.distance < b.distance) {
                    best = Some(ExtensionTarget {
                        kind: ExtensionTargetKind::TwoDBoundary,
                        intersection: hit.point,
                        target_id: zone.id.clone(),
                        distance: hit.distance,
                    });
                }
            }
        }
        for zone in other_aisles {
            if zone.is_degenerate() {
                continue;
            }
            if let Some(hit) = nearest_ray_hit(endpoint, outward, &zone.polygon, eps) {
                if best.as_ref().map_or(true, |b| hit.distance < b.distance) {
                    best = Some(ExtensionTarget {
                        kind: ExtensionTargetKind::Aisle,
                        intersection: hit.point,
                        target_id: zone.id.clone(),
                        distance: hit.distance,
                    });
                }
            }
        }

        let mut target = best?;

        // A shallow-angle ray can first reach a far boundary while a
        // different coverage polygon sits much closer by edge distance.
        // Clamp to the nearer polygon instead of stabbing through it.
        let nearest_coverage = nearest_coverage_by_edge(endpoint, coverage, eps);
        if let Some((nearest_id, nearest_distance)) = &nearest_coverage {
            if *nearest_id != target.target_id && target.distance > *nearest_distance {
                debug!(
                    "[Extension] aisle '{}': clamping ray hit {:.1}px on '{}' to nearer coverage '{}' at {:.1}px",
                    aisle.id, target.distance, target.target_id, nearest_id, nearest_distance
                );
                target = ExtensionTarget {
                    kind: ExtensionTargetKind::TwoDBoundary,
                    intersection: endpoint + outward * *nearest_distance,
                    target_id: nearest_id.clone(),
                    distance: *nearest_distance,
                };
            }
        }

        // Bound pathological stretches regardless of the ray result.
        let cap = match &nearest_coverage {
            Some((_, d)) => self
                .settings
                .base_cap
                .max(d + self.settings.coverage_cap_slack),
            None => self.settings.base_cap,
        };
        if target.distance > cap {
            debug!(
                "[Extension] aisle '{}': capping extension {:.1}px to {:.1}px",
                aisle.id, target.distance, cap
            );
            target.distance = cap;
            target.intersection = endpoint + outward * cap;
        }

        Some(target)
    }

    /// Translate the corner vertices at each targeted end of the aisle
    /// along the extension direction.
    ///
    /// Corners are located via the ribbon invariant: start corners at
    /// indices `0` and `n-1`, end corners at `half_n - 1` and `half_n`.
    /// Overhang is added only for coverage-boundary targets so the aisle
    /// edge lands at (or slightly past) the boundary, never short of it.
    /// Zones with fewer than 4 vertices are returned unmodified.
    pub fn extend_aisle_to_targets(
        &self,
        aisle: &Zone,
        start_target: Option<&ExtensionTarget>,
        end_target: Option<&ExtensionTarget>,
    ) -> Zone {
        let mut zone = aisle.clone();
        let n = zone.polygon.len();
        if n < 4 {
            return zone;
        }
        let Some(axis) = aisle_axis(aisle) else {
            return zone;
        };
        let half_n = n / 2;

        if let Some(target) = start_target {
            let delta = (target.distance + self.overhang(target)) * -1.0;
            let shift = axis.direction * delta;
            zone.polygon[0] = zone.polygon[0] + shift;
            zone.polygon[n - 1] = zone.polygon[n - 1] + shift;
            zone.metadata
                .custom
                .insert("start_extension_target".to_string(), target.target_id.clone());
        }
        if let Some(target) = end_target {
            let delta = target.distance + self.overhang(target);
            let shift = axis.direction * delta;
            zone.polygon[half_n - 1] = zone.polygon[half_n - 1] + shift;
            zone.polygon[half_n] = zone.polygon[half_n] + shift;
            zone.metadata
                .custom
                .insert("end_extension_target".to_string(), target.target_id.clone());
        }

        zone
    }

    fn overhang(&self, target: &ExtensionTarget) -> f32 {
        match target.kind {
            ExtensionTargetKind::TwoDBoundary => self.settings.boundary_overhang,
            ExtensionTargetKind::Aisle => 0.0,
        }
    }
}

/// Endpoint midpoints and axis of a ribbon polygon, via the structural
/// invariant. `None` for polygons too small to carry the invariant or
/// with coincident endpoints.
fn aisle_axis(aisle: &Zone) -> Option<AisleAxis> {
    let polygon = &aisle.polygon;
    let n = polygon.len();
    if n < 4 {
        return None;
    }
    let half_n = n / 2;

    let start = polygon[0].midpoint(&polygon[n - 1]);
    let end = polygon[half_n - 1].midpoint(&polygon[half_n]);
    let direction = (end - start).normalized();
    if direction.length() == 0.0 {
        return None;
    }

    Some(AisleAxis {
        start,
        end,
        direction,
    })
}

/// Nearest ray-edge hit beyond `eps`, over every edge of a polygon.
fn nearest_ray_hit(origin: Point, direction: Point, polygon: &[Point], eps: f32) -> Option<RayHit> {
    let n = polygon.len();
    let mut closest: Option<f32> = None;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if let Some(t) = ray_segment_intersection(origin, direction, a, b) {
            if t > eps && closest.map_or(true, |c| t < c) {
                closest = Some(t);
            }
        }
    }
    closest.map(|t| RayHit {
        point: origin + direction * t,
        distance: t,
    })
}

/// Nearest coverage polygon by straight-line edge distance, ignoring
/// polygons closer than `eps` (the endpoint sits on their seam).
fn nearest_coverage_by_edge(point: Point, coverage: &[Zone], eps: f32) -> Option<(String, f32)> {
    let mut best: Option<(String, f32)> = None;
    for zone in coverage {
        if zone.is_degenerate() {
            continue;
        }
        let n = zone.polygon.len();
        for i in 0..n {
            let a = zone.polygon[i];
            let b = zone.polygon[(i + 1) % n];
            let d = point_to_segment_distance(point, a, b).distance;
            if d > eps && best.as_ref().map_or(true, |(_, bd)| d < *bd) {
                best = Some((zone.id.clone(), d));
            }
        }
    }
    best
}
