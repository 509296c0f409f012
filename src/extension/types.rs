//! Aisle extension types.

use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::zones::Zone;

/// What an aisle endpoint was extended toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionTargetKind {
    /// Boundary of a 2D coverage/travel-lane polygon.
    TwoDBoundary,
    /// Edge of another aisle's polygon.
    Aisle,
}

/// The nearest valid raycast hit for one aisle endpoint.
///
/// At most one target exists per endpoint; an endpoint that already
/// touches a travelable area, or whose ray hits nothing, has none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtensionTarget {
    /// What the ray hit.
    pub kind: ExtensionTargetKind,
    /// Intersection point on the target boundary (pixels).
    pub intersection: Point,
    /// Id of the zone that was hit.
    pub target_id: String,
    /// Distance from the endpoint to the hit (pixels).
    pub distance: f32,
}

/// An aisle after endpoint extension, with a record of what each end
/// connected to (`None` when already connected or unreachable).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtendedAisle {
    /// The aisle zone, with the affected corner vertices translated.
    pub zone: Zone,
    /// Target the start endpoint was extended to.
    pub start_extension: Option<ExtensionTarget>,
    /// Target the end endpoint was extended to.
    pub end_extension: Option<ExtensionTarget>,
}
