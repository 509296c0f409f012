//! Anchor, measurement, and coordinate-transform input boundary.

mod transform;
mod types;

pub use transform::{FloorplanTransform, ScaleTransform};
pub use types::{AnchorMap, CoveragePolygon, PairDimension, TdoaPair};
