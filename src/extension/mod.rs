//! Aisle extension: stretching aisle endpoints to the nearest
//! travelable boundary so the navigation graph connects.

mod engine;
mod types;

pub use engine::AisleExtensionEngine;
pub use types::{ExtendedAisle, ExtensionTarget, ExtensionTargetKind};
