//! # aislenav: warehouse floorplan navigation
//!
//! Turns independently generated polygonal warehouse zones (manually
//! drawn, AI-detected, or derived from anchor-timing measurements)
//! into a connected waypoint graph and finds shortest travelable routes
//! over it, honoring the aisle traversal rule: a one-dimensional aisle
//! is entered and exited only at its endpoints.
//!
//! ## Pipeline
//!
//! ```text
//! anchors + pairs + coverage
//!        |
//!   chain builder      join 1D pairs sharing anchors into corridors
//!        |
//!   extension engine   stretch aisle endpoints to travelable boundaries
//!        |
//!   zone merger        one deduplicated zone set
//!        |
//!   graph builder      waypoint nodes + line-of-sight edges
//!        |
//!   route planner      constrained A* with per-segment distances
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use aislenav::{NavPipeline, ZoneGenerationOptions};
//! use aislenav::anchors::{AnchorMap, ScaleTransform};
//! use aislenav::core::Point;
//!
//! let pipeline = NavPipeline::default();
//! let transform = ScaleTransform::identity();
//! let result = pipeline.generate_programmatic_zones(
//!     &AnchorMap::new(),
//!     &[],
//!     &[],
//!     &transform,
//!     ZoneGenerationOptions::default(),
//! );
//! assert!(result.zones.is_empty());
//!
//! let route = pipeline.calculate_route(&result.zones, Point::ZERO, Point::new(10.0, 0.0));
//! assert!(!route.success); // no travelable zones yet
//! ```
//!
//! ## Coordinate frame
//!
//! A single static 2D pixel frame shared by the floorplan image, all
//! zone vertices, and route output. Millimeter inputs cross into pixels
//! exactly once, at the [`anchors::FloorplanTransform`] boundary.
//!
//! All computation is synchronous, single-threaded, and deterministic:
//! identical inputs always produce identical chains, zones, graphs, and
//! routes.

pub mod anchors;
pub mod chains;
pub mod config;
pub mod core;
pub mod error;
pub mod extension;
pub mod graph;
pub mod pathfinding;
mod pipeline;
pub mod zones;

pub use config::NavConfig;
pub use error::{NavError, Result};
pub use pipeline::{NavPipeline, ZoneGenerationOptions, ZoneGenerationResult};
