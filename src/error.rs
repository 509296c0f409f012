//! Error types for aislenav.

use thiserror::Error;

/// Crate-level error type.
///
/// Expected per-record failures (a chain referencing a missing anchor, a
/// degenerate polygon) are reported with these variants and the batch
/// continues; they are collected by callers, never silently dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error("Chain references unknown anchor '{0}'")]
    UnknownAnchor(String),

    #[error("Chain '{0}' has fewer than 2 distinct anchors")]
    DegenerateChain(String),

    #[error("Zone '{0}' has fewer than 3 vertices")]
    DegeneratePolygon(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, NavError>;
