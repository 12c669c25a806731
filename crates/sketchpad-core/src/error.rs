//! Error types for the core crate.

use thiserror::Error;

/// Errors raised by the drawing session.
///
/// Everything else in the core is total: undo/redo on empty stacks,
/// hit-testing an empty scene and clearing an empty scene are no-ops.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    /// Coordinate capture was invoked before the host attached the drawing surface.
    #[error("Drawing surface is not attached")]
    SurfaceNotAttached,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Result type for session operations.
pub type SketchResult<T> = Result<T, SketchError>;
