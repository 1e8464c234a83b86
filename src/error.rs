//! Error types for hyperspectral cube operations

use crate::types::Axis;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cube operations
#[derive(Error, Debug)]
pub enum HsiError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Header indirection cycle: {} was already visited", .0.display())]
    HeaderCycle(PathBuf),

    #[error("Unsupported/unknown interleave format: {0}")]
    UnknownInterleave(String),

    #[error("Unsupported/unknown data type: {0}")]
    UnknownDataType(String),

    #[error("Invalid {axis} range {start}..{end}: must lie within 0..{bound}")]
    Range {
        axis: Axis,
        start: i64,
        end: i64,
        bound: usize,
    },

    #[error("{axis} range {start}..{end} must be positive")]
    NonPositiveSpan { axis: Axis, start: i64, end: i64 },

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Data size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("{axis} index out of range: {index} must be between 0 and {bound}")]
    OutOfBounds {
        axis: Axis,
        index: usize,
        bound: usize,
    },
}

impl HsiError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HsiError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Specialized Result type for cube operations
pub type Result<T> = std::result::Result<T, HsiError>;
