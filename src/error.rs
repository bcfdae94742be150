//! Error taxonomy for decoding, filtering and persisting an image.
//!
//! Every fallible operation in the crate returns [`PipelineError`]. Header
//! problems are refined further by [`HeaderError`] so callers can tell a bad
//! magic tag from an unsupported channel depth.
use std::io;
use std::path::PathBuf;

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Reasons a PPM header is rejected.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("missing {0} field")]
    MissingToken(&'static str),

    #[error("unsupported format tag {0:?}, expected \"P6\"")]
    BadTag(String),

    #[error("{field} is not an integer: {token:?}")]
    NotANumber { field: &'static str, token: String },

    #[error("{field} must be positive, got {value}")]
    NonPositiveDimension { field: &'static str, value: i64 },

    #[error("max value must be 255, got {0}")]
    UnsupportedMaxValue(i64),

    #[error("missing whitespace separator before pixel data")]
    MissingSeparator,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input path could not be opened.
    #[error("failed to open input {}: {source}", .path.display())]
    InputUnavailable { path: PathBuf, source: io::Error },

    #[error("invalid PPM header: {0}")]
    HeaderInvalid(#[from] HeaderError),

    #[error("failed to allocate {bytes} bytes for a {width}x{height} image")]
    AllocationFailed {
        width: usize,
        height: usize,
        bytes: usize,
    },

    #[error("truncated pixel data: expected {expected} bytes, read {actual}")]
    TruncatedPixelData { expected: usize, actual: usize },

    /// An output sink could not be created or written.
    #[error("failed to write {}: {source}", .path.display())]
    OutputUnavailable { path: PathBuf, source: io::Error },

    #[error("failed to read input: {0}")]
    ReadFailed(io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Stable short label used in logs and run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InputUnavailable { .. } => "input-unavailable",
            PipelineError::HeaderInvalid(_) => "header-invalid",
            PipelineError::AllocationFailed { .. } => "allocation-failed",
            PipelineError::TruncatedPixelData { .. } => "truncated-pixel-data",
            PipelineError::OutputUnavailable { .. } => "output-unavailable",
            PipelineError::ReadFailed(_) => "read-failed",
            PipelineError::InvalidConfig(_) => "invalid-config",
        }
    }
}
