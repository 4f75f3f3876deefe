//! Error types for Retouch.
//!
//! Uses thiserror for structured errors with context. Errors are designed to:
//! - Name the operation that failed and the offending coordinate or dimension
//! - Be serializable so a shell can forward them as-is
//! - Classify into a small set of kinds a shell can branch on

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a filter session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Top-level error type for Retouch.
///
/// Encompasses every error category and converts from each of them.
#[derive(Error, Debug)]
pub enum RetouchError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by pixel buffers, kernel ops and the filter session.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterError {
    #[error("{operation}: invalid input: {reason}")]
    InvalidInput { operation: String, reason: String },

    #[error("{operation}: pixel ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfRange {
        operation: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("{operation}: no image is loaded")]
    IllegalState { operation: String },
}

/// Errors from the image codec boundary.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported export format: '{extension}'")]
    UnsupportedFormat { extension: String },
}

/// Errors while loading session options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Failure classification a shell can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    OutOfRange,
    IllegalState,
    Decode,
    Encode,
    Config,
}

// ============================================================================
// Error Utilities
// ============================================================================

impl FilterError {
    /// Build an `InvalidInput` error.
    pub fn invalid_input(operation: &str, reason: impl Into<String>) -> Self {
        FilterError::InvalidInput {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// Build an `IllegalState` error.
    pub fn illegal_state(operation: &str) -> Self {
        FilterError::IllegalState {
            operation: operation.to_string(),
        }
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &str {
        match self {
            FilterError::InvalidInput { operation, .. }
            | FilterError::OutOfRange { operation, .. }
            | FilterError::IllegalState { operation } => operation,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::InvalidInput { .. } => ErrorKind::InvalidInput,
            FilterError::OutOfRange { .. } => ErrorKind::OutOfRange,
            FilterError::IllegalState { .. } => ErrorKind::IllegalState,
        }
    }

    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            FilterError::IllegalState { .. } => Some("Open an image first".to_string()),
            FilterError::OutOfRange { width, height, .. } => Some(format!(
                "Use coordinates below {}x{}",
                width, height
            )),
            FilterError::InvalidInput { .. } => None,
        }
    }
}

impl CodecError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Decode { .. } => ErrorKind::Decode,
            CodecError::Encode { .. } | CodecError::UnsupportedFormat { .. } => ErrorKind::Encode,
        }
    }
}

impl RetouchError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RetouchError::Filter(e) => e.kind(),
            RetouchError::Codec(e) => e.kind(),
            RetouchError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for Retouch operations.
pub type RetouchResult<T> = Result<T, RetouchError>;

/// Result type alias for buffer, filter and session operations.
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new();
        assert_eq!(format!("{}", id).len(), 8);
    }

    #[test]
    fn test_filter_error_message_names_operation() {
        let error = FilterError::OutOfRange {
            operation: "get_pixel".to_string(),
            x: 4,
            y: 1,
            width: 2,
            height: 2,
        };
        assert_eq!(
            error.to_string(),
            "get_pixel: pixel (4, 1) is outside a 2x2 buffer"
        );
        assert_eq!(error.operation(), "get_pixel");
        assert_eq!(error.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_kind_survives_top_level_conversion() {
        let error: RetouchError = FilterError::illegal_state("reset").into();
        assert_eq!(error.kind(), ErrorKind::IllegalState);
        assert!(error.to_string().contains("no image is loaded"));

        let error: RetouchError = CodecError::UnsupportedFormat {
            extension: "xyz".to_string(),
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::Encode);
    }

    #[test]
    fn test_suggestions() {
        assert!(FilterError::illegal_state("apply_filter")
            .suggested_fix()
            .is_some());
        assert!(FilterError::invalid_input("blur", "empty")
            .suggested_fix()
            .is_none());
    }

    #[test]
    fn test_filter_error_serializes() {
        let error = FilterError::invalid_input("grayscale", "buffer is 0x3");
        let json = serde_json::to_string(&error).unwrap();
        let back: FilterError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, error);
    }
}
