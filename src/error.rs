//! Error types for the harmony_match library

use thiserror::Error;

/// Result type alias for harmony_match operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error types for matching and configuration operations
///
/// Malformed color codes are deliberately absent: a color that cannot be
/// parsed is skipped by the engine and never aborts a run.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Source image dimensions cannot produce a finite scale factor
    #[error("Invalid source image dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// Preview area is too small to hold a marker inside its margins
    #[error("Invalid preview size: {width}x{height} (minimum {minimum} per axis)")]
    InvalidPreviewSize {
        width: f64,
        height: f64,
        minimum: f64,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// JSON decoding or encoding failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a file failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl MatchError {
    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error was caused by caller-supplied configuration
    /// rather than by reading external data
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidDimensions { .. }
                | MatchError::InvalidPreviewSize { .. }
                | MatchError::InvalidParameter { .. }
        )
    }
}
