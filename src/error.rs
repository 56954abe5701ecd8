//! Error types for Anthroscope
//!
//! This module provides structured error handling using thiserror. Every
//! fetch and decode failure becomes a typed error that the status line can
//! render without leaking low-level detail into the UI layer.

use thiserror::Error;

/// Main error type for Anthroscope operations
#[derive(Error, Debug)]
pub enum AnthroError {
    /// HTTP transport or status error from the data API
    #[error("API request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// I/O error while reading a response body
    #[error("Failed to read API response: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("Malformed API response: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars error from the row store
    #[error("Row store error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Column not present in the fetched rows
    #[error("Column '{column}' not found in fetched rows")]
    ColumnNotFound { column: String },

    /// Response was structurally valid but unusable
    #[error("Could not decode API response: {0}")]
    Decode(String),
}

impl From<ureq::Error> for AnthroError {
    fn from(err: ureq::Error) -> Self {
        AnthroError::Http(Box::new(err))
    }
}

/// Result type alias for Anthroscope operations
pub type Result<T> = std::result::Result<T, AnthroError>;

/// UI-friendly error message formatting
impl AnthroError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            AnthroError::Http(e) => format!("Network error: {}", e),
            AnthroError::Io(e) => format!("Response error: {}", e),
            AnthroError::Json(e) => format!("Bad response: {}", e),
            AnthroError::Polars(e) => format!("Data error: {}", e),
            AnthroError::ColumnNotFound { column } => {
                format!("Column '{}' missing from data", column)
            }
            AnthroError::Decode(msg) => format!("Bad response: {}", msg),
        }
    }

    /// Get a short title for the error (for the status line)
    pub fn title(&self) -> &'static str {
        match self {
            AnthroError::Http(_) => "Network Error",
            AnthroError::Io(_) => "Response Error",
            AnthroError::Json(_) => "Bad Response",
            AnthroError::Polars(_) => "Data Error",
            AnthroError::ColumnNotFound { .. } => "Column Not Found",
            AnthroError::Decode(_) => "Bad Response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnthroError::ColumnNotFound {
            column: "STATURE".to_string(),
        };
        assert_eq!(err.user_message(), "Column 'STATURE' missing from data");
        assert_eq!(err.title(), "Column Not Found");

        let err = AnthroError::Decode("empty header map".to_string());
        assert_eq!(err.user_message(), "Bad response: empty header map");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated body");
        let err: AnthroError = io_err.into();
        assert!(matches!(err, AnthroError::Io(_)));
    }
}
