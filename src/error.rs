//! Error types for seismap.
//!
//! Precondition failures (`Schema`, `Shape`, `MissingInput`) are raised before
//! any rendering starts. Failures coming out of a render backend are passed
//! through unchanged.

use thiserror::Error;

/// The main error type for seismap operations.
#[derive(Error, Debug)]
pub enum SeismapError {
    /// Required columns are missing from tabular input, or a required cell
    /// is not numeric
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// A coordinate pair does not have exactly two numeric components
    #[error("Shape error: {message}")]
    Shape { message: String },

    /// A referenced input does not exist
    #[error("Missing input: {message}")]
    MissingInput { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Render backend errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Image encoding/decoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeismapError {
    /// True for errors raised by input validation, before any render call.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SeismapError::Schema { .. }
                | SeismapError::Shape { .. }
                | SeismapError::MissingInput { .. }
        )
    }
}

/// Convenience type alias for Results with SeismapError
pub type Result<T> = std::result::Result<T, SeismapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        let schema = SeismapError::Schema {
            message: "missing stlo".to_string(),
        };
        let render = SeismapError::Render {
            message: "canvas gone".to_string(),
        };
        assert!(schema.is_precondition());
        assert!(!render.is_precondition());
        assert_eq!(schema.to_string(), "Schema error: missing stlo");
    }
}
