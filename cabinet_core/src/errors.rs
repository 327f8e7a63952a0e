//! # Error Types
//!
//! Structured error types for cabinet_core. Every failure is a configuration
//! or input problem, so nothing here is retried: the front end shows the
//! message to the user and asks for different inputs.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::errors::{CabError, CabResult, ErrorKind};
//!
//! fn validate_height(height: f64) -> CabResult<()> {
//!     if height <= 0.0 {
//!         return Err(CabError::invalid_input(
//!             "height",
//!             height.to_string(),
//!             "Height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_height(-1.0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Configuration);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cabinet_core operations
pub type CabResult<T> = Result<T, CabError>;

/// Broad classification of a [`CabError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Bad material name, fillers string, thickness or dimension
    Configuration,
    /// The wall cannot be partitioned into cabinets and in-range fillers
    Geometry,
    /// A measurement cannot be rendered in shop notation
    Format,
    /// Broken internal contract
    Internal,
}

/// Structured error type for sizing and formatting operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CabError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A fillers string is not one of NEITHER, LEFT, RIGHT or BOTH
    #[error("Invalid fillers value '{value}': expected one of NEITHER, LEFT, RIGHT, BOTH")]
    InvalidEnds { value: String },

    /// Combined bottom thickness outside the supported stock band
    #[error("bottom thickness is not between 1/2\" and 2\" (got {value})")]
    BottomThicknessOutOfRange { value: f64 },

    /// No cabinet width keeps every filler within the allowed range
    #[error(
        "No cabinet width fits {fullwidth}\" with {num_cabinets} cabinet(s) and {num_fillers} filler(s) between {min_filler}\" and {max_filler}\""
    )]
    NoFillerFit {
        fullwidth: f64,
        num_cabinets: usize,
        num_fillers: usize,
        min_filler: f64,
        max_filler: f64,
    },

    /// Measurement cannot be formatted (negative or not finite)
    #[error("Cannot format measurement {value}: {reason}")]
    InvalidMeasurement { value: f64, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CabError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CabError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CabError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an InvalidEnds error
    pub fn invalid_ends(value: impl Into<String>) -> Self {
        CabError::InvalidEnds {
            value: value.into(),
        }
    }

    /// Create an InvalidMeasurement error
    pub fn invalid_measurement(value: f64, reason: impl Into<String>) -> Self {
        CabError::InvalidMeasurement {
            value,
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CabError::Internal {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CabError::InvalidInput { .. }
            | CabError::MaterialNotFound { .. }
            | CabError::InvalidEnds { .. }
            | CabError::BottomThicknessOutOfRange { .. } => ErrorKind::Configuration,
            CabError::NoFillerFit { .. } => ErrorKind::Geometry,
            CabError::InvalidMeasurement { .. } => ErrorKind::Format,
            CabError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CabError::InvalidInput { .. } => "INVALID_INPUT",
            CabError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CabError::InvalidEnds { .. } => "INVALID_ENDS",
            CabError::BottomThicknessOutOfRange { .. } => "BOTTOM_THICKNESS_OUT_OF_RANGE",
            CabError::NoFillerFit { .. } => "NO_FILLER_FIT",
            CabError::InvalidMeasurement { .. } => "INVALID_MEASUREMENT",
            CabError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CabError::invalid_input("height", "-5", "Height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CabError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CabError::invalid_ends("TOP").error_code(), "INVALID_ENDS");
        assert_eq!(
            CabError::material_not_found("Oak").error_code(),
            "MATERIAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(CabError::invalid_ends("x").kind(), ErrorKind::Configuration);
        assert_eq!(
            CabError::BottomThicknessOutOfRange { value: 2.2 }.kind(),
            ErrorKind::Configuration
        );
        let geometry = CabError::NoFillerFit {
            fullwidth: 1.5,
            num_cabinets: 1,
            num_fillers: 2,
            min_filler: 1.0,
            max_filler: 4.0,
        };
        assert_eq!(geometry.kind(), ErrorKind::Geometry);
        assert_eq!(
            CabError::invalid_measurement(-1.0, "negative").kind(),
            ErrorKind::Format
        );
    }

    #[test]
    fn test_bottom_thickness_message() {
        let err = CabError::BottomThicknessOutOfRange { value: 2.2 };
        assert!(err.to_string().starts_with("bottom thickness is not between 1/2\" and 2\""));
    }
}
