//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for machine setup,
//! parameter validation and toolpath generation.

use hotwire_core::ProfileError;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Invalid parameters were provided to the machine.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// G-code generation failed.
    #[error("G-code generation failed: {0}")]
    GenerationFailed(String),

    /// A profile operation failed during toolpath creation.
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to machine parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cam_tool_error_display() {
        let err = CamToolError::InvalidParameters("profile_points must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameters: profile_points must be positive"
        );

        let err = CamToolError::GenerationFailed("empty toolpath".to_string());
        assert_eq!(err.to_string(), "G-code generation failed: empty toolpath");
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "foam_height".to_string(),
            value: -5.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'foam_height' out of range: -5 (valid: 0..100)"
        );

        let err = ParameterError::InvalidDimensions("panel width is zero".to_string());
        assert_eq!(err.to_string(), "Invalid dimensions: panel width is zero");
    }

    #[test]
    fn test_error_conversion() {
        let err: CamToolError = ProfileError::insufficient("top contour", 1, 2).into();
        assert!(matches!(err, CamToolError::Profile(_)));

        let err: CamToolError = ParameterError::InvalidValue {
            name: "kerf".to_string(),
            reason: "not finite".to_string(),
        }
        .into();
        assert!(matches!(err, CamToolError::Parameter(_)));
    }
}
