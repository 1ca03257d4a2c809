//! Error handling for Hotwire
//!
//! Profile errors cover construction, loading, parsing and fetching of
//! airfoil data.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Profile error type
///
/// Represents every fatal condition met while building an airfoil profile.
/// Each variant is a distinct kind so callers can render a precise diagnostic.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The arguments given to a profile constructor are unusable
    #[error("Invalid profile arguments: {reason}")]
    InvalidArguments {
        /// Why the arguments were rejected.
        reason: String,
    },

    /// Not enough points to build a contour
    #[error("Insufficient points for {context}: found {found}, need at least {required}")]
    InsufficientPoints {
        /// What was being built when the check failed.
        context: String,
        /// Number of points available.
        found: usize,
        /// Minimum number of points required.
        required: usize,
    },

    /// Airfoil data was read but could not be turned into coordinates
    #[error("Failed to parse airfoil data from {origin}: {reason}")]
    Parse {
        /// File path or URL the data came from.
        origin: String,
        /// The reason parsing failed.
        reason: String,
    },

    /// The airfoil file could not be read
    #[error("Failed to read airfoil file {}: {source}", .path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Fetching an airfoil over the network failed
    #[error("Failed to fetch airfoil from {url}: {reason}")]
    Network {
        /// URL that was requested.
        url: String,
        /// The reason the request failed.
        reason: String,
    },
}

impl ProfileError {
    /// Shorthand for an [`ProfileError::InsufficientPoints`] error.
    pub fn insufficient(context: impl Into<String>, found: usize, required: usize) -> Self {
        ProfileError::InsufficientPoints {
            context: context.into(),
            found,
            required,
        }
    }

    /// Check if this error came from loading data (file, parse or network)
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ProfileError::Parse { .. } | ProfileError::Io { .. } | ProfileError::Network { .. }
        )
    }
}

/// Result type alias for profile operations.
pub type ProfileResult<T> = std::result::Result<T, ProfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_error_display() {
        let err = ProfileError::insufficient("bottom contour", 1, 2);
        assert_eq!(
            err.to_string(),
            "Insufficient points for bottom contour: found 1, need at least 2"
        );

        let err = ProfileError::InvalidArguments {
            reason: "empty location".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid profile arguments: empty location");

        let err = ProfileError::Network {
            url: "https://example.com/naca.dat".to_string(),
            reason: "timed out".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch airfoil from https://example.com/naca.dat: timed out"
        );
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = ProfileError::Io {
            path: PathBuf::from("missing.dat"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.dat"));
        assert!(err.is_load_error());
    }
}
