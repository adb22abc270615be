//! Error types for naksha

use std::path::{Path, PathBuf};

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Map conversion errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File could not be read, written, or renamed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Unrecognized magic bytes, malformed header, or unsupported pixel depth
    #[error("Unsupported raster: {0}")]
    Format(String),

    /// Declared dimensions need more samples than the file holds
    #[error("Truncated raster: header declares {expected} samples, found {actual}")]
    TruncatedData {
        /// Samples required by width x height x channels
        expected: usize,
        /// Samples actually present
        actual: usize,
    },

    /// Parameter outside its valid range
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Offending field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Descriptor text is not valid YAML or has wrongly typed fields
    #[error("Malformed map descriptor: {0}")]
    Descriptor(String),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}
