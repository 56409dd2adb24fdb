//! Error handling for rig asset decoding

use std::io;
use thiserror::Error;

/// Errors that can occur when reading or writing rig asset files
#[derive(Debug, Error)]
pub enum FormatError {
    /// An I/O error other than a short read occurred
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// The asset is truncated, has a count mismatch, or violates a
    /// structural invariant such as parent-before-child ordering
    #[error("Malformed asset: {0}")]
    MalformedAsset(String),
}

impl FormatError {
    /// Shorthand for building a [`FormatError::MalformedAsset`]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedAsset(reason.into())
    }

    /// Returns true if this error describes a malformed asset
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedAsset(_))
    }
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        // A short read is a truncated file, not an environment failure
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::MalformedAsset(format!("truncated stream: {err}"))
        } else {
            Self::Io(err)
        }
    }
}

/// Type alias for Results from rig asset operations
pub type Result<T> = std::result::Result<T, FormatError>;
