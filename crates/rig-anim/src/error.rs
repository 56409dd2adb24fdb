//! Error types for skeleton loading, pose tracks and export

use std::path::PathBuf;

use rig_format::FormatError;
use thiserror::Error;

/// Errors raised while loading or preparing animation data.
///
/// Pose evaluation itself never fails; every error here is produced at
/// load time or at the export boundary.
#[derive(Debug, Error)]
pub enum AnimError {
    /// Decoding error from the asset codec
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Decoding error tied to a file on disk
    #[error("{}: {source}", path.display())]
    File {
        /// File being decoded
        path: PathBuf,
        /// Underlying codec error
        source: FormatError,
    },

    /// Data that decoded cleanly but does not fit together
    #[error("Malformed asset: {0}")]
    MalformedAsset(String),

    /// A keyframe index past the end of the track
    #[error("Keyframe {frame} out of range: track has {frame_count} keyframes")]
    OutOfRangeFrame {
        /// Requested keyframe index
        frame: usize,
        /// Number of keyframes in the track
        frame_count: usize,
    },

    /// More bones than the uniform arrays can hold
    #[error("Skeleton has {bone_count} bones, uniform capacity is {capacity}")]
    BoneCapacityExceeded {
        /// Bones in the evaluated skeleton
        bone_count: usize,
        /// Slots available in the uniform arrays
        capacity: usize,
    },
}

impl AnimError {
    /// Returns true if this error describes a malformed asset, at any layer
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::MalformedAsset(_) => true,
            Self::Format(err) | Self::File { source: err, .. } => err.is_malformed(),
            _ => false,
        }
    }
}

/// Result type using [`AnimError`]
pub type Result<T> = std::result::Result<T, AnimError>;
