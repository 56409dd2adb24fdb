//! Reader and writer for skinned character asset files.
//!
//! Three fixed little-endian layouts are supported:
//!
//! - **Mesh** (`human.bin`): vertex and index arrays with two bone
//!   influences per vertex
//! - **Skeleton** (`bones.bin`): count-prefixed bone records in
//!   parent-before-child order
//! - **Pose** (`pose_N.bin`): one local pose per bone, count supplied by
//!   the skeleton
//!
//! Decoding is strict. Short reads, count mismatches, trailing bytes and
//! hierarchy-order violations are all reported as
//! [`FormatError::MalformedAsset`].
//!
//! # Examples
//!
//! ```
//! use glam::{Quat, Vec3};
//! use rig_format::{BoneRecord, SkeletonFile};
//!
//! let skeleton = SkeletonFile {
//!     bones: vec![
//!         BoneRecord::root(Vec3::ZERO, Quat::IDENTITY),
//!         BoneRecord::child(0, Vec3::Y, Quat::IDENTITY),
//!     ],
//! };
//!
//! let bytes = skeleton.to_bytes()?;
//! let decoded = SkeletonFile::from_bytes(&bytes)?;
//! assert_eq!(decoded, skeleton);
//! # Ok::<(), rig_format::FormatError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod mesh;
pub mod pose;
pub mod skeleton;
pub mod types;
pub mod validation;

pub use error::{FormatError, Result};
pub use mesh::{BoundingBox, MeshFile, Vertex};
pub use pose::{PoseFile, PoseRecord};
pub use skeleton::{BoneRecord, ROOT_PARENT, SkeletonFile};
pub use types::RigRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
