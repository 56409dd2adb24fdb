//! Skeletal pose evaluation for skinned characters.
//!
//! A [`Skeleton`] is an immutable bone hierarchy stored parents first. A
//! [`PoseTrack`] is a cyclic list of keyframes, each giving every bone a
//! local [`Pose`]. Once per rendered frame, [`evaluate`] turns the track
//! and the animation time into one world [`Pose`] per bone:
//!
//! - the current keyframe is `floor(time) mod N`, the next one follows it
//!   cyclically, and the two are mixed by `smoothstep(fract(time))`
//! - each child composes its two candidate local poses onto the parent's
//!   already-final world pose, then blends the results
//! - roots take the current keyframe as is (see [`RootBlend`])
//!
//! [`TransformExporter`] flattens the result into fixed-size arrays for a
//! skinning shader.
//!
//! # Examples
//!
//! ```
//! use glam::{Quat, Vec3};
//! use rig_anim::{Bone, Pose, PoseSet, PoseTrack, Skeleton, evaluate};
//!
//! let skeleton = Skeleton::from_bones(vec![
//!     Bone { parent: None, bind_offset: Vec3::ZERO, bind_rotation: Quat::IDENTITY },
//!     Bone { parent: Some(0), bind_offset: Vec3::Y, bind_rotation: Quat::IDENTITY },
//! ])?;
//!
//! let rest = PoseSet::from_poses(vec![Pose::IDENTITY, Pose::from_translation(Vec3::Y)]);
//! let raised = PoseSet::from_poses(vec![Pose::IDENTITY, Pose::from_translation(Vec3::Z)]);
//! let track = PoseTrack::new(vec![rest, raised], 2)?;
//!
//! let world = evaluate(&skeleton, &track, 0.5);
//! assert!(world[1].translation.abs_diff_eq(Vec3::new(0.0, 0.5, 0.5), 1e-6));
//! # Ok::<(), rig_anim::AnimError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod assets;
pub mod composer;
pub mod error;
pub mod export;
pub mod pose;
pub mod sampling;
pub mod skeleton;
pub mod skinning;
pub mod track;
pub mod world;

pub use assets::{AssetLayout, RigAssets};
pub use composer::{PoseComposer, Rig, RootBlend, evaluate};
pub use error::{AnimError, Result};
pub use export::{CapacityPolicy, MAX_BONES, TransformExporter, UniformArrays};
pub use pose::Pose;
pub use sampling::{AnimationClock, KeyframeSample, smoothstep};
pub use skeleton::{Bone, Skeleton};
pub use skinning::{SkinnedVertex, skin_mesh, skin_normal, skin_position};
pub use track::{DEFAULT_KEYFRAME_COUNT, PoseSet, PoseTrack};
pub use world::WorldPoses;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
