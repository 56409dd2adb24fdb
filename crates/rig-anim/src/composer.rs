//! Per-frame world pose evaluation
//!
//! Walks the skeleton once in hierarchy order. Every bone's local pose is
//! composed onto its parent's world pose, which is already final because
//! parents always come before their children.

use log::trace;

use crate::error::{AnimError, Result};
use crate::pose::Pose;
use crate::sampling::KeyframeSample;
use crate::skeleton::Skeleton;
use crate::track::PoseTrack;
use crate::world::WorldPoses;

/// How root bones move between keyframes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum RootBlend {
    /// Roots hold the current keyframe's pose for the whole interval and
    /// jump at keyframe boundaries. Children are still blended.
    #[default]
    Snap,
    /// Roots blend towards the next keyframe like every other bone
    Blend,
}

/// Evaluates world poses from a skeleton and a keyframe track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoseComposer {
    root_blend: RootBlend,
}

impl PoseComposer {
    /// Composer with the default [`RootBlend::Snap`] behavior
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how root bones are treated
    pub fn with_root_blend(mut self, root_blend: RootBlend) -> Self {
        self.root_blend = root_blend;
        self
    }

    /// Current root bone behavior
    pub fn root_blend(&self) -> RootBlend {
        self.root_blend
    }

    /// Evaluate all world poses at `time`
    pub fn evaluate(&self, skeleton: &Skeleton, track: &PoseTrack, time: f32) -> WorldPoses {
        let mut world = WorldPoses::with_capacity(skeleton.bone_count());
        self.evaluate_into(skeleton, track, time, &mut world);
        world
    }

    /// Evaluate into an existing buffer, reusing its allocation.
    ///
    /// For a bone with parent `p` and keyframe locals `L0`, `L1`:
    /// `world = blend(world[p] ∘ L0, world[p] ∘ L1, smoothstep(t))`.
    /// Roots use `L0` directly under [`RootBlend::Snap`].
    ///
    /// Never fails. Bones the track has no pose for evaluate with the
    /// identity local pose.
    pub fn evaluate_into(
        &self,
        skeleton: &Skeleton,
        track: &PoseTrack,
        time: f32,
        world: &mut WorldPoses,
    ) {
        let sample = KeyframeSample::at(time, track.frame_count());
        let current = track.get(sample.frame);
        let next = track.get(sample.next_frame);

        trace!(
            "Evaluating {} bones at time {time}: frame {} -> {}, blend {}",
            skeleton.bone_count(),
            sample.frame,
            sample.next_frame,
            sample.blend
        );

        world.clear();
        world.reserve(skeleton.bone_count());

        for (index, bone) in skeleton.bones().iter().enumerate() {
            let local0 = current.get(index).copied().unwrap_or_default();
            let local1 = next.get(index).copied().unwrap_or_default();

            let pose = match bone.parent {
                Some(parent) => {
                    let parent = world[parent];
                    let p0 = parent.compose(&local0);
                    let p1 = parent.compose(&local1);
                    p0.blend(&p1, sample.blend)
                }
                None => match self.root_blend {
                    RootBlend::Snap => local0,
                    RootBlend::Blend => local0.blend(&local1, sample.blend),
                },
            };

            world.push(pose);
        }
    }
}

/// Evaluate world poses at `time` with roots snapping to the current keyframe
pub fn evaluate(skeleton: &Skeleton, track: &PoseTrack, time: f32) -> WorldPoses {
    PoseComposer::new().evaluate(skeleton, track, time)
}

/// A skeleton together with a track that covers exactly its bones
#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    skeleton: Skeleton,
    track: PoseTrack,
}

impl Rig {
    /// Pair a skeleton with its track, checking the bone counts agree
    pub fn new(skeleton: Skeleton, track: PoseTrack) -> Result<Self> {
        if skeleton.bone_count() != track.bone_count() {
            return Err(AnimError::MalformedAsset(format!(
                "skeleton has {} bones but pose track covers {}",
                skeleton.bone_count(),
                track.bone_count()
            )));
        }
        Ok(Self { skeleton, track })
    }

    /// The bone hierarchy
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// The keyframe track
    pub fn track(&self) -> &PoseTrack {
        &self.track
    }

    /// Number of bones
    pub fn bone_count(&self) -> usize {
        self.skeleton.bone_count()
    }

    /// Evaluate with the default composer
    pub fn evaluate(&self, time: f32) -> WorldPoses {
        evaluate(&self.skeleton, &self.track, time)
    }

    /// Evaluate with a configured composer into an existing buffer
    pub fn evaluate_with(&self, composer: &PoseComposer, time: f32, world: &mut WorldPoses) {
        composer.evaluate_into(&self.skeleton, &self.track, time, world);
    }

    /// Split back into parts
    pub fn into_parts(self) -> (Skeleton, PoseTrack) {
        (self.skeleton, self.track)
    }
}
