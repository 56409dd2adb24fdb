//! Per-frame world pose buffer

use std::ops::Index;

use crate::pose::Pose;

/// One composed world pose per bone, in skeleton order.
///
/// Recomputed on every evaluation. Callers that evaluate every frame can
/// keep one buffer around and pass it to
/// [`PoseComposer::evaluate_into`](crate::PoseComposer::evaluate_into) to
/// avoid reallocating.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoses {
    poses: Vec<Pose>,
}

impl WorldPoses {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bone_count` poses
    pub fn with_capacity(bone_count: usize) -> Self {
        Self {
            poses: Vec::with_capacity(bone_count),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.poses.clear();
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.poses.reserve(additional);
    }

    pub(crate) fn push(&mut self, pose: Pose) {
        self.poses.push(pose);
    }

    /// Number of bones
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether the buffer holds no poses
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Pose of bone `index`
    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    /// All poses as a slice
    pub fn as_slice(&self) -> &[Pose] {
        &self.poses
    }

    /// Iterate over poses in bone order
    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }

    /// Take ownership of the poses
    pub fn into_vec(self) -> Vec<Pose> {
        self.poses
    }
}

impl Index<usize> for WorldPoses {
    type Output = Pose;

    fn index(&self, index: usize) -> &Self::Output {
        &self.poses[index]
    }
}

impl From<Vec<Pose>> for WorldPoses {
    fn from(poses: Vec<Pose>) -> Self {
        Self { poses }
    }
}

impl<'a> IntoIterator for &'a WorldPoses {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}
