//! Flattening of world poses into fixed-size shader uniform arrays

use glam::{Quat, Vec3};
use log::warn;

use crate::error::{AnimError, Result};
use crate::pose::Pose;
use crate::world::WorldPoses;

/// Bone slots available in the skinning shader's uniform arrays
pub const MAX_BONES: usize = 61;

/// Identity rotation in upload order (w, x, y, z)
pub const IDENTITY_ROTATION: [f32; 4] = [1.0, 0.0, 0.0, 0.0];

/// What to do when a skeleton has more bones than the arrays hold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum CapacityPolicy {
    /// Fail with [`AnimError::BoneCapacityExceeded`]
    #[default]
    Reject,
    /// Export the first `N` bones and drop the rest, with a warning
    Truncate,
}

/// Per-bone uniform values, three parallel arrays of length `N`.
///
/// Rotations are stored scalar first, `[w, x, y, z]`, which is the layout
/// the skinning shader reads. Slots past [`bone_count`](Self::bone_count)
/// hold the identity pose.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformArrays<const N: usize = MAX_BONES> {
    rotations: [[f32; 4]; N],
    translations: [[f32; 3]; N],
    scales: [f32; N],
    bone_count: usize,
}

impl<const N: usize> Default for UniformArrays<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> UniformArrays<N> {
    /// Number of slots, `N`
    pub const CAPACITY: usize = N;

    /// All slots at the identity pose, no bones written
    pub fn identity() -> Self {
        Self {
            rotations: [IDENTITY_ROTATION; N],
            translations: [[0.0; 3]; N],
            scales: [1.0; N],
            bone_count: 0,
        }
    }

    /// Bones written, at most `N`
    pub fn bone_count(&self) -> usize {
        self.bone_count
    }

    /// Rotation per slot as `[w, x, y, z]`
    pub fn rotations(&self) -> &[[f32; 4]; N] {
        &self.rotations
    }

    /// Translation per slot
    pub fn translations(&self) -> &[[f32; 3]; N] {
        &self.translations
    }

    /// Uniform scale per slot
    pub fn scales(&self) -> &[f32; N] {
        &self.scales
    }

    /// Rotations as one contiguous `4 * N` float slice, ready to upload
    pub fn flat_rotations(&self) -> &[f32] {
        self.rotations.as_flattened()
    }

    /// Translations as one contiguous `3 * N` float slice
    pub fn flat_translations(&self) -> &[f32] {
        self.translations.as_flattened()
    }

    /// Read slot `index` back as a [`Pose`]
    pub fn pose(&self, index: usize) -> Option<Pose> {
        let [w, x, y, z] = *self.rotations.get(index)?;
        Some(Pose::new(
            Quat::from_xyzw(x, y, z, w),
            self.scales[index],
            Vec3::from_array(self.translations[index]),
        ))
    }

    fn write_slot(&mut self, index: usize, pose: &Pose) {
        let q = pose.rotation;
        self.rotations[index] = [q.w, q.x, q.y, q.z];
        self.translations[index] = pose.translation.to_array();
        self.scales[index] = pose.scale;
    }

    fn reset_slot(&mut self, index: usize) {
        self.rotations[index] = IDENTITY_ROTATION;
        self.translations[index] = [0.0; 3];
        self.scales[index] = 1.0;
    }
}

/// Writes [`WorldPoses`] into [`UniformArrays`] of capacity `N`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformExporter<const N: usize = MAX_BONES> {
    policy: CapacityPolicy,
}

impl<const N: usize> TransformExporter<N> {
    /// Exporter that rejects oversized skeletons
    pub fn new() -> Self {
        Self {
            policy: CapacityPolicy::Reject,
        }
    }

    /// Exporter with an explicit overflow policy
    pub fn with_policy(policy: CapacityPolicy) -> Self {
        Self { policy }
    }

    /// Overflow policy in effect
    pub fn policy(&self) -> CapacityPolicy {
        self.policy
    }

    /// Bone slots this exporter writes
    pub fn capacity(&self) -> usize {
        N
    }

    /// Export into freshly padded arrays
    pub fn export(&self, world: &WorldPoses) -> Result<UniformArrays<N>> {
        let mut arrays = UniformArrays::identity();
        self.export_into(world, &mut arrays)?;
        Ok(arrays)
    }

    /// Export into existing arrays.
    ///
    /// Slots beyond the written bones are reset to identity. On rejection
    /// `arrays` is left untouched.
    pub fn export_into(&self, world: &WorldPoses, arrays: &mut UniformArrays<N>) -> Result<()> {
        let bone_count = world.len();
        if bone_count > N {
            match self.policy {
                CapacityPolicy::Reject => {
                    return Err(AnimError::BoneCapacityExceeded {
                        bone_count,
                        capacity: N,
                    });
                }
                CapacityPolicy::Truncate => {
                    warn!(
                        "Skeleton has {bone_count} bones, exporting the first {N} and dropping {}",
                        bone_count - N
                    );
                }
            }
        }

        let written = bone_count.min(N);
        for (index, pose) in world.iter().take(written).enumerate() {
            arrays.write_slot(index, pose);
        }
        for index in written..N {
            arrays.reset_slot(index);
        }
        arrays.bone_count = written;

        Ok(())
    }
}
