//! Similarity transform used for local and world bone poses

use glam::{Mat4, Quat, Vec3};
use rig_format::PoseRecord;

/// Rotation, uniform scale and translation of one bone.
///
/// Used both for a bone's local pose (relative to its parent) and for its
/// composed world pose. Poses compose with [`Pose::compose`] (or `*`),
/// parent on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// Unit quaternion orientation
    pub rotation: Quat,
    /// Uniform scale, non-negative
    pub scale: f32,
    /// Translation
    pub translation: Vec3,
}

impl Pose {
    /// The identity pose
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        scale: 1.0,
        translation: Vec3::ZERO,
    };

    /// Create a pose from its components
    pub const fn new(rotation: Quat, scale: f32, translation: Vec3) -> Self {
        Self {
            rotation,
            scale,
            translation,
        }
    }

    /// A pure translation
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// A pure rotation
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Compose a child's local pose onto this (parent) pose.
    ///
    /// `rotation = P.r * L.r`, `scale = P.s * L.s`,
    /// `translation = P.s * rotate(P.r, L.t) + P.t`.
    /// Associative but not commutative.
    #[inline]
    pub fn compose(&self, local: &Self) -> Self {
        Self {
            rotation: self.rotation * local.rotation,
            scale: self.scale * local.scale,
            translation: self.scale * (self.rotation * local.translation) + self.translation,
        }
    }

    /// Interpolate towards `other` by factor `s`.
    ///
    /// Rotation uses shortest-arc slerp, scale and translation are linear.
    #[inline]
    pub fn blend(&self, other: &Self, s: f32) -> Self {
        Self {
            rotation: self.rotation.slerp(other.rotation, s),
            scale: self.scale + (other.scale - self.scale) * s,
            translation: self.translation.lerp(other.translation, s),
        }
    }

    /// Apply this transform to a point
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.scale * (self.rotation * point) + self.translation
    }

    /// Apply this transform to a direction (no translation)
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.scale * (self.rotation * vector)
    }

    /// Column-major 4x4 matrix equivalent
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }

    /// Component-wise comparison within `tolerance`.
    ///
    /// Quaternions `q` and `-q` are treated as equal rotations.
    pub fn abs_diff_eq(&self, other: &Self, tolerance: f32) -> bool {
        let same_rotation = self.rotation.abs_diff_eq(other.rotation, tolerance)
            || self.rotation.abs_diff_eq(-other.rotation, tolerance);
        same_rotation
            && (self.scale - other.scale).abs() <= tolerance
            && self.translation.abs_diff_eq(other.translation, tolerance)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Pose {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl From<PoseRecord> for Pose {
    fn from(record: PoseRecord) -> Self {
        Self {
            rotation: record.rotation,
            scale: record.scale,
            translation: record.translation,
        }
    }
}

impl From<Pose> for PoseRecord {
    fn from(pose: Pose) -> Self {
        Self {
            rotation: pose.rotation,
            scale: pose.scale,
            translation: pose.translation,
        }
    }
}
