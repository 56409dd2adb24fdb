//! Immutable bone hierarchy

use glam::{Quat, Vec3};
use rig_format::{BoneRecord, SkeletonFile, validation::validate_hierarchy};

use crate::error::Result;
use crate::pose::Pose;
use crate::world::WorldPoses;

/// One joint of the skeleton
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Bone {
    /// Parent bone index, `None` for roots
    pub parent: Option<usize>,
    /// Rest-pose translation relative to the parent
    pub bind_offset: Vec3,
    /// Rest-pose orientation relative to the parent
    pub bind_rotation: Quat,
}

impl Bone {
    /// Whether this bone has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The rest pose as a local [`Pose`] with unit scale
    pub fn bind_pose(&self) -> Pose {
        Pose::new(self.bind_rotation, 1.0, self.bind_offset)
    }
}

impl From<&BoneRecord> for Bone {
    fn from(record: &BoneRecord) -> Self {
        Self {
            parent: record.parent(),
            bind_offset: record.bind_offset,
            bind_rotation: record.bind_rotation,
        }
    }
}

impl From<&Bone> for BoneRecord {
    fn from(bone: &Bone) -> Self {
        match bone.parent {
            Some(parent) => Self::child(parent, bone.bind_offset, bone.bind_rotation),
            None => Self::root(bone.bind_offset, bone.bind_rotation),
        }
    }
}

/// Validated bone hierarchy in parent-before-child order.
///
/// A `Skeleton` can only be built through validating constructors, so any
/// value of this type has at least one bone and every parent index is
/// smaller than its child's index.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Decode and validate a skeleton file
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let file = SkeletonFile::from_bytes(bytes)?;
        Ok(Self {
            bones: file.bones.iter().map(Bone::from).collect(),
        })
    }

    /// Build from skeleton records, validating the hierarchy
    pub fn from_file(file: &SkeletonFile) -> Result<Self> {
        validate_hierarchy(&file.bones)?;
        Ok(Self {
            bones: file.bones.iter().map(Bone::from).collect(),
        })
    }

    /// Build from bones, validating the hierarchy
    pub fn from_bones(bones: Vec<Bone>) -> Result<Self> {
        let records: Vec<BoneRecord> = bones.iter().map(BoneRecord::from).collect();
        validate_hierarchy(&records)?;
        Ok(Self { bones })
    }

    /// Encode back to the file representation
    pub fn to_file(&self) -> SkeletonFile {
        SkeletonFile {
            bones: self.bones.iter().map(BoneRecord::from).collect(),
        }
    }

    /// Number of bones
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// All bones in hierarchy order
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Bone by index
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// Indices of all root bones
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, bone)| bone.is_root())
            .map(|(index, _)| index)
    }

    /// Indices of the direct children of `index`
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .skip(index + 1)
            .filter(move |(_, bone)| bone.parent == Some(index))
            .map(|(child, _)| child)
    }

    /// Depth of every bone (roots are 0), in one forward pass
    pub fn depths(&self) -> Vec<usize> {
        let mut depths: Vec<usize> = Vec::with_capacity(self.bones.len());
        for bone in &self.bones {
            let depth = bone.parent.map_or(0, |parent| depths[parent] + 1);
            depths.push(depth);
        }
        depths
    }

    /// Longest root-to-leaf chain, counted in bones
    pub fn max_depth(&self) -> usize {
        self.depths().into_iter().max().map_or(0, |depth| depth + 1)
    }

    /// Rest-pose world transforms.
    ///
    /// Each bone's `(bind_rotation, 1.0, bind_offset)` is composed onto its
    /// parent's world pose, the same way animated poses are.
    pub fn bind_pose(&self) -> WorldPoses {
        let mut world = WorldPoses::with_capacity(self.bones.len());
        for bone in &self.bones {
            let local = bone.bind_pose();
            let pose = match bone.parent {
                Some(parent) => world[parent].compose(&local),
                None => local,
            };
            world.push(pose);
        }
        world
    }
}
