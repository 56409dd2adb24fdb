//! Skeleton file: count-prefixed list of bone records
//!
//! Layout: `u32 bone_count`, then `bone_count` [`BoneRecord`]s of
//! `i32 parent_id`, `vec3 bind_offset`, `quat bind_rotation`.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Quat, Vec3};
use std::io::{Cursor, Read, Write};

use crate::error::Result;
use crate::types::{RigRecord, ensure_consumed, read_records, remaining, write_records};
use crate::validation::validate_hierarchy;

/// Parent id value marking a root bone
pub const ROOT_PARENT: i32 = -1;

/// One bone as stored on disk
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneRecord {
    /// Index of the parent bone, or [`ROOT_PARENT`]
    pub parent_id: i32,
    /// Rest-pose translation relative to the parent
    pub bind_offset: Vec3,
    /// Rest-pose orientation relative to the parent
    pub bind_rotation: Quat,
}

impl BoneRecord {
    /// A root bone record
    pub fn root(bind_offset: Vec3, bind_rotation: Quat) -> Self {
        Self {
            parent_id: ROOT_PARENT,
            bind_offset,
            bind_rotation,
        }
    }

    /// A child bone record
    pub fn child(parent: usize, bind_offset: Vec3, bind_rotation: Quat) -> Self {
        Self {
            parent_id: parent as i32,
            bind_offset,
            bind_rotation,
        }
    }

    /// Parent index, `None` for roots.
    ///
    /// Negative values other than [`ROOT_PARENT`] also yield `None`; the
    /// hierarchy validation rejects them before this is relied upon.
    pub fn parent(&self) -> Option<usize> {
        usize::try_from(self.parent_id).ok()
    }

    /// Whether this record is a root bone
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT
    }
}

impl RigRecord for BoneRecord {
    const SIZE: usize = 32;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let parent_id = reader.read_i32::<LittleEndian>()?;
        let bind_offset = Vec3::read(reader)?;
        let bind_rotation = Quat::read(reader)?;
        Ok(Self {
            parent_id,
            bind_offset,
            bind_rotation,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32::<LittleEndian>(self.parent_id)?;
        self.bind_offset.write(writer)?;
        self.bind_rotation.write(writer)?;
        Ok(())
    }
}

/// Decoded skeleton file.
///
/// A value of this type produced by [`SkeletonFile::from_bytes`] or
/// [`SkeletonFile::read`] is guaranteed to be non-empty and stored in
/// parent-before-child order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SkeletonFile {
    /// Bone records in hierarchy order
    pub bones: Vec<BoneRecord>,
}

impl SkeletonFile {
    /// Parse and validate a skeleton file held entirely in memory
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let bone_count = u32::read(&mut cursor)? as usize;
        let left = remaining(&cursor);
        let bones =
            read_records::<BoneRecord, _>(&mut cursor, bone_count, Some(left), "skeleton bones")?;
        ensure_consumed(&cursor, "skeleton file")?;
        validate_hierarchy(&bones)?;

        log::debug!("Decoded skeleton: {} bones", bones.len());
        Ok(Self { bones })
    }

    /// Parse and validate a skeleton from a stream
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let bone_count = u32::read(reader)? as usize;
        let bones = read_records::<BoneRecord, _>(reader, bone_count, None, "skeleton bones")?;
        validate_hierarchy(&bones)?;
        Ok(Self { bones })
    }

    /// Write the skeleton in file layout.
    ///
    /// The records are written as-is; encoding never validates so that
    /// malformed fixtures can be produced for tests.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        (self.bones.len() as u32).write(writer)?;
        write_records(writer, &self.bones)
    }

    /// Encode the skeleton into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(4 + self.bones.len() * BoneRecord::SIZE);
        self.write(&mut data)?;
        Ok(data)
    }

    /// Number of bones
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}
