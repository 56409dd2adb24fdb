//! Keyframe pose file: one local pose per bone, no header
//!
//! The bone count is supplied by the caller (it comes from the skeleton),
//! so the file length must be exactly `bone_count * 32` bytes.

use glam::{Quat, Vec3};
use std::io::{Cursor, Read, Write};

use crate::error::{FormatError, Result};
use crate::types::{RigRecord, read_records, write_records};

/// One bone's local pose as stored on disk
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseRecord {
    /// Rotation relative to the parent's space
    pub rotation: Quat,
    /// Uniform scale
    pub scale: f32,
    /// Translation relative to the parent's space
    pub translation: Vec3,
}

impl Default for PoseRecord {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            scale: 1.0,
            translation: Vec3::ZERO,
        }
    }
}

impl RigRecord for PoseRecord {
    const SIZE: usize = 32;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let rotation = Quat::read(reader)?;
        let scale = f32::read(reader)?;
        let translation = Vec3::read(reader)?;
        Ok(Self {
            rotation,
            scale,
            translation,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.rotation.write(writer)?;
        self.scale.write(writer)?;
        self.translation.write(writer)?;
        Ok(())
    }
}

/// Decoded keyframe pose file
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseFile {
    /// One pose per bone, in skeleton order
    pub poses: Vec<PoseRecord>,
}

impl PoseFile {
    /// Parse a pose file that must hold exactly `bone_count` records
    pub fn from_bytes(data: &[u8], bone_count: usize) -> Result<Self> {
        let expected = bone_count.saturating_mul(PoseRecord::SIZE);
        if data.len() != expected {
            return Err(FormatError::malformed(format!(
                "pose file holds {} bytes, expected {} for {} bones",
                data.len(),
                expected,
                bone_count
            )));
        }

        let mut cursor = Cursor::new(data);
        let poses = read_records::<PoseRecord, _>(&mut cursor, bone_count, None, "pose records")?;

        log::debug!("Decoded pose file: {} bones", poses.len());
        Ok(Self { poses })
    }

    /// Read exactly `bone_count` records from a stream
    pub fn read<R: Read>(reader: &mut R, bone_count: usize) -> Result<Self> {
        let poses = read_records::<PoseRecord, _>(reader, bone_count, None, "pose records")?;
        Ok(Self { poses })
    }

    /// Write the records in file layout
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_records(writer, &self.poses)
    }

    /// Encode the pose file into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.poses.len() * PoseRecord::SIZE);
        self.write(&mut data)?;
        Ok(data)
    }
}
