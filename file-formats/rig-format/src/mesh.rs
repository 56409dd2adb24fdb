//! Skinned mesh file: vertex and index arrays
//!
//! Layout: `u32 vertex_count`, `u32 index_count`, then `vertex_count`
//! [`Vertex`] records, then `index_count` `u32` indices.

use byteorder::{ReadBytesExt, WriteBytesExt};
use glam::Vec3;
use std::io::{Cursor, Read, Write};

use crate::error::Result;
use crate::types::{RigRecord, ensure_consumed, read_records, remaining, write_records};

/// Fixed-point scale of the `u8` bone weights (255 maps to 1.0)
pub const WEIGHT_SCALE: f32 = 255.0;

/// A skinned vertex with two bone influences
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    /// Bind-pose position
    pub position: Vec3,
    /// Bind-pose normal
    pub normal: Vec3,
    /// Indices of the two influencing bones
    pub bone_ids: [u8; 2],
    /// Fixed-point weights of the two influences
    pub bone_weights: [u8; 2],
}

impl Vertex {
    /// Bone weights converted to `[0.0, 1.0]`
    pub fn weights(&self) -> [f32; 2] {
        [
            f32::from(self.bone_weights[0]) / WEIGHT_SCALE,
            f32::from(self.bone_weights[1]) / WEIGHT_SCALE,
        ]
    }

    /// Sum of the raw fixed-point weights
    pub fn weight_sum(&self) -> u16 {
        u16::from(self.bone_weights[0]) + u16::from(self.bone_weights[1])
    }
}

impl RigRecord for Vertex {
    const SIZE: usize = 28;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let position = Vec3::read(reader)?;
        let normal = Vec3::read(reader)?;
        let bone_ids = [reader.read_u8()?, reader.read_u8()?];
        let bone_weights = [reader.read_u8()?, reader.read_u8()?];
        Ok(Self {
            position,
            normal,
            bone_ids,
            bone_weights,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.position.write(writer)?;
        self.normal.write(writer)?;
        writer.write_u8(self.bone_ids[0])?;
        writer.write_u8(self.bone_ids[1])?;
        writer.write_u8(self.bone_weights[0])?;
        writer.write_u8(self.bone_weights[1])?;
        Ok(())
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl BoundingBox {
    /// Center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Decoded mesh file
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshFile {
    /// Vertex records
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl MeshFile {
    /// Parse a mesh file held entirely in memory.
    ///
    /// Trailing bytes after the index array are rejected.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let vertex_count = u32::read(&mut cursor)? as usize;
        let index_count = u32::read(&mut cursor)? as usize;

        let left = remaining(&cursor);
        let vertices =
            read_records::<Vertex, _>(&mut cursor, vertex_count, Some(left), "mesh vertices")?;
        let left = remaining(&cursor);
        let indices = read_records::<u32, _>(&mut cursor, index_count, Some(left), "mesh indices")?;
        ensure_consumed(&cursor, "mesh file")?;

        log::debug!(
            "Decoded mesh: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Ok(Self { vertices, indices })
    }

    /// Parse a mesh from a stream; reads exactly the declared records.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let vertex_count = u32::read(reader)? as usize;
        let index_count = u32::read(reader)? as usize;
        let vertices = read_records::<Vertex, _>(reader, vertex_count, None, "mesh vertices")?;
        let indices = read_records::<u32, _>(reader, index_count, None, "mesh indices")?;
        Ok(Self { vertices, indices })
    }

    /// Write the mesh in file layout
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        (self.vertices.len() as u32).write(writer)?;
        (self.indices.len() as u32).write(writer)?;
        write_records(writer, &self.vertices)?;
        write_records(writer, &self.indices)?;
        Ok(())
    }

    /// Encode the mesh into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.encoded_size());
        self.write(&mut data)?;
        Ok(data)
    }

    /// Size of the encoded file in bytes
    pub fn encoded_size(&self) -> usize {
        8 + self.vertices.len() * Vertex::SIZE + self.indices.len() * u32::SIZE
    }

    /// Number of complete triangles described by the index list
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounding box of all vertex positions, `None` for an empty mesh
    pub fn bounds(&self) -> Option<BoundingBox> {
        let first = self.vertices.first()?.position;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), v| {
                (min.min(v.position), max.max(v.position))
            });
        Some(BoundingBox { min, max })
    }

    /// Highest bone id referenced by any vertex
    pub fn max_bone_id(&self) -> Option<u8> {
        self.vertices
            .iter()
            .flat_map(|v| v.bone_ids)
            .max()
    }
}
