//! Primitive record encoding shared by all rig asset files
//!
//! All values are little-endian with no padding. Quaternions are stored
//! in `x, y, z, w` order.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Quat, Vec3};
use std::io::{Cursor, Read, Write};

use crate::error::{FormatError, Result};

/// Trait for fixed-size records that can be read from and written to a
/// rig asset stream.
///
/// Every record has a constant on-disk size, which lets file-level parsers
/// check counts against the stream length before allocating.
pub trait RigRecord: Sized {
    /// Encoded size of the record in bytes
    const SIZE: usize;

    /// Parse one record from the reader
    fn read<R: Read>(reader: &mut R) -> Result<Self>;

    /// Write this record to the writer
    fn write<W: Write>(&self, writer: &mut W) -> Result<()>;
}

impl RigRecord for f32 {
    const SIZE: usize = 4;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(reader.read_f32::<LittleEndian>()?)
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_f32::<LittleEndian>(*self)?;
        Ok(())
    }
}

impl RigRecord for u32 {
    const SIZE: usize = 4;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(reader.read_u32::<LittleEndian>()?)
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(*self)?;
        Ok(())
    }
}

impl RigRecord for Vec3 {
    const SIZE: usize = 12;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let x = reader.read_f32::<LittleEndian>()?;
        let y = reader.read_f32::<LittleEndian>()?;
        let z = reader.read_f32::<LittleEndian>()?;
        Ok(Vec3::new(x, y, z))
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_f32::<LittleEndian>(self.x)?;
        writer.write_f32::<LittleEndian>(self.y)?;
        writer.write_f32::<LittleEndian>(self.z)?;
        Ok(())
    }
}

impl RigRecord for Quat {
    const SIZE: usize = 16;

    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let x = reader.read_f32::<LittleEndian>()?;
        let y = reader.read_f32::<LittleEndian>()?;
        let z = reader.read_f32::<LittleEndian>()?;
        let w = reader.read_f32::<LittleEndian>()?;
        // Raw components, no normalization: decoding must be bit-exact
        Ok(Quat::from_xyzw(x, y, z, w))
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_f32::<LittleEndian>(self.x)?;
        writer.write_f32::<LittleEndian>(self.y)?;
        writer.write_f32::<LittleEndian>(self.z)?;
        writer.write_f32::<LittleEndian>(self.w)?;
        Ok(())
    }
}

/// Upper bound on records preallocated when the stream length is unknown
const MAX_PREALLOCATED: usize = 1024;

/// Read `count` consecutive records.
///
/// `remaining` is the number of bytes left in the stream, when known; a
/// count that cannot fit is rejected before any allocation happens.
/// Otherwise the preallocation is capped and a short stream fails at EOF.
pub fn read_records<T: RigRecord, R: Read>(
    reader: &mut R,
    count: usize,
    remaining: Option<u64>,
    what: &str,
) -> Result<Vec<T>> {
    if let Some(remaining) = remaining {
        let needed = (count as u64).saturating_mul(T::SIZE as u64);
        if needed > remaining {
            return Err(FormatError::malformed(format!(
                "{what}: {count} records need {needed} bytes, only {remaining} available"
            )));
        }
    }

    let capacity = match remaining {
        Some(_) => count,
        None => count.min(MAX_PREALLOCATED),
    };
    let mut items = Vec::with_capacity(capacity);
    for _ in 0..count {
        items.push(T::read(reader)?);
    }
    Ok(items)
}

/// Write all records in order.
pub fn write_records<T: RigRecord, W: Write>(writer: &mut W, items: &[T]) -> Result<()> {
    for item in items {
        item.write(writer)?;
    }
    Ok(())
}

/// Bytes left to read in an in-memory cursor
pub(crate) fn remaining(cursor: &Cursor<&[u8]>) -> u64 {
    let len = cursor.get_ref().len() as u64;
    len.saturating_sub(cursor.position())
}

/// Fail if an in-memory cursor still has unread bytes
pub(crate) fn ensure_consumed(cursor: &Cursor<&[u8]>, what: &str) -> Result<()> {
    let left = remaining(cursor);
    if left != 0 {
        return Err(FormatError::malformed(format!(
            "{what}: {left} trailing bytes after the last record"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quat_component_order() {
        let mut data = Vec::new();
        Quat::from_xyzw(1.0, 2.0, 3.0, 4.0).write(&mut data).unwrap();

        assert_eq!(data.len(), Quat::SIZE);
        assert_eq!(&data[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&data[12..16], &4.0f32.to_le_bytes());
    }

    #[test]
    fn test_read_records_rejects_oversized_count() {
        let data = [0u8; 20];
        let mut cursor = Cursor::new(&data[..]);
        let result = read_records::<Vec3, _>(&mut cursor, 2, Some(20), "test");
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_huge_count_on_unknown_length_stream() {
        let data = [0u8; 24];
        let result = read_records::<Vec3, _>(&mut &data[..], usize::MAX, None, "test");
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_short_read_is_malformed() {
        let data = [0u8; 10];
        let mut cursor = Cursor::new(&data[..]);
        let result = Vec3::read(&mut cursor);
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_ensure_consumed() {
        let data = [0u8; 12];
        let mut cursor = Cursor::new(&data[..]);
        assert!(ensure_consumed(&cursor, "test").is_err());
        Vec3::read(&mut cursor).unwrap();
        assert!(ensure_consumed(&cursor, "test").is_ok());
    }
}
