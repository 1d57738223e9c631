//! Vertex and index blocks
//!
//! # VECTOR3 layout
//! ```text
//! 0x00: tag u8 (3)
//! 0x01: count u8
//! 0x02: count * (x i24, y i24, z i24), little-endian, 1/1000 units
//! ```
//!
//! # Index block layout (TRIANGLES, TRIANGLE_STRIP, TRIANGLE_FAN, CONVEX_POLYGON)
//! ```text
//! 0x00: tag u8 (11-14)
//! 0x01: count u8
//! 0x02: diffuse r, g, b (3 bytes)
//! 0x05: index count u8 (same as count)
//! 0x06: count * u16 little-endian vertex index
//! ```

use super::{BlockHeader, EntryType};

/// Bytes per VECTOR3 entry (3 × 24-bit)
pub const VECTOR3_STRIDE: usize = 9;

/// Bytes per vertex index
pub const INDEX_SIZE: usize = 2;

/// Header of an index block (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBlockHeader {
    pub entry_type: EntryType,
    pub count: u8,
    pub diffuse: [u8; 3],
}

impl IndexBlockHeader {
    pub const SIZE: usize = 6;

    pub fn new(entry_type: EntryType, count: u8, diffuse: [u8; 3]) -> Self {
        Self {
            entry_type,
            count,
            diffuse,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&BlockHeader::new(self.entry_type, self.count).to_bytes());
        bytes[2..5].copy_from_slice(&self.diffuse);
        bytes[5] = self.count;
        bytes
    }

    /// Read header from bytes
    ///
    /// Returns `None` for a non-index tag or mismatched counts.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let header = BlockHeader::from_bytes(bytes)?;
        if !header.entry_type.is_index_block() || bytes[5] != header.count {
            return None;
        }
        Some(Self {
            entry_type: header.entry_type,
            count: header.count,
            diffuse: [bytes[2], bytes[3], bytes[4]],
        })
    }

    /// Total block size including indices
    pub fn block_size(&self) -> usize {
        Self::SIZE + self.count as usize * INDEX_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_header_layout() {
        let header = IndexBlockHeader::new(EntryType::TriangleFan, 4, [10, 20, 30]);
        assert_eq!(header.to_bytes(), [13, 4, 10, 20, 30, 4]);
        assert_eq!(IndexBlockHeader::from_bytes(&header.to_bytes()), Some(header));
        assert_eq!(header.block_size(), 14);
    }

    #[test]
    fn test_index_header_rejects_vector3() {
        assert_eq!(IndexBlockHeader::from_bytes(&[3, 1, 0, 0, 0, 1]), None);
        assert_eq!(IndexBlockHeader::from_bytes(&[11, 3, 0, 0, 0, 2]), None);
    }
}
