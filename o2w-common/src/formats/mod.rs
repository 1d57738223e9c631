//! O2W binary container blocks
//!
//! The container is a flat sequence of blocks. There is no file header,
//! footer or length prefix; a reader walks blocks until end of input and
//! uses each tag to know the block's length.
//!
//! # Block header
//! ```text
//! 0x00: tag u8   (EntryType id)
//! 0x01: count u8 (entries in this block, 0-255)
//! 0x02: payload  (type-specific)
//! ```
//!
//! Tree blocks reuse the count slot for the species flag, see [`tree`].

pub mod mesh;
pub mod tree;

pub use mesh::*;
pub use tree::*;

/// Maximum entries in a single block (count is a u8)
pub const MAX_BLOCK_ENTRIES: usize = u8::MAX as usize;

/// Maximum distinct vertices in one stream (indices are u16)
pub const MAX_VERTEX_COUNT: usize = u16::MAX as usize + 1;

/// Block type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntryType {
    /// Batch of quantized positions
    Vector3 = 3,
    /// Explicit triangle list
    Triangles = 11,
    /// Reduced triangle strip
    TriangleStrip = 12,
    /// Reduced triangle fan
    TriangleFan = 13,
    /// Convex polygon (fan convention)
    ConvexPolygon = 14,
    /// Billboard tree
    Tree = 20,
}

impl EntryType {
    /// Wire id of this tag
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a tag by wire id
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            3 => Some(EntryType::Vector3),
            11 => Some(EntryType::Triangles),
            12 => Some(EntryType::TriangleStrip),
            13 => Some(EntryType::TriangleFan),
            14 => Some(EntryType::ConvexPolygon),
            20 => Some(EntryType::Tree),
            _ => None,
        }
    }

    /// True for the four index block tags
    #[inline]
    pub const fn is_index_block(self) -> bool {
        matches!(
            self,
            EntryType::Triangles
                | EntryType::TriangleStrip
                | EntryType::TriangleFan
                | EntryType::ConvexPolygon
        )
    }
}

/// Common 2-byte block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub entry_type: EntryType,
    pub count: u8,
}

impl BlockHeader {
    pub const SIZE: usize = 2;

    pub fn new(entry_type: EntryType, count: u8) -> Self {
        Self { entry_type, count }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        [self.entry_type.id(), self.count]
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            entry_type: EntryType::from_id(bytes[0])?,
            count: bytes[1],
        })
    }
}
