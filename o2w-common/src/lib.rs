//! Shared wire format for the O2W binary scene container
//!
//! This crate is used by:
//! - `o2w-export` (scene encoder and CLI)
//! - downstream consumers that need the block tags and layouts
//!
//! # Modules
//!
//! - [`packing`] - Fixed-point quantization (f64 → i24/i16 little-endian)
//! - [`formats`] - Block tags and block layouts

pub mod formats;
pub mod packing;

// Re-export commonly used packing items
pub use packing::{
    COORDINATE_SCALE, FixedWidth, HEIGHT_SCALE, OverflowPolicy, QuantizeError, pack_coordinate,
    pack_height, pack_i16_le, pack_i24_le, pack_position, quantize, unpack_coordinate,
    unpack_i16_le, unpack_i24_le,
};

// Re-export commonly used format items
pub use formats::{
    BlockHeader, EntryType, INDEX_SIZE, IndexBlockHeader, MAX_BLOCK_ENTRIES, MAX_VERTEX_COUNT,
    TreeBlock, VECTOR3_STRIDE,
};
