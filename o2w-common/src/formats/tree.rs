//! Tree billboard block
//!
//! # Layout
//! ```text
//! 0x00: tag u8 (20)
//! 0x01: species u8 (1 = coniferous, 0 = not)
//! 0x02: x i24
//! 0x05: y i24
//! 0x08: z i24
//! 0x0B: height i16
//! ```
//!
//! Positions and height are 1/1000 units, little-endian. Trees never go
//! through the vertex table and are always exactly one block.

use super::EntryType;
use crate::packing::{
    HEIGHT_SCALE, OverflowPolicy, QuantizeError, pack_height, pack_position, unpack_coordinate,
    unpack_i16_le,
};

/// Encoded tree block (13 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBlock {
    pub coniferous: bool,
    pub position: [u8; 9],
    pub height: [u8; 2],
}

impl TreeBlock {
    pub const SIZE: usize = 13;

    /// Quantize a tree into its block form
    pub fn new(
        position: [f64; 3],
        height: f64,
        coniferous: bool,
        overflow: OverflowPolicy,
    ) -> Result<Self, QuantizeError> {
        Ok(Self {
            coniferous,
            position: pack_position(position[0], position[1], position[2], overflow)?,
            height: pack_height(height, overflow)?,
        })
    }

    /// Write block to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = EntryType::Tree.id();
        bytes[1] = self.coniferous as u8;
        bytes[2..11].copy_from_slice(&self.position);
        bytes[11..13].copy_from_slice(&self.height);
        bytes
    }

    /// Read block from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || bytes[0] != EntryType::Tree.id() || bytes[1] > 1 {
            return None;
        }
        let mut position = [0u8; 9];
        position.copy_from_slice(&bytes[2..11]);
        Some(Self {
            coniferous: bytes[1] == 1,
            position,
            height: [bytes[11], bytes[12]],
        })
    }

    /// Decoded position in units
    pub fn decoded_position(&self) -> [f64; 3] {
        let p = &self.position;
        [
            unpack_coordinate([p[0], p[1], p[2]]),
            unpack_coordinate([p[3], p[4], p[5]]),
            unpack_coordinate([p[6], p[7], p[8]]),
        ]
    }

    /// Decoded height in units
    pub fn decoded_height(&self) -> f64 {
        unpack_i16_le(self.height) as f64 / HEIGHT_SCALE
    }
}
