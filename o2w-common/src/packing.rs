//! Fixed-point quantization and little-endian packing
//!
//! Converts f64 scene values to the signed fixed-point integers stored in
//! O2W blocks:
//! - coordinates → 24-bit signed, 1/1000 units (millimeters)
//! - tree heights → 16-bit signed, 1/1000 units
//!
//! `u32::to_le_bytes` and friends only cover whole machine widths, so the
//! 24-bit case has its own packer.

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Scale factor for coordinates (1 unit = 1000 steps)
pub const COORDINATE_SCALE: f64 = 1000.0;
/// Scale factor for tree heights
pub const HEIGHT_SCALE: f64 = 1000.0;

// ============================================================================
// Fixed-Point Widths
// ============================================================================

/// Byte width of a signed fixed-point field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedWidth {
    /// 16-bit signed (2 bytes)
    I16,
    /// 24-bit signed (3 bytes)
    I24,
}

impl FixedWidth {
    /// Number of bytes this width occupies on the wire
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            FixedWidth::I16 => 2,
            FixedWidth::I24 => 3,
        }
    }

    /// Smallest representable integer
    #[inline]
    pub const fn min(self) -> i32 {
        match self {
            FixedWidth::I16 => i16::MIN as i32,
            FixedWidth::I24 => -(1 << 23),
        }
    }

    /// Largest representable integer
    #[inline]
    pub const fn max(self) -> i32 {
        match self {
            FixedWidth::I16 => i16::MAX as i32,
            FixedWidth::I24 => (1 << 23) - 1,
        }
    }
}

/// What to do with a value that does not fit its fixed-point width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail the encode
    #[default]
    Error,
    /// Saturate to the nearest representable value
    Clamp,
}

/// Quantization failure
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum QuantizeError {
    /// Value is outside the range of its fixed-point width
    #[error("value {value} does not fit in {width:?} fixed point at scale {scale}")]
    OutOfRange {
        value: f64,
        scale: f64,
        width: FixedWidth,
    },

    /// NaN or infinity
    #[error("non-finite value {0} cannot be quantized")]
    NonFinite(f64),
}

// ============================================================================
// Quantization
// ============================================================================

/// Quantize `value * scale` to the nearest integer of the given width.
///
/// Rounds half away from zero (`f64::round`), so `1234.5 → 1235` and
/// `-1234.5 → -1235`.
pub fn quantize(
    value: f64,
    scale: f64,
    width: FixedWidth,
    overflow: OverflowPolicy,
) -> Result<i32, QuantizeError> {
    if !value.is_finite() {
        return Err(QuantizeError::NonFinite(value));
    }

    let scaled = (value * scale).round();
    let (min, max) = (width.min() as f64, width.max() as f64);

    if scaled < min || scaled > max {
        return match overflow {
            OverflowPolicy::Error => Err(QuantizeError::OutOfRange {
                value,
                scale,
                width,
            }),
            OverflowPolicy::Clamp => Ok(scaled.clamp(min, max) as i32),
        };
    }

    Ok(scaled as i32)
}

/// Returns true if `quantize` would have to clamp this value
#[inline]
pub fn needs_clamp(value: f64, scale: f64, width: FixedWidth) -> bool {
    let scaled = (value * scale).round();
    scaled < width.min() as f64 || scaled > width.max() as f64
}

// ============================================================================
// Little-Endian Packing
// ============================================================================

/// Pack the low 24 bits of `v` as little-endian two's complement
#[inline]
pub fn pack_i24_le(v: i32) -> [u8; 3] {
    [v as u8, (v >> 8) as u8, (v >> 16) as u8]
}

/// Sign-extend a little-endian 24-bit value
#[inline]
pub fn unpack_i24_le(bytes: [u8; 3]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]) << 8 >> 8
}

/// Pack the low 16 bits of `v` as little-endian two's complement
#[inline]
pub fn pack_i16_le(v: i32) -> [u8; 2] {
    (v as i16).to_le_bytes()
}

/// Decode a little-endian 16-bit signed value
#[inline]
pub fn unpack_i16_le(bytes: [u8; 2]) -> i32 {
    i16::from_le_bytes(bytes) as i32
}

/// Quantize a single coordinate to 3 bytes
pub fn pack_coordinate(value: f64, overflow: OverflowPolicy) -> Result<[u8; 3], QuantizeError> {
    let q = quantize(value, COORDINATE_SCALE, FixedWidth::I24, overflow)?;
    Ok(pack_i24_le(q))
}

/// Quantize an x/y/z triple to 9 bytes
pub fn pack_position(
    x: f64,
    y: f64,
    z: f64,
    overflow: OverflowPolicy,
) -> Result<[u8; 9], QuantizeError> {
    let mut out = [0u8; 9];
    out[0..3].copy_from_slice(&pack_coordinate(x, overflow)?);
    out[3..6].copy_from_slice(&pack_coordinate(y, overflow)?);
    out[6..9].copy_from_slice(&pack_coordinate(z, overflow)?);
    Ok(out)
}

/// Quantize a tree height to 2 bytes
pub fn pack_height(value: f64, overflow: OverflowPolicy) -> Result<[u8; 2], QuantizeError> {
    let q = quantize(value, HEIGHT_SCALE, FixedWidth::I16, overflow)?;
    Ok(pack_i16_le(q))
}

/// Decode a 3-byte coordinate back to units
#[inline]
pub fn unpack_coordinate(bytes: [u8; 3]) -> f64 {
    unpack_i24_le(bytes) as f64 / COORDINATE_SCALE
}
