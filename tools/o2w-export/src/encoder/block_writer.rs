//! Block-level output
//!
//! Every block is assembled in memory and written with a single
//! `write_all`, so a quantization failure never leaves a partial block on
//! the sink.

use std::io::Write;

use o2w_common::{
    BlockHeader, COORDINATE_SCALE, EntryType, FixedWidth, HEIGHT_SCALE, INDEX_SIZE,
    IndexBlockHeader, MAX_BLOCK_ENTRIES, OverflowPolicy, TreeBlock, VECTOR3_STRIDE,
    pack_position, packing::needs_clamp,
};

use crate::error::EncodeResult;
use crate::geometry::{Color, Point3, TreeObject};

/// Writes O2W blocks to a sink, splitting batches at 255 entries
pub struct BlockWriter<W: Write> {
    sink: W,
    overflow: OverflowPolicy,
    blocks_written: u64,
    bytes_written: u64,
}

impl<W: Write> BlockWriter<W> {
    pub fn new(sink: W, overflow: OverflowPolicy) -> Self {
        Self {
            sink,
            overflow,
            blocks_written: 0,
            bytes_written: 0,
        }
    }

    /// Write a 2-byte header followed by `payload`
    pub fn write_block(
        &mut self,
        entry_type: EntryType,
        entry_count: u8,
        payload: &[u8],
    ) -> EncodeResult<()> {
        let mut block = Vec::with_capacity(BlockHeader::SIZE + payload.len());
        block.extend_from_slice(&BlockHeader::new(entry_type, entry_count).to_bytes());
        block.extend_from_slice(payload);
        self.emit(&block)
    }

    /// Write points as VECTOR3 blocks of at most 255 entries, in order
    ///
    /// An empty batch writes nothing.
    pub fn write_vertex_batch(&mut self, points: &[Point3]) -> EncodeResult<()> {
        for chunk in points.chunks(MAX_BLOCK_ENTRIES) {
            let mut payload = Vec::with_capacity(chunk.len() * VECTOR3_STRIDE);
            for p in chunk {
                self.warn_if_clamped(p.to_array().as_slice(), COORDINATE_SCALE, FixedWidth::I24);
                payload.extend_from_slice(&pack_position(p.x, p.y, p.z, self.overflow)?);
            }
            self.write_block(EntryType::Vector3, chunk.len() as u8, &payload)?;
        }

        if !points.is_empty() {
            tracing::debug!(
                "Wrote {} vertices in {} VECTOR3 block(s)",
                points.len(),
                points.len().div_ceil(MAX_BLOCK_ENTRIES)
            );
        }
        Ok(())
    }

    /// Write indices as index blocks of at most 255 entries, in order
    ///
    /// Each block carries its own tag and diffuse color. An empty list still
    /// produces one block with a count of zero.
    pub fn write_index_batch(
        &mut self,
        entry_type: EntryType,
        diffuse: Color,
        indices: &[u16],
    ) -> EncodeResult<()> {
        debug_assert!(entry_type.is_index_block());

        if indices.is_empty() {
            return self.write_index_block(entry_type, diffuse, &[]);
        }
        for chunk in indices.chunks(MAX_BLOCK_ENTRIES) {
            self.write_index_block(entry_type, diffuse, chunk)?;
        }
        Ok(())
    }

    fn write_index_block(
        &mut self,
        entry_type: EntryType,
        diffuse: Color,
        chunk: &[u16],
    ) -> EncodeResult<()> {
        let header = IndexBlockHeader::new(entry_type, chunk.len() as u8, diffuse.to_bytes());
        let mut block = Vec::with_capacity(header.block_size());
        block.extend_from_slice(&header.to_bytes());
        for index in chunk {
            block.extend_from_slice(&index.to_le_bytes());
        }
        debug_assert_eq!(block.len(), IndexBlockHeader::SIZE + chunk.len() * INDEX_SIZE);
        self.emit(&block)
    }

    /// Write a single TREE block
    pub fn write_tree(&mut self, tree: &TreeObject) -> EncodeResult<()> {
        self.warn_if_clamped(
            tree.position.to_array().as_slice(),
            COORDINATE_SCALE,
            FixedWidth::I24,
        );
        self.warn_if_clamped(&[tree.height], HEIGHT_SCALE, FixedWidth::I16);

        let block = TreeBlock::new(
            tree.position.to_array(),
            tree.height,
            tree.coniferous,
            self.overflow,
        )?;
        self.emit(&block.to_bytes())
    }

    pub fn flush(&mut self) -> EncodeResult<()> {
        self.sink.flush()?;
        Ok(())
    }

    pub fn blocks_written(&self) -> u64 {
        self.blocks_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self, block: &[u8]) -> EncodeResult<()> {
        self.sink.write_all(block)?;
        self.blocks_written += 1;
        self.bytes_written += block.len() as u64;
        Ok(())
    }

    fn warn_if_clamped(&self, values: &[f64], scale: f64, width: FixedWidth) {
        if self.overflow != OverflowPolicy::Clamp {
            return;
        }
        for &v in values {
            if needs_clamp(v, scale, width) {
                tracing::warn!("Clamping {} to {:?} fixed-point range", v, width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> BlockWriter<Vec<u8>> {
        BlockWriter::new(Vec::new(), OverflowPolicy::Error)
    }

    fn points(n: usize) -> Vec<Point3> {
        (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_write_block_header() {
        let mut w = writer();
        w.write_block(EntryType::Vector3, 0, &[]).unwrap();
        assert_eq!(w.get_ref().as_slice(), &[3, 0]);
        assert_eq!(w.blocks_written(), 1);
    }

    #[test]
    fn test_vertex_batch_single_block() {
        let mut w = writer();
        w.write_vertex_batch(&[Point3::new(1.2345, 0.0, -2.0)]).unwrap();
        assert_eq!(
            w.get_ref().as_slice(),
            &[3, 1, 0xD3, 0x04, 0x00, 0x00, 0x00, 0x00, 0x30, 0xF8, 0xFF]
        );
    }

    #[test]
    fn test_vertex_batch_empty_writes_nothing() {
        let mut w = writer();
        w.write_vertex_batch(&[]).unwrap();
        assert!(w.get_ref().is_empty());
        assert_eq!(w.blocks_written(), 0);
    }

    #[test]
    fn test_vertex_batch_splits_at_255() {
        let mut w = writer();
        w.write_vertex_batch(&points(600)).unwrap();
        let out = w.into_inner();

        let first = 2 + 255 * VECTOR3_STRIDE;
        let second = 2 + 255 * VECTOR3_STRIDE;
        assert_eq!(out.len(), first + second + 2 + 90 * VECTOR3_STRIDE);
        assert_eq!(&out[0..2], &[3, 255]);
        assert_eq!(&out[first..first + 2], &[3, 255]);
        assert_eq!(&out[first + second..first + second + 2], &[3, 90]);

        // First entry of the second block is point 255
        let x = o2w_common::unpack_coordinate([out[first + 2], out[first + 3], out[first + 4]]);
        assert_eq!(x, 255.0);
    }

    #[test]
    fn test_vertex_batch_exactly_255() {
        let mut w = writer();
        w.write_vertex_batch(&points(255)).unwrap();
        assert_eq!(w.blocks_written(), 1);
        assert_eq!(w.bytes_written(), (2 + 255 * VECTOR3_STRIDE) as u64);
    }

    #[test]
    fn test_index_batch_layout() {
        let mut w = writer();
        w.write_index_batch(EntryType::Triangles, Color::new(200, 100, 50), &[0, 1, 258])
            .unwrap();
        assert_eq!(
            w.get_ref().as_slice(),
            &[11, 3, 200, 100, 50, 3, 0, 0, 1, 0, 2, 1]
        );
    }

    #[test]
    fn test_index_batch_empty_emits_zero_count_block() {
        let mut w = writer();
        w.write_index_batch(EntryType::TriangleStrip, Color::new(1, 2, 3), &[])
            .unwrap();
        assert_eq!(w.get_ref().as_slice(), &[12, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_index_batch_chunks_repeat_material() {
        let indices: Vec<u16> = (0..300).collect();
        let mut w = writer();
        w.write_index_batch(EntryType::TriangleFan, Color::new(9, 8, 7), &indices)
            .unwrap();
        let out = w.into_inner();

        let first = IndexBlockHeader::SIZE + 255 * INDEX_SIZE;
        assert_eq!(&out[0..6], &[13, 255, 9, 8, 7, 255]);
        assert_eq!(&out[first..first + 6], &[13, 45, 9, 8, 7, 45]);
        assert_eq!(out.len(), first + IndexBlockHeader::SIZE + 45 * INDEX_SIZE);
        assert_eq!(&out[first + 6..first + 8], &255u16.to_le_bytes());
    }

    #[test]
    fn test_out_of_range_vertex_writes_nothing() {
        let mut w = writer();
        let res = w.write_vertex_batch(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0e4, 0.0, 0.0)]);
        assert!(res.is_err());
        assert!(w.get_ref().is_empty());
    }

    #[test]
    fn test_clamp_policy_saturates() {
        let mut w = BlockWriter::new(Vec::new(), OverflowPolicy::Clamp);
        w.write_vertex_batch(&[Point3::new(1.0e4, -1.0e4, 0.0)]).unwrap();
        assert_eq!(
            &w.get_ref()[2..8],
            &[0xFF, 0xFF, 0x7F, 0x00, 0x00, 0x80]
        );
    }

    #[test]
    fn test_write_tree() {
        let mut w = writer();
        let tree = TreeObject {
            position: Point3::new(1.2345, 0.0, -2.0),
            height: 7.0,
            coniferous: true,
        };
        w.write_tree(&tree).unwrap();
        assert_eq!(
            w.get_ref().as_slice(),
            &[20, 1, 0xD3, 0x04, 0x00, 0, 0, 0, 0x30, 0xF8, 0xFF, 0x58, 0x1B]
        );
    }
}
