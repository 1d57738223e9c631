//! O2W binary encoder
//!
//! Per primitive draw call:
//! 1. intern every vertex in caller order
//! 2. write newly seen vertices as VECTOR3 blocks
//! 3. reduce connectivity
//! 4. write the index list as blocks tagged with the primitive shape
//!
//! Within one draw call, VECTOR3 blocks always precede the index blocks that
//! reference them. Blocks appear in draw-call order.
//!
//! A failed draw call leaves the vertex table ahead of the stream, so the
//! encoder refuses every later draw call with [`EncodeError::Aborted`].

mod block_writer;
mod reduce;
mod vertex_table;

pub use block_writer::BlockWriter;
pub use reduce::{reduce, reduce_fan, reduce_strip};
pub use vertex_table::VertexTable;

use std::io::Write;

use o2w_common::OverflowPolicy;

use crate::error::{EncodeError, EncodeResult};
use crate::geometry::{Material, Point3, PrimitiveType, TreeObject};
use crate::target::PrimitiveTarget;

/// Counters reported after an encode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderStats {
    /// Distinct vertices interned
    pub vertices: usize,
    /// Primitive draw calls
    pub primitives: usize,
    /// Tree draw calls
    pub trees: usize,
    /// Blocks written
    pub blocks: u64,
    /// Bytes written
    pub bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Failed,
    Closed,
}

/// Encodes draw calls into an O2W block stream
///
/// Owns its vertex table and sink exclusively; separate encoders never
/// share index numbering.
pub struct BinaryEncoder<W: Write> {
    writer: BlockWriter<W>,
    vertices: VertexTable,
    state: State,
    primitives: usize,
    trees: usize,
}

impl<W: Write> BinaryEncoder<W> {
    pub fn new(sink: W) -> Self {
        Self::with_overflow(sink, OverflowPolicy::default())
    }

    pub fn with_overflow(sink: W, overflow: OverflowPolicy) -> Self {
        Self {
            writer: BlockWriter::new(sink, overflow),
            vertices: VertexTable::new(),
            state: State::Open,
            primitives: 0,
            trees: 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// True once a draw call has failed
    pub fn is_aborted(&self) -> bool {
        self.state == State::Failed
    }

    pub fn stats(&self) -> EncoderStats {
        EncoderStats {
            vertices: self.vertices.len(),
            primitives: self.primitives,
            trees: self.trees,
            blocks: self.writer.blocks_written(),
            bytes: self.writer.bytes_written(),
        }
    }

    /// Write any pending vertices and flush the sink
    ///
    /// Further draw calls fail with [`EncodeError::Closed`]. Closing twice is
    /// a no-op. An aborted encoder only flushes what it already wrote.
    pub fn close(&mut self) -> EncodeResult<()> {
        let previous = std::mem::replace(&mut self.state, State::Closed);
        match previous {
            State::Closed => Ok(()),
            State::Failed => self.writer.flush(),
            State::Open => {
                let pending = self.vertices.drain_pending();
                self.writer.write_vertex_batch(&pending)?;
                self.writer.flush()
            }
        }
    }

    /// Close and hand back the sink
    pub fn finish(mut self) -> EncodeResult<W> {
        self.close()?;
        Ok(self.writer.into_inner())
    }

    fn ensure_open(&self) -> EncodeResult<()> {
        match self.state {
            State::Open => Ok(()),
            State::Failed => Err(EncodeError::Aborted),
            State::Closed => Err(EncodeError::Closed),
        }
    }

    /// Run one draw call, poisoning the encoder if it fails
    fn guarded(
        &mut self,
        draw: impl FnOnce(&mut Self) -> EncodeResult<()>,
    ) -> EncodeResult<()> {
        self.ensure_open()?;
        let result = draw(self);
        if result.is_err() {
            self.state = State::Failed;
        }
        result
    }

    fn encode_primitive(
        &mut self,
        shape: PrimitiveType,
        material: &Material,
        vertices: &[Point3],
    ) -> EncodeResult<()> {
        if !shape.accepts_vertex_count(vertices.len()) {
            return Err(EncodeError::MalformedPrimitive {
                shape,
                vertex_count: vertices.len(),
            });
        }

        let indices = self.vertices.intern_all(vertices)?;

        let pending = self.vertices.drain_pending();
        self.writer.write_vertex_batch(&pending)?;

        let reduced = reduce(shape, &indices);
        if reduced.len() < indices.len() {
            tracing::debug!(
                "Reduced {:?}: {} -> {} indices",
                shape,
                indices.len(),
                reduced.len()
            );
        }
        self.writer
            .write_index_batch(shape.entry_type(), material.diffuse, &reduced)?;

        self.primitives += 1;
        Ok(())
    }
}

impl<W: Write> PrimitiveTarget for BinaryEncoder<W> {
    fn draw_primitive(
        &mut self,
        shape: PrimitiveType,
        material: &Material,
        vertices: &[Point3],
        _normals: &[Point3],
        _tex_coords: &[Vec<[f64; 2]>],
    ) -> EncodeResult<()> {
        self.guarded(|enc| enc.encode_primitive(shape, material, vertices))
    }

    fn draw_tree(&mut self, tree: &TreeObject) -> EncodeResult<()> {
        self.guarded(|enc| {
            enc.writer.write_tree(tree)?;
            enc.trees += 1;
            Ok(())
        })
    }
}
