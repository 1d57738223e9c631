//! Session-wide vertex deduplication

use hashbrown::HashMap;
use o2w_common::MAX_VERTEX_COUNT;

use crate::error::{EncodeError, EncodeResult};
use crate::geometry::Point3;

/// Assigns dense, insertion-ordered indices to distinct points
///
/// Indices are never reused or renumbered for the lifetime of the table.
/// Newly seen points queue in `pending` until drained into a VECTOR3 batch.
#[derive(Debug, Default)]
pub struct VertexTable {
    indices: HashMap<Point3, u16>,
    pending: Vec<Point3>,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `p`, assigning the next one if `p` is new
    pub fn intern(&mut self, p: Point3) -> EncodeResult<u16> {
        if let Some(&index) = self.indices.get(&p) {
            return Ok(index);
        }

        let next = self.indices.len();
        if next >= MAX_VERTEX_COUNT {
            return Err(EncodeError::VertexCapacityExceeded {
                limit: MAX_VERTEX_COUNT,
            });
        }

        let index = next as u16;
        self.indices.insert(p, index);
        self.pending.push(p);
        Ok(index)
    }

    /// Intern every point in order
    pub fn intern_all(&mut self, points: &[Point3]) -> EncodeResult<Vec<u16>> {
        points.iter().map(|&p| self.intern(p)).collect()
    }

    /// Take the points that have not been written yet, in index order
    pub fn drain_pending(&mut self) -> Vec<Point3> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of distinct points seen so far
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
