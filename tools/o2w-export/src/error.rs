//! Encoder error type

use o2w_common::QuantizeError;

use crate::geometry::PrimitiveType;

/// Result alias for encoder operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Fatal encoder failure
///
/// A partially written block sequence cannot be repaired by the consumer, so
/// every variant aborts the encode.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Output sink failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// More distinct vertices than u16 indices can address
    #[error("vertex capacity exceeded: a stream can address at most {limit} distinct vertices")]
    VertexCapacityExceeded { limit: usize },

    /// Coordinate or height does not fit its fixed-point field
    #[error("quantization failed: {0}")]
    Quantize(#[from] QuantizeError),

    /// Vertex list does not match the primitive shape
    #[error("malformed {shape:?} primitive with {vertex_count} vertices")]
    MalformedPrimitive {
        shape: PrimitiveType,
        vertex_count: usize,
    },

    /// Draw call after the encoder was closed
    #[error("encoder is closed")]
    Closed,

    /// Draw call after an earlier draw call failed
    #[error("encoder aborted after an earlier error")]
    Aborted,
}
