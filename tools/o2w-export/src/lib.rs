//! o2w-export library
//!
//! Encodes scene draw calls (primitives and billboard trees) into the O2W
//! binary block stream. The CLI in `main.rs` is a thin wrapper around
//! [`export_scene`].

pub mod config;
pub mod encoder;
pub mod error;
pub mod export;
pub mod geometry;
pub mod scene;
pub mod target;
pub mod terrain;

// Re-export the wire format crate
pub use o2w_common as format;

pub use config::{ExportConfig, ModuleSelection, TerrainSettings, load_config};
pub use encoder::{BinaryEncoder, EncoderStats};
pub use error::{EncodeError, EncodeResult};
pub use export::{ExportSummary, export_scene, export_scene_to_memory, export_to_writer};
pub use geometry::{Color, Material, Point3, PrimitiveType, TreeObject};
pub use scene::{Scene, SceneObject, WorldModule, load_scene};
pub use target::{PrimitiveTarget, Renderable};
