//! Scene export driver (scene JSON -> O2W binary)

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::ExportConfig;
use crate::encoder::{BinaryEncoder, EncoderStats};
use crate::scene::{Scene, load_scene};
use crate::target::{PrimitiveTarget, Renderable};
use crate::terrain::{GroundBounds, TerrainSurface};

/// Result of an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub stats: EncoderStats,
    /// Objects left out because their module is disabled
    pub skipped: usize,
}

/// Draw terrain (if configured) and every enabled object to `target`
///
/// Returns the number of skipped objects. Stops at the first failure.
pub fn render_scene(
    scene: &Scene,
    config: &ExportConfig,
    target: &mut dyn PrimitiveTarget,
) -> Result<usize> {
    let (enabled, skipped): (Vec<_>, Vec<_>) = scene
        .objects
        .iter()
        .partition(|o| config.modules.is_enabled(o.module));

    for object in &skipped {
        tracing::debug!("Skipping object from disabled module {:?}", object.module);
    }

    if config.create_terrain {
        match GroundBounds::from_points(enabled.iter().flat_map(|o| o.points())) {
            Some(bounds) => {
                let surface = TerrainSurface::new(bounds, config.terrain);
                let (columns, rows) = surface.grid_size();
                tracing::debug!("Synthesizing {}x{} terrain cells", columns, rows);
                surface
                    .render_to(target)
                    .context("Failed to encode terrain")?;
            }
            None => tracing::warn!("Scene has no enabled geometry, skipping terrain"),
        }
    }

    for (i, object) in enabled.iter().enumerate() {
        object
            .render_to(target)
            .with_context(|| format!("Failed to encode scene object {} ({:?})", i, object.module))?;
    }

    Ok(skipped.len())
}

/// Encode a scene into any sink, closing the encoder on every path
pub fn export_to_writer<W: Write>(
    scene: &Scene,
    config: &ExportConfig,
    sink: W,
) -> Result<(W, ExportSummary)> {
    config.validate()?;

    let mut encoder = BinaryEncoder::with_overflow(sink, config.overflow);
    let rendered = render_scene(scene, config, &mut encoder);
    let closed = encoder.close();

    let skipped = rendered?;
    closed.context("Failed to finalize output")?;

    let stats = encoder.stats();
    let sink = encoder.finish()?;
    Ok((sink, ExportSummary { stats, skipped }))
}

/// Encode a scene to memory
pub fn export_scene_to_memory(
    scene: &Scene,
    config: &ExportConfig,
) -> Result<(Vec<u8>, ExportSummary)> {
    export_to_writer(scene, config, Vec::new())
}

/// Encode a scene file to an O2W file
pub fn export_scene(input: &Path, output: &Path, config: &ExportConfig) -> Result<ExportSummary> {
    let scene = load_scene(input)?;

    let file =
        File::create(output).with_context(|| format!("Failed to create output: {:?}", output))?;
    let (_writer, summary) = export_to_writer(&scene, config, BufWriter::new(file))?;

    tracing::info!(
        "Exported scene: {} primitives, {} trees, {} vertices, {} blocks, {} bytes ({} objects skipped)",
        summary.stats.primitives,
        summary.stats.trees,
        summary.stats.vertices,
        summary.stats.blocks,
        summary.stats.bytes,
        summary.skipped
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleSelection;
    use crate::scene::parse_scene;

    const SCENE: &str = r#"{
        "objects": [
            { "kind": "primitive", "module": "buildings", "shape": "convex_polygon",
              "material": { "diffuse": [200, 0, 0] },
              "vertices": [[0, 0, 0], [10, 0, 0], [10, 0, 10], [0, 0, 10]] },
            { "kind": "tree", "module": "vegetation",
              "position": [20, 0, 20], "height": 7.0, "coniferous": false }
        ]
    }"#;

    #[test]
    fn test_default_config_skips_vegetation() {
        let scene = parse_scene(SCENE).unwrap();
        let (bytes, summary) = export_scene_to_memory(&scene, &ExportConfig::default()).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.stats.primitives, 1);
        assert_eq!(summary.stats.trees, 0);
        assert_eq!(bytes.len() as u64, summary.stats.bytes);
        // VECTOR3(4) + CONVEX_POLYGON(4)
        assert_eq!(bytes.len(), (2 + 4 * 9) + (6 + 4 * 2));
    }

    #[test]
    fn test_all_modules_with_terrain() {
        let scene = parse_scene(SCENE).unwrap();
        let config = ExportConfig {
            create_terrain: true,
            modules: ModuleSelection {
                vegetation: true,
                ..ModuleSelection::default()
            },
            ..ExportConfig::default()
        };
        let (bytes, summary) = export_scene_to_memory(&scene, &config).unwrap();
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.stats.trees, 1);
        // 2x2 terrain rows + polygon
        assert_eq!(summary.stats.primitives, 3);
        // Terrain comes first
        assert_eq!(bytes[0], 3);
        assert_eq!(bytes.last().copied(), Some(0x1B));
    }

    #[test]
    fn test_error_aborts_export() {
        let scene = parse_scene(
            r#"{ "objects": [
                { "kind": "primitive", "shape": "triangles",
                  "material": { "diffuse": [0, 0, 0] },
                  "vertices": [[0, 0, 0], [9000, 0, 0], [0, 0, 1]] }
            ] }"#,
        )
        .unwrap();
        let err = export_scene_to_memory(&scene, &ExportConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("quantization failed"));
    }
}
