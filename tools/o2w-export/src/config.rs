//! Export configuration (TOML)
//!
//! ```toml
//! create_terrain = true
//! overflow = "clamp"
//!
//! [modules]
//! buildings = true
//! vegetation = true
//!
//! [terrain]
//! cell_size = 25.0
//! color = [90, 140, 60]
//! ```
//!
//! Every key is optional. With no file at all the export keeps buildings
//! only and synthesizes no terrain.

use anyhow::{Context, Result, bail};
use o2w_common::OverflowPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::geometry::Color;
use crate::scene::WorldModule;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Synthesize a flat terrain surface under the scene
    pub create_terrain: bool,
    /// World modules whose objects are exported
    pub modules: ModuleSelection,
    /// Handling of values outside the fixed-point range
    pub overflow: OverflowPolicy,
    pub terrain: TerrainSettings,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            create_terrain: false,
            modules: ModuleSelection::default(),
            overflow: OverflowPolicy::Error,
            terrain: TerrainSettings::default(),
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<()> {
        let cell = self.terrain.cell_size;
        if !cell.is_finite() || cell <= 0.0 {
            bail!("terrain.cell_size must be a positive number, got {}", cell);
        }
        if !self.terrain.elevation.is_finite() {
            bail!("terrain.elevation must be finite");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleSelection {
    pub buildings: bool,
    pub roads: bool,
    pub water: bool,
    pub vegetation: bool,
    pub terrain: bool,
}

impl Default for ModuleSelection {
    fn default() -> Self {
        Self {
            buildings: true,
            roads: false,
            water: false,
            vegetation: false,
            terrain: false,
        }
    }
}

impl ModuleSelection {
    pub fn is_enabled(&self, module: WorldModule) -> bool {
        match module {
            WorldModule::Buildings => self.buildings,
            WorldModule::Roads => self.roads,
            WorldModule::Water => self.water,
            WorldModule::Vegetation => self.vegetation,
            WorldModule::Terrain => self.terrain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerrainSettings {
    /// Grid cell edge length
    pub cell_size: f64,
    /// Height of the surface
    pub elevation: f64,
    pub color: Color,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            elevation: 0.0,
            color: Color::new(96, 128, 56),
        }
    }
}

/// Parse a config from TOML text
pub fn parse_config(text: &str) -> Result<ExportConfig> {
    let config: ExportConfig = toml::from_str(text).context("Failed to parse export config")?;
    config.validate()?;
    Ok(config)
}

/// Load a config file
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read config: {:?}", path))?;
    parse_config(&text).with_context(|| format!("Invalid config file: {:?}", path))
}
