//! JSON scene input
//!
//! A scene file records the draw events a world-generation pipeline
//! produces, tagged with the world module that produced each one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::EncodeResult;
use crate::geometry::{Material, Point3, PrimitiveType, TreeObject};
use crate::target::{PrimitiveTarget, Renderable};

/// World module that produced a scene object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldModule {
    #[default]
    Buildings,
    Roads,
    Water,
    Vegetation,
    Terrain,
}

/// A decoded scene file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

/// One drawable unit and its producing module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(default)]
    pub module: WorldModule,
    #[serde(flatten)]
    pub drawable: Drawable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawable {
    Primitive(ScenePrimitive),
    Tree(TreeObject),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePrimitive {
    pub shape: PrimitiveType,
    pub material: Material,
    pub vertices: Vec<Point3>,
    #[serde(default)]
    pub normals: Vec<Point3>,
    #[serde(default)]
    pub tex_coords: Vec<Vec<[f64; 2]>>,
}

impl SceneObject {
    /// Every point this object occupies
    pub fn points(&self) -> Box<dyn Iterator<Item = Point3> + '_> {
        match &self.drawable {
            Drawable::Primitive(p) => Box::new(p.vertices.iter().copied()),
            Drawable::Tree(t) => Box::new(std::iter::once(t.position)),
        }
    }
}

impl Renderable for SceneObject {
    fn render_to(&self, target: &mut dyn PrimitiveTarget) -> EncodeResult<()> {
        match &self.drawable {
            Drawable::Primitive(p) => target.draw_primitive(
                p.shape,
                &p.material,
                &p.vertices,
                &p.normals,
                &p.tex_coords,
            ),
            Drawable::Tree(t) => target.draw_tree(t),
        }
    }
}

/// Parse a scene from JSON text
pub fn parse_scene(json: &str) -> Result<Scene> {
    serde_json::from_str(json).context("Failed to parse scene JSON")
}

/// Load a scene file
pub fn load_scene(path: &Path) -> Result<Scene> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read scene: {:?}", path))?;
    parse_scene(&text).with_context(|| format!("Invalid scene file: {:?}", path))
}
