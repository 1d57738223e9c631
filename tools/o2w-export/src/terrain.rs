//! Flat terrain synthesis

use crate::config::TerrainSettings;
use crate::error::EncodeResult;
use crate::geometry::{Material, Point3};
use crate::target::{PrimitiveTarget, Renderable};

/// Axis-aligned rectangle on the ground (X/Z) plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundBounds {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl GroundBounds {
    /// Bounds of a set of points, `None` if empty
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    min_x: p.x,
                    min_z: p.z,
                    max_x: p.x,
                    max_z: p.z,
                },
                Some(b) => Self {
                    min_x: b.min_x.min(p.x),
                    min_z: b.min_z.min(p.z),
                    max_x: b.max_x.max(p.x),
                    max_z: b.max_z.max(p.z),
                },
            })
        })
    }
}

/// Grid of flat cells covering some bounds, drawn as one strip per row
#[derive(Debug, Clone, Copy)]
pub struct TerrainSurface {
    bounds: GroundBounds,
    settings: TerrainSettings,
}

impl TerrainSurface {
    pub fn new(bounds: GroundBounds, settings: TerrainSettings) -> Self {
        Self { bounds, settings }
    }

    fn cells(&self, min: f64, max: f64) -> usize {
        (((max - min) / self.settings.cell_size).ceil() as usize).max(1)
    }

    /// Number of cells along X and Z
    pub fn grid_size(&self) -> (usize, usize) {
        let b = &self.bounds;
        (self.cells(b.min_x, b.max_x), self.cells(b.min_z, b.max_z))
    }

    /// Vertices of row `row`, alternating far and near edge
    fn row_strip(&self, row: usize, columns: usize) -> Vec<Point3> {
        let cell = self.settings.cell_size;
        let y = self.settings.elevation;
        // Both edges from the grid origin, so neighbouring rows share vertices
        let z0 = self.bounds.min_z + row as f64 * cell;
        let z1 = self.bounds.min_z + (row + 1) as f64 * cell;

        let mut strip = Vec::with_capacity((columns + 1) * 2);
        for i in 0..=columns {
            let x = self.bounds.min_x + i as f64 * cell;
            strip.push(Point3::new(x, y, z1));
            strip.push(Point3::new(x, y, z0));
        }
        strip
    }
}

impl Renderable for TerrainSurface {
    fn render_to(&self, target: &mut dyn PrimitiveTarget) -> EncodeResult<()> {
        let material = Material::flat(self.settings.color);
        let (columns, rows) = self.grid_size();
        for row in 0..rows {
            target.draw_triangle_strip(&material, &self.row_strip(row, columns))?;
        }
        Ok(())
    }
}
