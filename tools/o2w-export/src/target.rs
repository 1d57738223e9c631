//! Draw-call surface between scene producers and output targets

use crate::error::EncodeResult;
use crate::geometry::{Material, Point3, PrimitiveType, TreeObject};

/// Receives drawable primitives and billboard trees
///
/// Normals and texture coordinate layers are part of the call so that
/// producers need not know which target they are feeding; targets that
/// cannot store them drop them.
pub trait PrimitiveTarget {
    fn draw_primitive(
        &mut self,
        shape: PrimitiveType,
        material: &Material,
        vertices: &[Point3],
        normals: &[Point3],
        tex_coords: &[Vec<[f64; 2]>],
    ) -> EncodeResult<()>;

    fn draw_tree(&mut self, tree: &TreeObject) -> EncodeResult<()>;

    fn draw_triangles(&mut self, material: &Material, vertices: &[Point3]) -> EncodeResult<()> {
        self.draw_primitive(PrimitiveType::Triangles, material, vertices, &[], &[])
    }

    fn draw_triangle_strip(
        &mut self,
        material: &Material,
        vertices: &[Point3],
    ) -> EncodeResult<()> {
        self.draw_primitive(PrimitiveType::TriangleStrip, material, vertices, &[], &[])
    }

    fn draw_triangle_fan(&mut self, material: &Material, vertices: &[Point3]) -> EncodeResult<()> {
        self.draw_primitive(PrimitiveType::TriangleFan, material, vertices, &[], &[])
    }

    fn draw_convex_polygon(
        &mut self,
        material: &Material,
        vertices: &[Point3],
    ) -> EncodeResult<()> {
        self.draw_primitive(PrimitiveType::ConvexPolygon, material, vertices, &[], &[])
    }
}

/// Something that can be drawn to any [`PrimitiveTarget`]
pub trait Renderable {
    fn render_to(&self, target: &mut dyn PrimitiveTarget) -> EncodeResult<()>;
}
