//! Scene value types handed to the encoder

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use o2w_common::EntryType;

/// A 3D point in scene units (meters)
///
/// Equality and hashing compare the exact bit patterns of the three
/// components, so `0.0` and `-0.0` are distinct points and no epsilon
/// merging takes place.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    fn bits(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl PartialEq for Point3 {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point3 {}

impl Hash for Point3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        c.to_bytes()
    }
}

/// Surface material
///
/// Only the diffuse color reaches the binary output; ambient is carried for
/// other targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub ambient: Color,
    pub diffuse: Color,
}

impl Material {
    pub const fn new(ambient: Color, diffuse: Color) -> Self {
        Self { ambient, diffuse }
    }

    /// Material with the same ambient and diffuse color
    pub const fn flat(color: Color) -> Self {
        Self::new(color, color)
    }
}

/// Primitive connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Triangles,
    TriangleStrip,
    TriangleFan,
    ConvexPolygon,
}

impl PrimitiveType {
    /// Block tag used for this primitive
    pub const fn entry_type(self) -> EntryType {
        match self {
            PrimitiveType::Triangles => EntryType::Triangles,
            PrimitiveType::TriangleStrip => EntryType::TriangleStrip,
            PrimitiveType::TriangleFan => EntryType::TriangleFan,
            PrimitiveType::ConvexPolygon => EntryType::ConvexPolygon,
        }
    }

    /// Whether `vertex_count` is a usable vertex list for this shape
    pub const fn accepts_vertex_count(self, vertex_count: usize) -> bool {
        match self {
            PrimitiveType::Triangles => vertex_count >= 3 && vertex_count % 3 == 0,
            _ => vertex_count >= 3,
        }
    }
}

/// Billboard tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeObject {
    pub position: Point3,
    pub height: f64,
    #[serde(default)]
    pub coniferous: bool,
}
