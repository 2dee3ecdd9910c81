use crate::math::Vec3;

/// Cube vertex with position, color, and the normal of the face it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: [f32; 3],
    pub normal: Vec3,
}

/// Background vertex: clip-space position and tiling texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
}
