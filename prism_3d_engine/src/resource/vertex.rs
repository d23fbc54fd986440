//! Vertex types uploadable to a vertex buffer.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use crate::renderer::{BufferFormat, VertexLayout};

/// A plain-old-data vertex with a fixed interleaved layout
///
/// `Pod` gives the byte view used for uploads; `layout()` tells the vertex
/// array how to read those bytes.
pub trait Vertex: Pod {
    /// Attribute layout for one vertex of this type
    fn layout() -> VertexLayout;
}

/// Standard lit vertex: position, normal, uv, tangent (locations 0..3)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct VertexFormat {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec3,
}

impl VertexFormat {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2, tangent: Vec3) -> Self {
        Self { position, normal, uv, tangent }
    }
}

impl Vertex for VertexFormat {
    fn layout() -> VertexLayout {
        VertexLayout::packed(&[
            BufferFormat::R32G32B32_SFLOAT,
            BufferFormat::R32G32B32_SFLOAT,
            BufferFormat::R32G32_SFLOAT,
            BufferFormat::R32G32B32_SFLOAT,
        ])
    }
}

/// Position-only vertex, for debug lines and point clouds
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct PositionVertex {
    pub position: Vec3,
}

impl Vertex for PositionVertex {
    fn layout() -> VertexLayout {
        VertexLayout::packed(&[BufferFormat::R32G32B32_SFLOAT])
    }
}

#[cfg(test)]
#[path = "vertex_tests.rs"]
mod tests;
