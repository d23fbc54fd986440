//! Resource module
//!
//! CPU-side data the scene draws from: vertex types, mesh geometry and
//! materials.

pub mod vertex;
pub mod mesh_data;
pub mod material;

pub use vertex::{Vertex, VertexFormat, PositionVertex};
pub use mesh_data::MeshData;
pub use material::{Material, MaterialProperty, MATERIAL_TEXTURE_SLOTS};
