/// GraphicsDevice trait - the backend's object factory and draw-call sink

use crate::error::Result;
use crate::renderer::{
    Buffer, BufferDesc, VertexArray, VertexLayout, PrimitiveTopology, ShaderId,
};

/// Render-loop graphics device
///
/// One device per GL context (or equivalent). All calls happen on the render
/// thread; implementations are not required to be `Send`.
pub trait GraphicsDevice {
    /// Create a buffer and upload `desc.data`
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>>;

    /// Create a vertex array reading `layout` from `vertex_buffer`, with
    /// `index_buffer` attached as its element buffer
    fn create_vertex_array(
        &mut self,
        layout: &VertexLayout,
        vertex_buffer: &dyn Buffer,
        index_buffer: &dyn Buffer,
    ) -> Result<Box<dyn VertexArray>>;

    /// Make `program` the current shader program
    fn use_program(&mut self, program: ShaderId);

    /// Bind a vertex array (`None` unbinds)
    fn bind_vertex_array(&mut self, vertex_array: Option<&dyn VertexArray>);

    /// Rasterized point size for point topology
    fn set_point_size(&mut self, size: f32);

    /// Rasterized line width for line topologies
    fn set_line_width(&mut self, width: f32);

    /// Vertices per patch for patch topology
    fn set_patch_vertices(&mut self, count: u32);

    /// Non-indexed draw from the bound vertex array
    fn draw(&mut self, topology: PrimitiveTopology, vertex_count: u32);

    /// Indexed draw (u32 indices) from the bound vertex array
    fn draw_indexed(&mut self, topology: PrimitiveTopology, index_count: u32);
}
