/// SceneMesh - a drawable mesh backed by GPU buffers.
///
/// Each mesh exclusively owns one vertex array, one vertex buffer and one
/// index buffer. They are created with the mesh and released when it drops.
/// The geometry itself stays in a shared `MeshData`; `update` re-uploads
/// new data into the same buffers.

use std::rc::Rc;
use crate::error::Result;
use crate::engine_trace;
use crate::renderer::{
    Buffer, BufferDesc, BufferKind, BufferUsage, GraphicsDevice, PrimitiveTopology,
    ShaderId, VertexArray,
};
use crate::resource::{MeshData, Material, Vertex};
use crate::scene::{DrawContext, SceneObject, UNNAMED_OBJECT};
use crate::shading::ShaderConfiguration;

/// Uniform prefix for material properties
const MATERIAL_UNIFORM: &str = "material";

pub struct SceneMesh<V: Vertex> {
    // field order is drop order: the vertex array goes before its buffers
    vertex_array: Box<dyn VertexArray>,
    vertex_buffer: Box<dyn Buffer>,
    index_buffer: Box<dyn Buffer>,
    data: Rc<MeshData<V>>,
    usage: BufferUsage,
    topology: PrimitiveTopology,
    material: Rc<Material>,
    shader_id: ShaderId,
    debug_name: String,
}

impl<V: Vertex> SceneMesh<V> {
    /// Upload `data` and create the mesh with a default material
    pub fn new(
        device: &mut dyn GraphicsDevice,
        data: Rc<MeshData<V>>,
        usage: BufferUsage,
        topology: PrimitiveTopology,
    ) -> Result<Self> {
        Self::with_material(device, data, usage, topology, Rc::new(Material::default()))
    }

    /// Upload `data` and create the mesh with `material`
    pub fn with_material(
        device: &mut dyn GraphicsDevice,
        data: Rc<MeshData<V>>,
        usage: BufferUsage,
        topology: PrimitiveTopology,
        material: Rc<Material>,
    ) -> Result<Self> {
        let vertex_buffer = device.create_buffer(BufferDesc {
            kind: BufferKind::Vertex,
            usage,
            data: data.vertex_bytes(),
        })?;
        let index_buffer = device.create_buffer(BufferDesc {
            kind: BufferKind::Index,
            usage,
            data: data.index_bytes(),
        })?;
        let vertex_array = device.create_vertex_array(
            &V::layout(),
            vertex_buffer.as_ref(),
            index_buffer.as_ref(),
        )?;

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
            data,
            usage,
            topology,
            material,
            shader_id: 0,
            debug_name: UNNAMED_OBJECT.to_string(),
        })
    }

    /// Replace data, usage and topology, reusing the existing GPU objects
    ///
    /// Data without indices leaves the index buffer empty.
    pub fn update(
        &mut self,
        data: Rc<MeshData<V>>,
        usage: BufferUsage,
        topology: PrimitiveTopology,
    ) -> Result<()> {
        self.vertex_buffer.update(data.vertex_bytes(), usage)?;
        self.index_buffer.update(data.index_bytes(), usage)?;

        self.data = data;
        self.usage = usage;
        self.topology = topology;
        Ok(())
    }

    /// Replace data, keeping usage and topology
    pub fn update_data(&mut self, data: Rc<MeshData<V>>) -> Result<()> {
        self.update(data, self.usage, self.topology)
    }

    pub fn data(&self) -> &Rc<MeshData<V>> {
        &self.data
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn vertex_array(&self) -> &dyn VertexArray {
        self.vertex_array.as_ref()
    }

    pub fn vertex_buffer(&self) -> &dyn Buffer {
        self.vertex_buffer.as_ref()
    }

    pub fn index_buffer(&self) -> &dyn Buffer {
        self.index_buffer.as_ref()
    }

    fn apply_topology_parameters(&self, ctx: &mut DrawContext, scene_configuration: &ShaderConfiguration) {
        match self.topology {
            PrimitiveTopology::Points => ctx.device.set_point_size(ctx.settings.point_size),
            PrimitiveTopology::Patches => {
                ctx.device.set_patch_vertices(scene_configuration.patch_vertices())
            }
            topology if topology.is_line() => ctx.device.set_line_width(ctx.settings.line_width),
            _ => {}
        }
    }
}

impl<V: Vertex> SceneObject for SceneMesh<V> {
    fn draw(
        &self,
        ctx: &mut DrawContext,
        scene_configuration: &ShaderConfiguration,
        object_configuration: &mut ShaderConfiguration,
    ) -> Result<()> {
        self.material.bind_textures(0);
        self.material.write_uniforms(object_configuration, MATERIAL_UNIFORM, 0);
        self.configure_shader(ctx, scene_configuration, object_configuration)?;

        ctx.device.bind_vertex_array(Some(self.vertex_array.as_ref()));
        self.apply_topology_parameters(ctx, scene_configuration);

        match &self.data.indices {
            Some(indices) => ctx.device.draw_indexed(self.topology, indices.len() as u32),
            None => ctx.device.draw(self.topology, self.data.vertices.len() as u32),
        }
        ctx.device.bind_vertex_array(None);

        engine_trace!("prism3d::SceneMesh", "Drew '{}' with shader {}", self.debug_name, self.shader_id);
        Ok(())
    }

    fn material(&self) -> &Rc<Material> {
        &self.material
    }

    fn set_material(&mut self, material: Rc<Material>) {
        self.material = material;
    }

    fn shader_id(&self) -> ShaderId {
        self.shader_id
    }

    fn set_shader_id(&mut self, id: ShaderId) {
        self.shader_id = id;
    }

    fn debug_name(&self) -> &str {
        &self.debug_name
    }

    fn set_debug_name(&mut self, name: &str) {
        self.debug_name = name.to_string();
    }
}

#[cfg(test)]
#[path = "scene_mesh_tests.rs"]
mod tests;
