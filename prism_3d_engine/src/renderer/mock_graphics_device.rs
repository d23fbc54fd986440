/// Mock graphics device for unit tests (no GPU required)
///
/// Every device call is recorded as a short string into a shared call log so
/// tests can assert on the exact order of binds, uniform uploads and draws.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::error::Result;
use crate::renderer::{
    Buffer, BufferDesc, BufferKind, BufferUsage, Framebuffer, FramebufferId,
    GraphicsDevice, PrimitiveTopology, Shader, ShaderId, Texture, VertexArray,
    VertexLayout,
};

/// Shared, ordered log of device-level calls
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn new_call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

// ============================================================================
// Mock Buffer / VertexArray
// ============================================================================

pub struct MockBuffer {
    pub id: u32,
    pub kind: BufferKind,
    pub size: Cell<u64>,
    pub usage: Cell<BufferUsage>,
    calls: CallLog,
    live: Rc<Cell<i32>>,
}

impl Buffer for MockBuffer {
    fn id(&self) -> u32 {
        self.id
    }

    fn kind(&self) -> BufferKind {
        self.kind
    }

    fn size(&self) -> u64 {
        self.size.get()
    }

    fn update(&self, data: &[u8], usage: BufferUsage) -> Result<()> {
        self.size.set(data.len() as u64);
        self.usage.set(usage);
        self.calls
            .borrow_mut()
            .push(format!("buffer_update {} {} {:?}", self.id, data.len(), usage));
        Ok(())
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
        self.calls.borrow_mut().push(format!("delete_buffer {}", self.id));
    }
}

pub struct MockVertexArray {
    pub id: u32,
    calls: CallLog,
}

impl VertexArray for MockVertexArray {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for MockVertexArray {
    fn drop(&mut self) {
        self.calls.borrow_mut().push(format!("delete_vertex_array {}", self.id));
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

pub struct MockGraphicsDevice {
    pub calls: CallLog,
    next_id: u32,
    live_buffers: Rc<Cell<i32>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::with_log(new_call_log())
    }

    /// Share a call log with mock shaders and framebuffers
    pub fn with_log(calls: CallLog) -> Self {
        Self {
            calls,
            next_id: 1,
            live_buffers: Rc::new(Cell::new(0)),
        }
    }

    /// Buffers created and not yet dropped
    pub fn live_buffers(&self) -> i32 {
        self.live_buffers.get()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls starting with `prefix`
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>> {
        let id = self.allocate_id();
        self.live_buffers.set(self.live_buffers.get() + 1);
        self.push(format!("create_buffer {} {:?} {}", id, desc.kind, desc.data.len()));
        Ok(Box::new(MockBuffer {
            id,
            kind: desc.kind,
            size: Cell::new(desc.data.len() as u64),
            usage: Cell::new(desc.usage),
            calls: self.calls.clone(),
            live: self.live_buffers.clone(),
        }))
    }

    fn create_vertex_array(
        &mut self,
        layout: &VertexLayout,
        vertex_buffer: &dyn Buffer,
        index_buffer: &dyn Buffer,
    ) -> Result<Box<dyn VertexArray>> {
        let id = self.allocate_id();
        self.push(format!(
            "create_vertex_array {} attrs={} vbo={} ebo={}",
            id,
            layout.attributes.len(),
            vertex_buffer.id(),
            index_buffer.id()
        ));
        Ok(Box::new(MockVertexArray { id, calls: self.calls.clone() }))
    }

    fn use_program(&mut self, program: ShaderId) {
        self.push(format!("use_program {}", program));
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<&dyn VertexArray>) {
        match vertex_array {
            Some(vao) => self.push(format!("bind_vertex_array {}", vao.id())),
            None => self.push("bind_vertex_array none".to_string()),
        }
    }

    fn set_point_size(&mut self, size: f32) {
        self.push(format!("point_size {}", size));
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(format!("line_width {}", width));
    }

    fn set_patch_vertices(&mut self, count: u32) {
        self.push(format!("patch_vertices {}", count));
    }

    fn draw(&mut self, topology: PrimitiveTopology, vertex_count: u32) {
        self.push(format!("draw {:?} {}", topology, vertex_count));
    }

    fn draw_indexed(&mut self, topology: PrimitiveTopology, index_count: u32) {
        self.push(format!("draw_indexed {:?} {}", topology, index_count));
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

/// A recorded uniform value
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Uint(u32),
    Float(f32),
    Mat3(Mat3),
    Mat4(Mat4),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
}

pub struct MockShader {
    pub id: ShaderId,
    pub name: String,
    pub uniforms: RefCell<Vec<(String, UniformValue)>>,
    calls: Option<CallLog>,
}

impl MockShader {
    pub fn new(id: ShaderId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            uniforms: RefCell::new(Vec::new()),
            calls: None,
        }
    }

    /// Also record each uniform set as "uniform <id> <name>" in `calls`
    pub fn with_log(id: ShaderId, name: &str, calls: CallLog) -> Self {
        Self { calls: Some(calls), ..Self::new(id, name) }
    }

    /// Most recent value written under `name`
    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.uniforms
            .borrow()
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    /// How many times `name` was written
    pub fn count(&self, name: &str) -> usize {
        self.uniforms.borrow().iter().filter(|(key, _)| key == name).count()
    }

    pub fn total_sets(&self) -> usize {
        self.uniforms.borrow().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.uniforms.borrow().iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn reset(&self) {
        self.uniforms.borrow_mut().clear();
    }

    fn record(&self, name: &str, value: UniformValue) {
        if let Some(calls) = &self.calls {
            calls.borrow_mut().push(format!("uniform {} {}", self.id, name));
        }
        self.uniforms.borrow_mut().push((name.to_string(), value));
    }
}

impl Shader for MockShader {
    fn id(&self) -> ShaderId {
        self.id
    }

    fn debug_name(&self) -> &str {
        &self.name
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.record(name, UniformValue::Bool(value));
    }

    fn set_int(&self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }

    fn set_uint(&self, name: &str, value: u32) {
        self.record(name, UniformValue::Uint(value));
    }

    fn set_float(&self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }

    fn set_mat3(&self, name: &str, value: &Mat3) {
        self.record(name, UniformValue::Mat3(*value));
    }

    fn set_mat4(&self, name: &str, value: &Mat4) {
        self.record(name, UniformValue::Mat4(*value));
    }

    fn set_vec2(&self, name: &str, value: Vec2) {
        self.record(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&self, name: &str, value: Vec3) {
        self.record(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&self, name: &str, value: Vec4) {
        self.record(name, UniformValue::Vec4(value));
    }
}

// ============================================================================
// Mock Framebuffer / Texture
// ============================================================================

pub struct MockFramebuffer {
    pub id: FramebufferId,
    pub binds: Cell<u32>,
    calls: CallLog,
}

impl MockFramebuffer {
    pub fn new(id: FramebufferId, calls: CallLog) -> Self {
        Self { id, binds: Cell::new(0), calls }
    }
}

impl Framebuffer for MockFramebuffer {
    fn id(&self) -> FramebufferId {
        self.id
    }

    fn bind(&self) {
        self.binds.set(self.binds.get() + 1);
        self.calls.borrow_mut().push(format!("bind_framebuffer {}", self.id));
    }
}

pub struct MockTexture {
    pub id: u32,
    pub bound_units: RefCell<Vec<u32>>,
}

impl MockTexture {
    pub fn new(id: u32) -> Self {
        Self { id, bound_units: RefCell::new(Vec::new()) }
    }
}

impl Texture for MockTexture {
    fn id(&self) -> u32 {
        self.id
    }

    fn width(&self) -> u32 {
        1
    }

    fn height(&self) -> u32 {
        1
    }

    fn bind(&self, unit: u32) {
        self.bound_units.borrow_mut().push(unit);
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
