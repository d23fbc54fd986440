/// Buffer and vertex array traits and descriptors

use crate::error::Result;

/// What a buffer is bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Vertex attribute data
    Vertex,
    /// Element indices (u32)
    Index,
}

/// Usage hint passed to the driver on every upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times
    #[default]
    StaticDraw,
    /// Re-uploaded regularly
    DynamicDraw,
    /// Uploaded once per frame or less
    StreamDraw,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc<'a> {
    /// Binding kind
    pub kind: BufferKind,
    /// Driver usage hint
    pub usage: BufferUsage,
    /// Initial contents (may be empty)
    pub data: &'a [u8],
}

/// GPU buffer handle
///
/// Implemented by backend-specific buffer types. The buffer is destroyed when
/// dropped, so whoever holds the `Box<dyn Buffer>` owns the GPU object.
pub trait Buffer {
    /// Backend object name (used by vertex arrays to reference the buffer)
    fn id(&self) -> u32;

    /// Binding kind
    fn kind(&self) -> BufferKind;

    /// Current size in bytes
    fn size(&self) -> u64;

    /// Replace the whole contents; the handle itself is kept
    ///
    /// An empty slice leaves an allocated but zero-sized buffer.
    fn update(&self, data: &[u8], usage: BufferUsage) -> Result<()>;
}

/// Vertex array handle: vertex layout plus the buffers it reads from
///
/// Destroyed when dropped.
pub trait VertexArray {
    /// Backend object name
    fn id(&self) -> u32;
}
