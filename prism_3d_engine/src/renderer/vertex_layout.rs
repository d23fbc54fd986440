/// Vertex layout description and primitive topology

/// Format of a single vertex attribute (32-bit float components)
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferFormat {
    /// float
    R32_SFLOAT,
    /// vec2
    R32G32_SFLOAT,
    /// vec3
    R32G32B32_SFLOAT,
    /// vec4
    R32G32B32A32_SFLOAT,
}

impl BufferFormat {
    /// Number of float components
    pub fn component_count(self) -> u32 {
        match self {
            BufferFormat::R32_SFLOAT => 1,
            BufferFormat::R32G32_SFLOAT => 2,
            BufferFormat::R32G32B32_SFLOAT => 3,
            BufferFormat::R32G32B32A32_SFLOAT => 4,
        }
    }

    /// Size in bytes
    pub fn size(self) -> u32 {
        self.component_count() * 4
    }
}

/// One attribute inside an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader location
    pub location: u32,
    /// Component format
    pub format: BufferFormat,
    /// Byte offset inside the vertex
    pub offset: u32,
}

/// Interleaved vertex layout (single binding)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Byte size of one vertex
    pub stride: u32,
    /// Attributes, in location order
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Build a tightly packed layout from formats; locations are 0..n
    pub fn packed(formats: &[BufferFormat]) -> Self {
        let mut offset = 0;
        let attributes = formats
            .iter()
            .enumerate()
            .map(|(location, &format)| {
                let attribute = VertexAttribute {
                    location: location as u32,
                    format,
                    offset,
                };
                offset += format.size();
                attribute
            })
            .collect();

        Self { stride: offset, attributes }
    }
}

/// Primitive topology used for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    Points,
    Lines,
    LineStrip,
    LinesAdjacency,
    LineStripAdjacency,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
    /// Tessellation patches; vertices per patch come from the scene configuration
    Patches,
}

impl PrimitiveTopology {
    /// Whether line width applies to this topology
    pub fn is_line(self) -> bool {
        matches!(
            self,
            PrimitiveTopology::Lines
                | PrimitiveTopology::LineStrip
                | PrimitiveTopology::LinesAdjacency
                | PrimitiveTopology::LineStripAdjacency
        )
    }
}
