//! CPU-side mesh geometry.
//!
//! `MeshData` holds vertices and optional u32 indices. It never touches the
//! GPU; `SceneMesh` uploads it. Several meshes may share one `MeshData`
//! through `Rc`, and the data lives until the last holder drops it.

use crate::error::{Error, Result, log_error};
use crate::resource::Vertex;

/// Vertex list plus optional index list
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    /// Vertices in buffer order
    pub vertices: Vec<V>,
    /// Indices into `vertices` (None = non-indexed draw)
    pub indices: Option<Vec<u32>>,
}

impl<V> MeshData<V> {
    /// Non-indexed mesh data
    pub fn new(vertices: Vec<V>) -> Self {
        Self { vertices, indices: None }
    }

    /// Indexed mesh data
    pub fn with_indices(vertices: Vec<V>, indices: Vec<u32>) -> Self {
        Self { vertices, indices: Some(indices) }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices (0 when non-indexed)
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Merge `other` into `self`
    ///
    /// Vertices are always appended. Indices are merged only when both sides
    /// are indexed, offset by the vertex count before the merge; if exactly
    /// one side is indexed the index list is left as it was.
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if an offset index would not fit in a u32.
    /// `self` is left untouched in that case.
    pub fn unionize(&mut self, other: &MeshData<V>) -> Result<()>
    where
        V: Clone,
    {
        let offset = match (self.indices.is_some(), other.indices.as_deref()) {
            (true, Some(other_indices)) => Some(offset_indices(self.vertices.len(), other_indices)?),
            _ => None,
        };

        self.vertices.extend_from_slice(&other.vertices);
        if let (Some(indices), Some(offset)) = (self.indices.as_mut(), offset) {
            indices.extend(offset);
        }
        Ok(())
    }
}

/// Shift `indices` by `base` vertices; every result must fit in a u32
pub(crate) fn offset_indices(base: usize, indices: &[u32]) -> Result<Vec<u32>> {
    let overflow = || log_error("prism3d::MeshData", Error::InvalidResource(format!(
        "merged indices overflow u32 (base vertex {})", base
    )));
    let base = u32::try_from(base).map_err(|_| overflow())?;
    indices
        .iter()
        .map(|index| index.checked_add(base).ok_or_else(&overflow))
        .collect()
}

impl<V: Vertex> MeshData<V> {
    /// Vertex bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index bytes for upload (empty when non-indexed)
    pub fn index_bytes(&self) -> &[u8] {
        match &self.indices {
            Some(indices) => bytemuck::cast_slice(indices),
            None => &[],
        }
    }
}

impl<V> Default for MeshData<V> {
    fn default() -> Self {
        Self { vertices: Vec::new(), indices: None }
    }
}

#[cfg(test)]
#[path = "mesh_data_tests.rs"]
mod tests;
