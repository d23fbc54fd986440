/// Tests for MeshData merging and byte views

use super::*;
use crate::resource::PositionVertex;
use glam::Vec3;

fn vertices(count: usize) -> Vec<PositionVertex> {
    (0..count)
        .map(|i| PositionVertex { position: Vec3::splat(i as f32) })
        .collect()
}

// ============================================================================
// unionize
// ============================================================================

#[test]
fn test_unionize_both_indexed_offsets_other_indices() {
    let mut a = MeshData::with_indices(vertices(3), vec![0, 1, 2]);
    let b = MeshData::with_indices(vertices(4), vec![0, 1, 2, 2, 3, 0]);

    a.unionize(&b).unwrap();

    assert_eq!(a.vertex_count(), 7);
    assert_eq!(a.indices, Some(vec![0, 1, 2, 3, 4, 5, 5, 6, 3]));
    assert!(a.indices.as_ref().unwrap().iter().all(|&i| (i as usize) < a.vertex_count()));
}

#[test]
fn test_unionize_only_self_indexed_keeps_indices() {
    let mut a = MeshData::with_indices(vertices(3), vec![2, 1, 0]);
    let b = MeshData::new(vertices(2));

    a.unionize(&b).unwrap();

    assert_eq!(a.vertex_count(), 5);
    assert_eq!(a.indices, Some(vec![2, 1, 0]));
    assert_eq!(a.vertices[3..], b.vertices[..]);
}

#[test]
fn test_unionize_only_other_indexed_stays_non_indexed() {
    let mut a = MeshData::new(vertices(2));
    let b = MeshData::with_indices(vertices(3), vec![0, 1, 2]);

    a.unionize(&b).unwrap();

    assert_eq!(a.vertex_count(), 5);
    assert!(!a.is_indexed());
}

#[test]
fn test_unionize_non_indexed_appends_vertices() {
    let mut a = MeshData::new(vertices(1));
    a.unionize(&MeshData::new(vertices(2))).unwrap();
    assert_eq!(a.vertex_count(), 3);
    assert_eq!(a.index_count(), 0);
}

#[test]
fn test_unionize_with_empty() {
    let mut a = MeshData::with_indices(vertices(3), vec![0, 1, 2]);
    a.unionize(&MeshData::with_indices(Vec::new(), Vec::new())).unwrap();
    assert_eq!(a.vertex_count(), 3);
    assert_eq!(a.index_count(), 3);
}

#[test]
fn test_offset_indices_up_to_u32_max() {
    let base = u32::MAX as usize - 2;
    assert_eq!(offset_indices(base, &[0, 2]).unwrap(), vec![u32::MAX - 2, u32::MAX]);
}

#[test]
fn test_offset_indices_overflow_is_invalid_resource() {
    let base = u32::MAX as usize - 2;
    assert!(matches!(offset_indices(base, &[0, 3]), Err(Error::InvalidResource(_))));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_offset_indices_base_past_u32_range() {
    let base = u32::MAX as usize + 1;
    assert!(matches!(offset_indices(base, &[0]), Err(Error::InvalidResource(_))));
}

// ============================================================================
// Byte views
// ============================================================================

#[test]
fn test_byte_views() {
    let data = MeshData::with_indices(vertices(2), vec![0, 1, 1]);

    assert_eq!(data.vertex_bytes().len(), 2 * 12);
    assert_eq!(data.index_bytes().len(), 3 * 4);
}

#[test]
fn test_index_bytes_empty_when_non_indexed() {
    let data = MeshData::new(vertices(2));
    assert!(data.index_bytes().is_empty());
}

#[test]
fn test_default_is_empty() {
    let data: MeshData<PositionVertex> = MeshData::default();
    assert_eq!(data.vertex_count(), 0);
    assert!(!data.is_indexed());
}
