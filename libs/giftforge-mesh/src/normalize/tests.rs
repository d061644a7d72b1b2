//! Tests for the geometry normalizer.

use super::*;

fn quad_positions() -> Vec<f32> {
    vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ]
}

#[test]
fn indexed_quad_is_de_indexed() {
    let primitive =
        RawPrimitive::new(PositionBuffer::packed(quad_positions())).with_indices(vec![0, 1, 2, 0, 2, 3]);
    let flat = normalize(&RawMesh::single("quad", primitive)).expect("normalizes");

    assert_eq!(flat.vertex_count(), 6);
    let tris: Vec<_> = flat.triangles().collect();
    assert_eq!(tris[0], [DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 0.0)]);
    assert_eq!(tris[1], [DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0), DVec3::new(0.0, 1.0, 0.0)]);
}

#[test]
fn non_indexed_passes_through() {
    let data = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
    let flat = normalize(&RawMesh::single("tri", RawPrimitive::new(PositionBuffer::packed(data))))
        .expect("normalizes");
    assert_eq!(flat.as_slice(), &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn interleaved_buffer_is_rebuilt() {
    // position (3) + normal (3) per vertex, positions first.
    let data = vec![
        0.0, 0.0, 0.0, 0.0, 0.0, 1.0, //
        2.0, 0.0, 0.0, 0.0, 0.0, 1.0, //
        0.0, 2.0, 0.0, 0.0, 0.0, 1.0,
    ];
    let primitive = RawPrimitive::new(PositionBuffer::interleaved(data, 6, 0));
    let flat = normalize(&RawMesh::single("interleaved", primitive)).expect("normalizes");
    assert_eq!(flat.as_slice(), &[0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
}

#[test]
fn interleaved_buffer_with_offset_is_rebuilt() {
    // uv (2) + position (3) per vertex.
    let data = vec![
        9.0, 9.0, 1.0, 2.0, 3.0, //
        9.0, 9.0, 4.0, 5.0, 6.0, //
        9.0, 9.0, 7.0, 8.0, 9.5,
    ];
    let primitive = RawPrimitive::new(PositionBuffer::interleaved(data, 5, 2));
    let flat = normalize(&RawMesh::single("uv-first", primitive)).expect("normalizes");
    assert_eq!(flat.vertex(2), DVec3::new(7.0, 8.0, 9.5));
}

#[test]
fn stride_too_small_is_rejected() {
    let primitive = RawPrimitive::new(PositionBuffer::interleaved(vec![0.0; 12], 2, 0));
    let err = normalize(&RawMesh::single("bad", primitive)).unwrap_err();
    assert!(matches!(err, MeshError::UnsupportedGeometryFormat { .. }));
}

#[test]
fn ragged_interleaved_buffer_is_rejected() {
    let primitive = RawPrimitive::new(PositionBuffer::interleaved(vec![0.0; 20], 6, 0));
    let err = normalize(&RawMesh::single("ragged", primitive)).unwrap_err();
    assert!(err.to_string().contains("whole number"));
}

#[test]
fn two_component_positions_are_rejected() {
    let mut buffer = PositionBuffer::packed(vec![0.0; 6]);
    buffer.item_size = 2;
    buffer.stride = 2;
    let err = normalize(&RawMesh::single("flat2d", RawPrimitive::new(buffer))).unwrap_err();
    assert!(err.to_string().contains("item size"));
}

#[test]
fn quantized_positions_are_rejected() {
    let mut buffer = PositionBuffer::packed(vec![0.0; 9]);
    buffer.normalized = true;
    let err = normalize(&RawMesh::single("quantized", RawPrimitive::new(buffer))).unwrap_err();
    assert!(matches!(err, MeshError::UnsupportedGeometryFormat { .. }));
}

#[test]
fn out_of_range_index_is_rejected() {
    let primitive =
        RawPrimitive::new(PositionBuffer::packed(quad_positions())).with_indices(vec![0, 1, 4]);
    let err = normalize(&RawMesh::single("oob", primitive)).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn partial_index_triangle_is_rejected() {
    let primitive =
        RawPrimitive::new(PositionBuffer::packed(quad_positions())).with_indices(vec![0, 1, 2, 3]);
    assert!(normalize(&RawMesh::single("partial", primitive)).is_err());
}

#[test]
fn dangling_vertices_are_rejected() {
    let primitive = RawPrimitive::new(PositionBuffer::packed(quad_positions()));
    let err = normalize(&RawMesh::single("dangling", primitive)).unwrap_err();
    assert!(err.to_string().contains("multiple of 3"));
}

#[test]
fn nan_position_is_rejected() {
    let mut data = vec![0.0; 9];
    data[5] = f32::NAN;
    let err = normalize(&RawMesh::single("nan", RawPrimitive::new(PositionBuffer::packed(data))))
        .unwrap_err();
    assert!(err.to_string().contains("non-finite"));
}

#[test]
fn error_names_the_failing_primitive() {
    let mut mesh = RawMesh::new("two-parts");
    mesh.push(RawPrimitive::new(PositionBuffer::packed(vec![0.0; 9])));
    mesh.push(RawPrimitive::new(PositionBuffer::interleaved(vec![0.0; 9], 1, 0)));
    let err = normalize(&mesh).unwrap_err();
    assert!(err.to_string().contains("primitive 1"));
}

#[test]
fn world_transform_is_baked() {
    let data = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let primitive = RawPrimitive::new(PositionBuffer::packed(data))
        .with_world(DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0)));
    let flat = normalize(&RawMesh::single("moved", primitive)).expect("normalizes");
    assert_eq!(flat.vertex(0), DVec3::new(0.0, 0.0, 5.0));
}

#[test]
fn mirrored_world_transform_keeps_winding() {
    let data = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let plain = normalize(&RawMesh::single(
        "plain",
        RawPrimitive::new(PositionBuffer::packed(data.clone())),
    ))
    .expect("normalizes");
    let mirrored = normalize(&RawMesh::single(
        "mirrored",
        RawPrimitive::new(PositionBuffer::packed(data))
            .with_world(DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0))),
    ))
    .expect("normalizes");

    let normal = |t: [DVec3; 3]| (t[1] - t[0]).cross(t[2] - t[0]).normalize();
    let before = normal(plain.triangles().next().expect("one triangle"));
    let after = normal(mirrored.triangles().next().expect("one triangle"));
    // Reflection across X keeps a +Z facing triangle facing +Z.
    assert_eq!(before, DVec3::Z);
    assert_eq!(after, DVec3::Z);
}

#[test]
fn infinite_world_transform_is_rejected() {
    let primitive = RawPrimitive::new(PositionBuffer::packed(vec![0.0; 9]))
        .with_world(DMat4::from_scale(DVec3::new(f64::INFINITY, 1.0, 1.0)));
    assert!(normalize(&RawMesh::single("inf", primitive)).is_err());
}

#[test]
fn primitives_are_concatenated_in_order() {
    let mut mesh = RawMesh::new("parts");
    mesh.push(RawPrimitive::new(PositionBuffer::packed(vec![1.0; 9])));
    mesh.push(RawPrimitive::new(PositionBuffer::packed(vec![2.0; 9])));
    let flat = normalize(&mesh).expect("normalizes");
    assert_eq!(flat.triangle_count(), 2);
    assert_eq!(flat.vertex(0), DVec3::splat(1.0));
    assert_eq!(flat.vertex(3), DVec3::splat(2.0));
}

#[test]
fn degenerate_triangles_pass_through() {
    let primitive = RawPrimitive::new(PositionBuffer::packed(vec![1.0; 9]));
    let flat = normalize(&RawMesh::single("sliver", primitive)).expect("normalizes");
    assert_eq!(flat.triangle_count(), 1);
}

#[test]
fn empty_mesh_normalizes_to_empty_list() {
    let flat = normalize(&RawMesh::new("nothing")).expect("normalizes");
    assert!(flat.is_empty());
}

#[test]
fn mesh_id_round_trips_through_display() {
    let id = MeshId::new("https://cdn.example/gift.glb");
    assert_eq!(id.to_string(), id.as_str());
}
