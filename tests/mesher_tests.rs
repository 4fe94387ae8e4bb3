use bevy::prelude::*;
use bevy_veldt::{HeightField, TerrainMeshBuilder};

fn flat_field(w: usize, h: usize, cell: f32) -> HeightField {
    HeightField::from_normalized(&vec![0.0; w * h], w, h, cell, 10.0)
}

fn ramp_field(w: usize, h: usize, cell: f32) -> HeightField {
    let samples: Vec<f32> = (0..w * h)
        .map(|i| (i % w) as f32 / (w - 1) as f32)
        .collect();
    HeightField::from_normalized(&samples, w, h, cell, 10.0)
}

#[test]
fn vertex_count_matches_dimensions() {
    let field = flat_field(4, 4, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    assert_eq!(terrain.vertex_count(), 16);
    assert_eq!(terrain.normals.len(), 16);
    assert_eq!(terrain.uvs.len(), 16);
}

#[test]
fn index_count_matches_cells() {
    let field = flat_field(5, 7, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    // (w-1)*(h-1) cells × 2 triangles × 3 indices
    assert_eq!(terrain.indices.len(), (5 - 1) * (7 - 1) * 6);
    assert_eq!(terrain.triangle_count(), (5 - 1) * (7 - 1) * 2);
}

#[test]
fn four_by_four_example_counts() {
    let field = flat_field(4, 4, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    assert_eq!(terrain.vertex_count(), 16);
    assert_eq!(terrain.indices.len(), 54);
}

#[test]
fn every_index_addresses_a_vertex() {
    let field = flat_field(6, 5, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    let vertex_count = terrain.vertex_count() as u32;
    for &index in &terrain.indices {
        assert!(index < vertex_count, "index {index} >= {vertex_count}");
    }
}

#[test]
fn flat_normals_point_up() {
    let field = flat_field(4, 4, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    for n in &terrain.normals {
        assert!(
            n[1] > 0.99,
            "flat terrain normal y should be ~1.0, got {:?}",
            n
        );
    }
}

#[test]
fn ramp_normals_are_unit_length() {
    let field = ramp_field(8, 8, 2.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    for n in &terrain.normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!(
            (len - 1.0).abs() < 1e-5,
            "normal should be unit length, got length {len} for {:?}",
            n
        );
    }
}

#[test]
fn ramp_normals_have_x_component() {
    let field = ramp_field(8, 8, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    // Interior vertex on an X-slope must tilt away from vertical.
    let interior = terrain.normals[8 + 4]; // z=1, x=4
    assert!(
        interior[0].abs() > 0.01,
        "ramp normal should have X component, got {:?}",
        interior
    );
}

#[test]
fn grid_is_centered_at_origin() {
    // 4×4 cells of size 1 → offset (-2, 0, -2), so the first vertex sits at
    // (-2, 0, -2) and the far corner at (1, 0, 1).
    let field = flat_field(4, 4, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    assert_eq!(terrain.positions[0], [-2.0, 0.0, -2.0]);
    assert_eq!(*terrain.positions.last().unwrap(), [1.0, 0.0, 1.0]);
}

#[test]
fn world_scale_multiplies_positions() {
    let field = flat_field(4, 4, 1.0);
    let terrain = TerrainMeshBuilder::new().with_world_scale(50.0).build(&field);
    assert_eq!(terrain.positions[0], [-100.0, 0.0, -100.0]);
    assert_eq!(*terrain.positions.last().unwrap(), [50.0, 0.0, 50.0]);
}

#[test]
fn positions_encode_height_data() {
    let mut samples = vec![0.0; 9];
    samples[4] = 0.5; // center of a 3×3 grid
    let field = HeightField::from_normalized(&samples, 3, 3, 1.0, 10.0);
    let terrain = TerrainMeshBuilder::new().build(&field);

    // Vertex (x=1, z=1) is index z*w+x = 4; height = 0.5 * 10.
    assert_eq!(terrain.positions[4][1], 5.0);
}

#[test]
fn uvs_span_the_unit_square() {
    let field = flat_field(4, 8, 1.0);
    let terrain = TerrainMeshBuilder::new().build(&field);
    assert_eq!(terrain.uvs[0], [0.0, 0.0]);
    for uv in &terrain.uvs {
        assert!((0.0..=1.0).contains(&uv[0]) && (0.0..=1.0).contains(&uv[1]));
    }
    // UV = (x/width, z/height)
    assert_eq!(*terrain.uvs.last().unwrap(), [3.0 / 4.0, 7.0 / 8.0]);
}

#[test]
fn to_mesh_has_all_required_attributes() {
    let field = flat_field(4, 4, 1.0);
    let mesh = TerrainMeshBuilder::new().build(&field).to_mesh();
    assert!(
        mesh.attribute(Mesh::ATTRIBUTE_POSITION).is_some(),
        "missing POSITION"
    );
    assert!(
        mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some(),
        "missing NORMAL"
    );
    assert!(
        mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some(),
        "missing UV_0"
    );
    assert_eq!(mesh.indices().expect("mesh must have indices").len(), 54);
}

#[test]
#[should_panic]
fn panics_on_1x1_field() {
    let field = flat_field(1, 1, 1.0);
    TerrainMeshBuilder::new().build(&field);
}
