//! Terrain mesh generation from [`HeightField`] data.
//!
//! Converts a [`HeightField`] into a [`TerrainMesh`] with:
//! - one vertex per height sample, grid centered at the world origin
//! - two triangles per grid cell with consistent winding
//! - smooth per-vertex normals (face normals averaged at each vertex)
//! - stretch UV coordinates (`x/width`, `z/height`)

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::heightfield::HeightField;

/// CPU-side triangulated terrain grid, ready for upload.
///
/// Holds flat vertex and index lists only; no GPU resources. Convert to a
/// Bevy [`Mesh`] with [`TerrainMesh::to_mesh`] when handing off to the
/// renderer.
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    /// Vertex positions, one per height sample.
    pub positions: Vec<[f32; 3]>,
    /// Unit-length smooth normals, parallel to `positions`.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates in `[0, 1]`, parallel to `positions`.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list, 6 indices per grid cell.
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Builds a Bevy `TriangleList` mesh with POSITION, NORMAL, and UV_0.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs.clone());
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }
}

/// Builds a [`TerrainMesh`] from a [`HeightField`].
///
/// The grid is centered at the world origin in the XZ plane, heights along Y,
/// then uniformly scaled by `world_scale`.
///
/// # Example
///
/// ```ignore
/// use bevy_veldt::{HeightField, TerrainMeshBuilder};
///
/// let field = HeightField::from_normalized(&samples, 128, 128, 1.0, 60.0);
/// let terrain = TerrainMeshBuilder::new()
///     .with_world_scale(50.0)
///     .build(&field);
/// let mesh = terrain.to_mesh();
/// ```
pub struct TerrainMeshBuilder {
    world_scale: f32,
}

impl Default for TerrainMeshBuilder {
    fn default() -> Self {
        Self { world_scale: 1.0 }
    }
}

impl TerrainMeshBuilder {
    /// Creates a new builder with default settings (`world_scale = 1.0`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the uniform scale applied to every vertex position.
    /// Clamped to a positive minimum so the mesh cannot collapse.
    pub fn with_world_scale(mut self, scale: f32) -> Self {
        self.world_scale = scale.max(f32::EPSILON);
        self
    }

    /// Builds the mesh from the given height field, one vertex per sample.
    ///
    /// # Panics
    ///
    /// Panics if the field is smaller than 2×2, as at least one cell is
    /// required to produce valid triangle geometry.
    pub fn build(&self, field: &HeightField) -> TerrainMesh {
        assert!(
            field.width() >= 2 && field.height() >= 2,
            "HeightField must be at least 2×2 to generate a mesh (got {}×{})",
            field.width(),
            field.height()
        );

        let w = field.width();
        let h = field.height();
        let cell = field.cell_size();

        let offset_to_center = Vec3::new(
            -(w as f32 / 2.0) * cell,
            0.0,
            -(h as f32 / 2.0) * cell,
        );

        let vertex_count = w * h;
        let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
        let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);

        for z in 0..h {
            for x in 0..w {
                let local = Vec3::new(x as f32 * cell, field.get(x, z), z as f32 * cell);
                let position = (local + offset_to_center) * self.world_scale;

                positions.push(position.to_array());
                uvs.push([x as f32 / w as f32, z as f32 / h as f32]);
            }
        }

        // Each cell (x, z) → (x+1, z+1) emits two triangles:
        //   ul──ur
        //   │╲  │     Triangle 1: ul, ur, ll
        //   │ ╲ │     Triangle 2: ll, ur, lr
        //   ll──lr
        let cell_count = (w - 1) * (h - 1);
        let mut indices: Vec<u32> = Vec::with_capacity(cell_count * 6);

        for x in 0..(w - 1) {
            for z in 0..(h - 1) {
                let upper_left = (z * w + x) as u32;
                let upper_right = upper_left + 1;
                let lower_left = upper_left + w as u32;
                let lower_right = lower_left + 1;

                indices.push(upper_left);
                indices.push(upper_right);
                indices.push(lower_left);

                indices.push(lower_left);
                indices.push(upper_right);
                indices.push(lower_right);
            }
        }

        // Smooth normals: normalize each triangle's face normal, add it to
        // the accumulator of each of its three vertices, then normalize every
        // accumulator exactly once. Adjacent faces blend into Phong-style
        // shading across the grid.
        let mut normals: Vec<Vec3> = vec![Vec3::ZERO; vertex_count];

        for tri in indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = Vec3::from(positions[i0]);
            let p1 = Vec3::from(positions[i1]);
            let p2 = Vec3::from(positions[i2]);

            // Triangles wind clockwise seen from above, so cross the edges in
            // reverse order to keep face normals pointing +Y on flat ground.
            let face_normal = (p2 - p0).cross(p1 - p0).normalize_or_zero();

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        let normals: Vec<[f32; 3]> = normals
            .iter()
            .map(|n| {
                let len = n.length();
                // Degenerate vertex (zero contributions): default to +Y.
                if len > f32::EPSILON { (*n / len).into() } else { [0.0, 1.0, 0.0] }
            })
            .collect();

        TerrainMesh {
            positions,
            normals,
            uvs,
            indices,
        }
    }
}
