//! Camera-facing billboard quads with a fall/respawn simulation.
//!
//! A [`BillboardSystem`] owns a fixed set of quads, four vertices sharing one
//! center each. [`BillboardSystem::tick`] drifts every quad downward with a
//! fresh random velocity per tick and respawns quads that sink below a floor
//! threshold, producing a looping rain/cloud effect. Per frame it hands the
//! renderer its vertex data plus the orientation vectors and draw passes
//! needed to expand and composite the quads.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;
use rand::Rng;

use crate::free_camera::FreeCamera;

/// Height below which a quad is considered fallen out of the scene.
pub const DEFAULT_FLOOR_HEIGHT: f32 = 5_000.0;
/// Height a fallen quad is reset to, well above the scene.
pub const DEFAULT_RESPAWN_HEIGHT: f32 = 100_000.0;

/// Corner UVs for one quad, in emission order.
const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];

/// How quads orient toward the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BillboardMode {
    /// Locked to world-up; only swivels around the Y axis.
    Cylindrical,
    /// Fully camera-facing, using the camera's up and right vectors.
    #[default]
    Spherical,
}

/// One corner of a billboard quad. All four corners of a quad share the same
/// position; the screen-space offset is applied by the vertex shader from the
/// quad half-size and the camera basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BillboardVertex {
    /// Quad center in world space.
    pub position: Vec3,
    /// Corner UV, selects which direction the shader expands this vertex.
    pub uv: Vec2,
}

/// Depth pipeline state for one draw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthMode {
    /// Depth test and depth write.
    ReadWrite,
    /// Depth test only.
    ReadOnly,
}

/// Alpha-test pipeline state for one draw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaTest {
    /// No alpha test; every fragment blends.
    Off,
    /// Keep fragments above the alpha cutoff (opaque cores).
    KeepGreater,
    /// Keep fragments below the alpha cutoff (soft fringes).
    KeepLesser,
}

/// One indexed draw over the whole billboard mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawPass {
    pub depth: DepthMode,
    pub alpha_test: AlphaTest,
}

/// Opaque cores first with depth writes, then soft fringes depth-tested only.
/// Keeps quads occluding each other correctly without sorting.
const OCCLUSION_PASSES: &[DrawPass] = &[
    DrawPass {
        depth: DepthMode::ReadWrite,
        alpha_test: AlphaTest::KeepGreater,
    },
    DrawPass {
        depth: DepthMode::ReadOnly,
        alpha_test: AlphaTest::KeepLesser,
    },
];

/// Single unsorted pass for callers that opt out of exact occlusion.
const UNSORTED_PASSES: &[DrawPass] = &[DrawPass {
    depth: DepthMode::ReadOnly,
    alpha_test: AlphaTest::Off,
}];

/// Everything the renderer needs to draw the system this frame.
#[derive(Clone, Copy, Debug)]
pub struct BillboardRenderData {
    /// Half the quad size, the shader's expansion distance per corner.
    pub half_size: Vec2,
    /// Expansion up vector: camera up in spherical mode, world up in
    /// cylindrical mode.
    pub up: Vec3,
    /// Expansion right vector, always the camera's.
    pub right: Vec3,
    /// Draw passes to submit, in order.
    pub passes: &'static [DrawPass],
}

/// Fixed set of billboard quads with shared size, texture, and orientation.
pub struct BillboardSystem {
    vertices: Vec<BillboardVertex>,
    indices: Vec<u32>,
    quad_size: Vec2,
    texture: Handle<Image>,
    floor_height: f32,
    respawn_height: f32,
    /// Orientation mode used when building render data.
    pub mode: BillboardMode,
    /// When true, [`BillboardSystem::render_data`] requests the two-pass
    /// opaque/transparent sequence instead of a single unsorted pass.
    pub ensure_occlusion: bool,
}

impl BillboardSystem {
    /// Creates one quad per entry in `centers`: four vertices at the center
    /// position and six indices forming two triangles.
    ///
    /// # Panics
    ///
    /// Panics if `centers` is empty or `quad_size` is not strictly positive
    /// on both axes.
    pub fn new(
        quad_size: Vec2,
        centers: &[Vec3],
        texture: Handle<Image>,
        mode: BillboardMode,
    ) -> Self {
        assert!(
            !centers.is_empty(),
            "BillboardSystem needs at least one particle position"
        );
        assert!(
            quad_size.x > 0.0 && quad_size.y > 0.0,
            "quad_size must be positive on both axes, got {quad_size}"
        );

        let mut vertices = Vec::with_capacity(centers.len() * 4);
        let mut indices = Vec::with_capacity(centers.len() * 6);

        for (quad, center) in centers.iter().enumerate() {
            let base = (quad * 4) as u32;

            for uv in QUAD_UVS {
                vertices.push(BillboardVertex {
                    position: *center,
                    uv,
                });
            }

            // Two triangles: (0, 3, 2) and (2, 1, 0) within the quad.
            indices.extend_from_slice(&[
                base,
                base + 3,
                base + 2,
                base + 2,
                base + 1,
                base,
            ]);
        }

        Self {
            vertices,
            indices,
            quad_size,
            texture,
            floor_height: DEFAULT_FLOOR_HEIGHT,
            respawn_height: DEFAULT_RESPAWN_HEIGHT,
            mode,
            ensure_occlusion: true,
        }
    }

    /// Overrides the fall band: quads sinking below `floor` reset to
    /// `respawn`.
    ///
    /// # Panics
    ///
    /// Panics if `respawn <= floor`, which would respawn quads already fallen.
    pub fn with_fall_band(mut self, floor: f32, respawn: f32) -> Self {
        assert!(
            respawn > floor,
            "respawn height {respawn} must lie above the floor {floor}"
        );
        self.floor_height = floor;
        self.respawn_height = respawn;
        self
    }

    /// Number of quads in the system.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Current vertex data, four entries per quad.
    pub fn vertices(&self) -> &[BillboardVertex] {
        &self.vertices
    }

    /// Triangle list, six indices per quad.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Shared quad dimensions.
    pub fn quad_size(&self) -> Vec2 {
        self.quad_size
    }

    /// Texture shared by every quad.
    pub fn texture(&self) -> &Handle<Image> {
        &self.texture
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Every quad draws a fresh random velocity each tick — `x, z ∈ [0, 2)`,
    /// `y ∈ (-25, 0]` — so the motion is stochastic downward drift rather
    /// than integrated ballistic fall. Each of the quad's four vertices moves
    /// exactly once by `velocity * dt`; quads whose height drops below the
    /// floor snap to the respawn height and fall again.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        for quad in self.vertices.chunks_exact_mut(4) {
            let velocity = Vec3::new(
                rng.gen_range(0.0..2.0),
                -rng.gen_range(0.0..25.0),
                rng.gen_range(0.0..2.0),
            );
            let step = velocity * dt;

            for vertex in quad.iter_mut() {
                vertex.position += step;
            }

            // All four corners share one center, so one height check covers
            // the quad.
            if quad[0].position.y < self.floor_height {
                for vertex in quad.iter_mut() {
                    vertex.position.y = self.respawn_height;
                }
            }
        }
    }

    /// Orientation vectors and draw passes for this frame.
    pub fn render_data(&self, camera: &FreeCamera) -> BillboardRenderData {
        BillboardRenderData {
            half_size: self.quad_size / 2.0,
            up: match self.mode {
                BillboardMode::Spherical => camera.up(),
                BillboardMode::Cylindrical => Vec3::Y,
            },
            right: camera.right(),
            passes: if self.ensure_occlusion {
                OCCLUSION_PASSES
            } else {
                UNSORTED_PASSES
            },
        }
    }

    /// Builds the initial Bevy mesh: POSITION, UV_0, and indices. Normals are
    /// not needed; the billboard shader orients quads from the camera basis.
    pub fn build_mesh(&self) -> Mesh {
        let positions: Vec<[f32; 3]> = self
            .vertices
            .iter()
            .map(|v| v.position.to_array())
            .collect();
        let uvs: Vec<[f32; 2]> = self.vertices.iter().map(|v| v.uv.to_array()).collect();

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }

    /// Overwrites the POSITION attribute of `mesh` with the current vertex
    /// positions. No-op if the mesh has no `Float32x3` POSITION attribute or
    /// was built for a different quad count.
    pub fn write_positions(&self, mesh: &mut Mesh) {
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
        else {
            return;
        };
        if positions.len() != self.vertices.len() {
            return;
        }

        for (slot, vertex) in positions.iter_mut().zip(&self.vertices) {
            *slot = vertex.position.to_array();
        }
    }
}

/// Scatters cloud quad centers over the terrain: cluster anchors spread wide
/// and high, each jittered into place.
///
/// Anchors land at `x, z ∈ [-8000, 8000)`, `y ∈ [5000, 7000)`, all scaled by
/// 40, with a local offset of `x ∈ [-3000, 3000)`, `y ∈ [-300, 900)`,
/// `z ∈ [-1500, 1500)`.
pub fn scatter_cloud_positions(count: usize, rng: &mut impl Rng) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(count);

    for _ in 0..count {
        let anchor = Vec3::new(
            rng.gen_range(-8_000..8_000) as f32,
            rng.gen_range(5_000..7_000) as f32,
            rng.gen_range(-8_000..8_000) as f32,
        ) * 40.0;

        let jitter = Vec3::new(
            rng.gen_range(-3_000..3_000) as f32,
            rng.gen_range(-300..900) as f32,
            rng.gen_range(-1_500..1_500) as f32,
        );

        positions.push(anchor + jitter);
    }

    positions
}

/// Resource holding a [`BillboardSystem`] and whether its vertex data has
/// changed since the last GPU sync.
///
/// Tick through [`BillboardSettings::tick`] so the dirty flag is maintained,
/// and add [`sync_billboard_mesh`] to the `Update` schedule to re-upload.
#[derive(Resource)]
pub struct BillboardSettings {
    /// The simulated system. Replace or reconfigure to change the effect.
    pub system: BillboardSystem,
    dirty: bool,
}

impl BillboardSettings {
    /// Wraps a system; the mesh is uploaded on the next
    /// [`sync_billboard_mesh`] run.
    pub fn new(system: BillboardSystem) -> Self {
        Self {
            system,
            dirty: true,
        }
    }

    /// Advances the simulation and marks the vertex data for re-upload.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        self.system.tick(dt, rng);
        self.dirty = true;
    }

    /// Forces a re-upload on the next [`sync_billboard_mesh`] run.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Resource holding the GPU-side billboard mesh handle.
///
/// Insert alongside [`BillboardSettings`], with the handle obtained from
/// `meshes.add(settings.system.build_mesh())`.
#[derive(Resource)]
pub struct BillboardMeshHandle {
    /// Handle to the mesh asset the renderer draws.
    pub handle: Handle<Mesh>,
}

/// Bevy system that re-uploads billboard vertex positions when
/// [`BillboardSettings`] is marked dirty.
///
/// Add to your `Update` schedule after the system that ticks the simulation.
/// Only writes when data has changed, so it is safe to run every frame.
pub fn sync_billboard_mesh(
    mut settings: ResMut<BillboardSettings>,
    billboard_mesh: Res<BillboardMeshHandle>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !settings.dirty {
        return;
    }
    settings.dirty = false;

    let Some(mesh) = meshes.get_mut(&billboard_mesh.handle) else {
        return;
    };

    settings.system.write_positions(mesh);
}
