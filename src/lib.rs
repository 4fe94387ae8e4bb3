//! Heightmap terrain, free-flight camera, and billboard particles for Bevy.
//!
//! The crate owns the CPU-side engine of an interactive terrain demo and
//! hands finished geometry and draw parameters to Bevy:
//!
//! - **Height queries**: [`HeightField`] stores world-space heights decoded
//!   from a normalized heightmap and answers continuous height/steepness
//!   queries with boundary clamping.
//! - **Mesh generation**: [`TerrainMeshBuilder`] triangulates a `HeightField`
//!   into a [`TerrainMesh`] with smooth averaged normals, convertible to a
//!   Bevy [`Mesh`](bevy::prelude::Mesh).
//! - **Camera pipeline**: [`Camera`] keeps a [`Frustum`] in lockstep with its
//!   view/projection matrices for sphere and AABB visibility tests;
//!   [`FreeCamera`] drives it from yaw/pitch/translation input.
//! - **Billboards**: [`BillboardSystem`] simulates camera-facing quads with a
//!   fall/respawn loop and exposes per-frame orientation vectors and draw
//!   passes, plus ECS glue ([`BillboardSettings`], [`sync_billboard_mesh`])
//!   to keep the GPU mesh current.
//!
//! # Feature Flags
//!
//! - `physics`: Enables [`collider`] and [`collider::build_heightfield_collider`]
//!   for Avian3D integration.
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_veldt::{HeightField, TerrainMeshBuilder};
//!
//! fn setup(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//! ) {
//!     let samples = vec![0.0; 128 * 128]; // decoded heightmap intensities
//!     let field = HeightField::from_normalized(&samples, 128, 128, 1.0, 60.0);
//!     let terrain = TerrainMeshBuilder::new().build(&field);
//!
//!     commands.spawn((
//!         Mesh3d(meshes.add(terrain.to_mesh())),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//! }
//! ```
//!
//! Simulation is frame-synchronous: tick the billboards and update the camera
//! before any visibility query or mesh sync that frame. Nothing here spawns
//! threads or blocks.

pub mod billboard;
pub mod camera;
pub mod free_camera;
pub mod heightfield;
pub mod mesher;

#[cfg(feature = "physics")]
pub mod collider;

pub use billboard::{
    AlphaTest, BillboardMeshHandle, BillboardMode, BillboardRenderData, BillboardSettings,
    BillboardSystem, BillboardVertex, DepthMode, DrawPass, scatter_cloud_positions,
    sync_billboard_mesh,
};
pub use camera::{Camera, Frustum, HalfSpace};
pub use free_camera::FreeCamera;
pub use heightfield::{HeightField, HeightSample};
pub use mesher::{TerrainMesh, TerrainMeshBuilder};

#[cfg(feature = "physics")]
pub use collider::build_heightfield_collider;
