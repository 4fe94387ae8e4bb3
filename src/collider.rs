//! Avian3D physics collider generation from [`HeightField`] data.
//!
//! Provides [`build_heightfield_collider`] which converts a [`HeightField`]
//! into an Avian3D `Collider::heightfield` — the cheapest collision shape for
//! static terrain, and the physics-side counterpart of
//! [`HeightField::sample`](crate::HeightField::sample) for contact queries.

use avian3d::prelude::Collider;
use bevy::prelude::*;

use crate::heightfield::HeightField;

/// Builds an Avian3D `Collider::heightfield` from a [`HeightField`].
///
/// The collider is centered at the origin of its local space, matching the
/// centered mesh produced by
/// [`TerrainMeshBuilder`](crate::TerrainMeshBuilder) at `world_scale = 1.0`.
/// For other scales, scale the entity's `Transform` to match.
///
/// # Example
///
/// ```ignore
/// use bevy_veldt::{HeightField, build_heightfield_collider};
///
/// let field = HeightField::from_normalized(&samples, 64, 64, 1.0, 30.0);
/// let collider = build_heightfield_collider(&field);
/// // commands.spawn((collider, ...));
/// ```
pub fn build_heightfield_collider(field: &HeightField) -> Collider {
    // Avian's 3D heightfield expects `heights[row][col]` where:
    //   rows → subdivisions along X axis (width)
    //   cols → subdivisions along Z axis (height)
    // HeightField stores data[z * width + x], so we transpose accordingly.
    let heights: Vec<Vec<f32>> = (0..field.width())
        .map(|x| (0..field.height()).map(|z| field.get(x, z)).collect())
        .collect();

    // `scale` is the total world extent on each axis. Y scale = 1.0 because
    // heights are already in world units.
    let scale = Vec3::new(field.world_width(), 1.0, field.world_depth());

    Collider::heightfield(heights, scale)
}
