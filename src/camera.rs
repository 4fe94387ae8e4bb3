//! View/projection state and frustum visibility tests.
//!
//! [`Camera`] pairs a view and projection matrix with a [`Frustum`] derived
//! from their product. The frustum is regenerated synchronously whenever
//! either matrix changes, so visibility queries never observe stale planes.

use bevy::math::bounding::{Aabb3d, BoundingSphere};
use bevy::prelude::*;

/// One frustum boundary plane. Points with `normal · p + d >= 0` are on the
/// visible side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfSpace {
    /// Unit-length plane normal, pointing into the frustum.
    pub normal: Vec3,
    /// Signed distance term of the plane equation.
    pub d: f32,
}

impl HalfSpace {
    /// Builds a half-space from raw plane coefficients `(a, b, c, d)`,
    /// normalizing so distances are in world units.
    fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.truncate();
        let length = normal.length();
        Self {
            normal: normal / length,
            d: coefficients.w / length,
        }
    }

    /// Signed distance from `point` to the plane; positive inside.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }
}

/// Six half-spaces bounding the visible volume of a camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far.
    pub planes: [HalfSpace; 6],
}

impl Frustum {
    /// Extracts the six planes from a combined `projection * view` matrix.
    ///
    /// Assumes glam's right-handed, zero-to-one depth clip convention
    /// (`Mat4::perspective_rh`): side planes come from `row3 ± row{0,1}`,
    /// the near plane from `row2` alone, the far plane from `row3 - row2`.
    pub fn from_view_projection(view_projection: &Mat4) -> Self {
        let row0 = view_projection.row(0);
        let row1 = view_projection.row(1);
        let row2 = view_projection.row(2);
        let row3 = view_projection.row(3);

        Self {
            planes: [
                HalfSpace::from_coefficients(row3 + row0), // left
                HalfSpace::from_coefficients(row3 - row0), // right
                HalfSpace::from_coefficients(row3 + row1), // bottom
                HalfSpace::from_coefficients(row3 - row1), // top
                HalfSpace::from_coefficients(row2),        // near
                HalfSpace::from_coefficients(row3 - row2), // far
            ],
        }
    }

    /// True unless the sphere lies entirely outside some plane. Intersecting
    /// and fully-contained volumes both count as visible.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let center = Vec3::from(sphere.center);
        let radius = sphere.radius();
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) >= -radius)
    }

    /// True unless the box lies entirely outside some plane.
    ///
    /// Per plane, tests the box corner farthest along the plane normal; if
    /// even that corner is outside, the whole box is.
    pub fn intersects_aabb(&self, aabb: &Aabb3d) -> bool {
        let min = Vec3::from(aabb.min);
        let max = Vec3::from(aabb.max);
        self.planes.iter().all(|plane| {
            let farthest = Vec3::new(
                if plane.normal.x >= 0.0 { max.x } else { min.x },
                if plane.normal.y >= 0.0 { max.y } else { min.y },
                if plane.normal.z >= 0.0 { max.z } else { min.z },
            );
            plane.signed_distance(farthest) >= 0.0
        })
    }
}

/// View/projection pair with an always-consistent derived frustum.
///
/// Both matrices start as identity. Every write through [`Camera::set_view`]
/// or [`Camera::set_projection`] regenerates the frustum before returning;
/// there is no deferred recomputation.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    view: Mat4,
    projection: Mat4,
    frustum: Frustum,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a camera with identity view and projection matrices.
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            frustum: Frustum::from_view_projection(&Mat4::IDENTITY),
        }
    }

    /// Current view matrix.
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Current projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Frustum derived from the latest `projection * view` product.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Replaces the view matrix and regenerates the frustum.
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.regenerate_frustum();
    }

    /// Replaces the projection matrix and regenerates the frustum.
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        self.regenerate_frustum();
    }

    /// Installs a right-handed perspective projection
    /// (`Mat4::perspective_rh`, zero-to-one depth).
    pub fn set_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.set_projection(Mat4::perspective_rh(fov_y, aspect, near, far));
    }

    fn regenerate_frustum(&mut self) {
        self.frustum = Frustum::from_view_projection(&(self.projection * self.view));
    }

    /// Visibility test against a bounding sphere.
    pub fn sphere_in_view(&self, sphere: &BoundingSphere) -> bool {
        self.frustum.intersects_sphere(sphere)
    }

    /// Visibility test against an axis-aligned bounding box.
    pub fn aabb_in_view(&self, aabb: &Aabb3d) -> bool {
        self.frustum.intersects_aabb(aabb)
    }
}
