//! Yaw/pitch fly camera built on [`Camera`].
//!
//! Input accumulates between frames ([`FreeCamera::rotate`],
//! [`FreeCamera::move_by`]); [`FreeCamera::update`] is the single point where
//! the pending translation lands and the derived basis vectors and view
//! matrix are recomputed.

use bevy::math::bounding::{Aabb3d, BoundingSphere};
use bevy::prelude::*;

use crate::camera::{Camera, Frustum};

/// Free-flight camera driven by yaw/pitch rotation and relative translation.
#[derive(Clone, Copy, Debug)]
pub struct FreeCamera {
    camera: Camera,
    /// World-space camera position. Applied translations land here on
    /// [`FreeCamera::update`].
    pub position: Vec3,
    /// Heading around the world Y axis, radians.
    pub yaw: f32,
    /// Elevation around the camera X axis, radians. Not clamped; values past
    /// vertical wrap the view upside down (inherited behavior, kept).
    pub pitch: f32,
    translation: Vec3,
    target: Vec3,
    up: Vec3,
    right: Vec3,
}

impl FreeCamera {
    /// Creates a camera at `position` with the given heading, derives the
    /// initial basis and view immediately.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut free = Self {
            camera: Camera::new(),
            position,
            yaw,
            pitch,
            translation: Vec3::ZERO,
            target: position + Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
        };
        free.update();
        free
    }

    /// Accumulates a heading change. Takes effect on the next
    /// [`FreeCamera::update`].
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
    }

    /// Accumulates a camera-relative translation into the pending buffer;
    /// nothing moves until [`FreeCamera::update`].
    pub fn move_by(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Applies pending movement and recomputes all derived state.
    ///
    /// Order matters within a tick: the pending translation is rotated by the
    /// current yaw/pitch and added to the position first, then the target,
    /// up, right, and view matrix are derived from the moved position.
    /// Setting the view regenerates the camera frustum, so visibility queries
    /// after `update` always see this frame's matrices.
    pub fn update(&mut self) {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);

        self.position += rotation * self.translation;
        self.translation = Vec3::ZERO;

        let forward = rotation * Vec3::NEG_Z;
        self.target = self.position + forward;

        let up = rotation * Vec3::Y;
        self.up = up;
        self.right = forward.cross(up);

        self.camera
            .set_view(Mat4::look_at_rh(self.position, self.target, up));
    }

    /// Installs a perspective projection on the underlying [`Camera`].
    pub fn set_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.camera.set_perspective(fov_y, aspect, near, far);
    }

    /// The underlying matrix/frustum state.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current view matrix.
    pub fn view(&self) -> Mat4 {
        self.camera.view()
    }

    /// Current projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.camera.projection()
    }

    /// Frustum for the latest matrices.
    pub fn frustum(&self) -> &Frustum {
        self.camera.frustum()
    }

    /// Point one unit ahead of the camera along its forward axis.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Camera-space up vector, derived on the last update.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Camera-space right vector (`forward × up`).
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Visibility test against a bounding sphere.
    pub fn sphere_in_view(&self, sphere: &BoundingSphere) -> bool {
        self.camera.sphere_in_view(sphere)
    }

    /// Visibility test against an axis-aligned bounding box.
    pub fn aabb_in_view(&self, aabb: &Aabb3d) -> bool {
        self.camera.aabb_in_view(aabb)
    }
}
