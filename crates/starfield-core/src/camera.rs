//! Perspective camera owned by a live session.

use crate::config::SceneConfig;
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    /// Camera at the configured default offset on +Z, looking at the origin.
    pub fn new(config: &SceneConfig, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::new(0.0, 0.0, config.camera_z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: config.fov_y_radians(),
            znear: config.z_near,
            zfar: config.z_far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Move `factor` of the remaining way toward `goal` on x/y; z is untouched.
    ///
    /// The factor is per call, so the approach speed follows the caller's
    /// tick rate.
    pub fn damp_toward(&mut self, goal: Vec2, factor: f32) {
        self.eye.x += (goal.x - self.eye.x) * factor;
        self.eye.y += (goal.y - self.eye.y) * factor;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}
