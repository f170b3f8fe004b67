//! Perspective camera looking at the scene origin.

use glam::{Mat4, Vec3};

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 75.0;

/// Near clip plane.
pub const NEAR_PLANE: f32 = 1.0;

/// Far clip plane.
pub const FAR_PLANE: f32 = 3000.0;

/// Initial distance from the origin along +Z.
pub const CAMERA_DISTANCE: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Camera {
    /// Camera at `(0, 0, CAMERA_DISTANCE)` aimed at the origin.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_rad: FIELD_OF_VIEW_DEG.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            aspect,
        }
    }

    /// Re-aim the camera at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_rad, self.aspect, self.near, self.far)
    }

    /// World space to clip space.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
