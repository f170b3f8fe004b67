//! Scene state: point cloud, line set, label sprites and camera.

use std::f64::consts::TAU;

use drift_core::{Rgb, Viewport};
use glam::{Mat4, Vec3};
use rand::Rng;

use crate::builder::{build_label_sprites, build_line_set, build_point_cloud};
use crate::camera::Camera;
use crate::error::SceneError;

/// Number of points in the cloud.
pub const POINT_COUNT: usize = 1500;

/// Number of line segments.
pub const LINE_COUNT: usize = 100;

/// Number of floating labels.
pub const LABEL_COUNT: usize = 50;

/// Euler rotation about X then Y, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

impl Rotation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Model matrix for this rotation.
    ///
    /// Angles are wrapped before narrowing so long runtimes keep full precision.
    pub fn matrix(&self) -> Mat4 {
        let x = self.x.rem_euclid(TAU) as f32;
        let y = self.y.rem_euclid(TAU) as f32;
        Mat4::from_rotation_x(x) * Mat4::from_rotation_y(y)
    }
}

fn check_buffers(positions: &[f32], colors: &[f32], stride: usize) -> Result<(), SceneError> {
    if positions.len() != colors.len() {
        return Err(SceneError::BufferMismatch {
            positions: positions.len(),
            colors: colors.len(),
        });
    }
    if positions.len() % stride != 0 {
        return Err(SceneError::Misaligned(positions.len(), stride));
    }
    Ok(())
}

fn vec3_at(buffer: &[f32], index: usize) -> Vec3 {
    Vec3::from_slice(&buffer[index * 3..index * 3 + 3])
}

fn rgb_at(buffer: &[f32], index: usize) -> Rgb {
    Rgb::new(buffer[index * 3], buffer[index * 3 + 1], buffer[index * 3 + 2])
}

/// Points stored as flat xyz and rgb buffers.
///
/// Buffer lengths are fixed at construction; only the values are mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    positions: Vec<f32>,
    colors: Vec<f32>,
    pub rotation: Rotation,
}

impl PointCloud {
    pub fn new(positions: Vec<f32>, colors: Vec<f32>) -> Result<Self, SceneError> {
        check_buffers(&positions, &colors, 3)?;
        Ok(Self::from_parts(positions, colors))
    }

    /// Buffers produced by the builder are aligned by construction.
    pub(crate) fn from_parts(positions: Vec<f32>, colors: Vec<f32>) -> Self {
        debug_assert!(check_buffers(&positions, &colors, 3).is_ok());
        Self {
            positions,
            colors,
            rotation: Rotation::default(),
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn point(&self, index: usize) -> Vec3 {
        vec3_at(&self.positions, index)
    }

    pub fn color(&self, index: usize) -> Rgb {
        rgb_at(&self.colors, index)
    }
}

/// Disconnected line segments, two vertices each. Vertices never change.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSet {
    positions: Vec<f32>,
    colors: Vec<f32>,
    pub rotation: Rotation,
}

impl LineSet {
    pub fn new(positions: Vec<f32>, colors: Vec<f32>) -> Result<Self, SceneError> {
        check_buffers(&positions, &colors, 6)?;
        Ok(Self::from_parts(positions, colors))
    }

    pub(crate) fn from_parts(positions: Vec<f32>, colors: Vec<f32>) -> Self {
        debug_assert!(check_buffers(&positions, &colors, 6).is_ok());
        Self {
            positions,
            colors,
            rotation: Rotation::default(),
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.positions.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Endpoints of segment `index`.
    pub fn segment(&self, index: usize) -> (Vec3, Vec3) {
        (
            vec3_at(&self.positions, index * 2),
            vec3_at(&self.positions, index * 2 + 1),
        )
    }

    /// Color of segment `index` (taken from its first vertex).
    pub fn color(&self, index: usize) -> Rgb {
        rgb_at(&self.colors, index * 2)
    }
}

/// Text rendered once when the sprite is created.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTexture {
    pub text: String,
    pub color: Rgb,
}

/// A floating text label drifting with constant velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSprite {
    pub position: Vec3,
    pub velocity: Vec3,
    texture: LabelTexture,
}

impl LabelSprite {
    pub fn new(position: Vec3, velocity: Vec3, texture: LabelTexture) -> Self {
        Self {
            position,
            velocity,
            texture,
        }
    }

    pub fn texture(&self) -> &LabelTexture {
        &self.texture
    }
}

/// Everything the animation loop mutates and the renderer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub points: PointCloud,
    pub lines: LineSet,
    pub labels: Vec<LabelSprite>,
}

impl Scene {
    /// Build the full scene for `viewport` with the fixed entity counts.
    pub fn build<R: Rng + ?Sized>(
        viewport: Viewport,
        label_source: &[String],
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        if viewport.is_empty() {
            return Err(SceneError::EmptyViewport {
                cols: viewport.cols,
                rows: viewport.rows,
            });
        }

        let scene = Self {
            camera: Camera::new(viewport.aspect()),
            points: build_point_cloud(POINT_COUNT, rng),
            lines: build_line_set(LINE_COUNT, rng),
            labels: build_label_sprites(LABEL_COUNT, label_source, rng),
        };
        tracing::debug!(
            points = scene.points.len(),
            lines = scene.lines.len(),
            labels = scene.labels.len(),
            "scene built"
        );
        Ok(scene)
    }
}
