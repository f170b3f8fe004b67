//! Per-frame animation rules and the loop lifecycle.

use drift_core::{LoopState, PointerOffset};
use glam::Vec3;

use crate::camera::Camera;
use crate::scene::{LabelSprite, LineSet, PointCloud, Scene};

/// Point cloud spin rate per unit of clock time (X, Y).
const POINT_SPIN: (f64, f64) = (0.1, 0.15);

/// Line set spin rate per unit of clock time (X, Y).
const LINE_SPIN: (f64, f64) = (0.05, 0.08);

/// Vertical drift added to each point per frame, scaled by `sin(t + x)`.
const WAVE_AMPLITUDE: f64 = 0.3;

/// Fraction of the remaining distance the camera covers each frame.
const CAMERA_EASE: f32 = 0.05;

/// Soft walls for label sprites, per axis.
const LABEL_BOUNDS: Vec3 = Vec3::new(1000.0, 1000.0, 500.0);

/// Spin the cloud and push every point along its vertical wave.
///
/// The wave is accumulated onto the current y rather than computed from a
/// base value, so points wander over long runtimes.
pub fn update_point_cloud(points: &mut PointCloud, t: f64) {
    points.rotation.x = t * POINT_SPIN.0;
    points.rotation.y = t * POINT_SPIN.1;

    for xyz in points.positions_mut().chunks_exact_mut(3) {
        let x = f64::from(xyz[0]);
        xyz[1] = (f64::from(xyz[1]) + (t + x).sin() * WAVE_AMPLITUDE) as f32;
    }
}

pub fn update_line_set(lines: &mut LineSet, t: f64) {
    lines.rotation.x = t * LINE_SPIN.0;
    lines.rotation.y = t * LINE_SPIN.1;
}

impl LabelSprite {
    /// Move by one velocity step, then bounce off any wall that was crossed.
    pub fn advance(&mut self) {
        self.position += self.velocity;
        for axis in 0..3 {
            let bound = LABEL_BOUNDS[axis];
            if self.position[axis] > bound || self.position[axis] < -bound {
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }
}

pub fn update_labels(labels: &mut [LabelSprite]) {
    for label in labels {
        label.advance();
    }
}

/// Ease the camera toward the pointer and re-aim it at the origin.
///
/// Pointer y grows downward, so it is inverted to move the camera up.
pub fn update_camera(camera: &mut Camera, pointer: PointerOffset) {
    camera.position.x += (pointer.x - camera.position.x) * CAMERA_EASE;
    camera.position.y += (-pointer.y - camera.position.y) * CAMERA_EASE;
    camera.look_at(Vec3::ZERO);
}

/// Advance every animated part of the scene by one frame.
pub fn step(scene: &mut Scene, t: f64, pointer: PointerOffset) {
    update_point_cloud(&mut scene.points, t);
    update_line_set(&mut scene.lines, t);
    update_labels(&mut scene.labels);
    update_camera(&mut scene.camera, pointer);
}

/// Drives [`step`] once per frame while running.
#[derive(Debug, Default)]
pub struct AnimationLoop {
    state: LoopState,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames advanced so far. Paused ticks are not counted.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            self.state = LoopState::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = self.state.toggle_pause();
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Whether the driver should schedule another frame.
    pub fn should_rearm(&self) -> bool {
        self.state != LoopState::Stopped
    }

    /// Run one frame. Returns `true` if the scene was advanced.
    pub fn tick(&mut self, scene: &mut Scene, t: f64, pointer: PointerOffset) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        step(scene, t, pointer);
        self.frames += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LabelTexture;
    use drift_core::{Rgb, Viewport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scene() -> Scene {
        let mut rng = StdRng::seed_from_u64(42);
        Scene::build(Viewport::new(80, 24), &[], &mut rng).unwrap()
    }

    fn sprite(position: Vec3, velocity: Vec3) -> LabelSprite {
        let texture = LabelTexture {
            text: "AAPL +1.00%".to_string(),
            color: Rgb::from_hex(0x90c98b),
        };
        LabelSprite::new(position, velocity, texture)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_rotations_at_zero() {
        let mut scene = scene();
        step(&mut scene, 0.0, PointerOffset::default());
        assert_eq!(scene.points.rotation.x, 0.0);
        assert_eq!(scene.points.rotation.y, 0.0);
        assert_eq!(scene.lines.rotation.x, 0.0);
        assert_eq!(scene.lines.rotation.y, 0.0);
    }

    #[test]
    fn test_rotations_at_ten() {
        let mut scene = scene();
        step(&mut scene, 10.0, PointerOffset::default());
        assert!(approx(scene.points.rotation.x, 1.0));
        assert!(approx(scene.points.rotation.y, 1.5));
        assert!(approx(scene.lines.rotation.x, 0.5));
        assert!(approx(scene.lines.rotation.y, 0.8));
    }

    #[test]
    fn test_buffers_never_resize() {
        let mut scene = scene();
        let len = scene.points.positions().len();
        for frame in 0..100 {
            step(&mut scene, frame as f64 * 0.01, PointerOffset::new(10.0, 10.0));
            assert_eq!(scene.points.positions().len(), len);
            assert_eq!(scene.points.colors().len(), len);
        }
        assert_eq!(len, 3 * crate::POINT_COUNT);
    }

    #[test]
    fn test_wave_is_cumulative() {
        let mut cloud = PointCloud::new(vec![0.5, 10.0, 0.0], vec![1.0, 1.0, 1.0]).unwrap();
        let t = 0.25;
        update_point_cloud(&mut cloud, t);
        let once = 10.0 + (t + 0.5_f64).sin() * 0.3;
        assert!((f64::from(cloud.point(0).y) - once).abs() < 1e-5);
        update_point_cloud(&mut cloud, t);
        let twice = once + (t + 0.5_f64).sin() * 0.3;
        assert!((f64::from(cloud.point(0).y) - twice).abs() < 1e-5);
        assert_eq!(cloud.point(0).x, 0.5);
        assert_eq!(cloud.point(0).z, 0.0);
    }

    #[test]
    fn test_line_vertices_untouched() {
        let mut scene = scene();
        let before = scene.lines.positions().to_vec();
        step(&mut scene, 3.0, PointerOffset::default());
        assert_eq!(scene.lines.positions(), before.as_slice());
    }

    #[test]
    fn test_sprite_bounce_at_wall() {
        let mut label = sprite(Vec3::new(999.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        label.advance();
        assert_eq!(label.position.x, 1004.0);
        assert_eq!(label.velocity.x, -5.0);
        label.advance();
        assert_eq!(label.position.x, 999.0);
        assert_eq!(label.velocity.x, -5.0);
    }

    #[test]
    fn test_sprite_flips_only_crossed_axes() {
        let cases = [
            (Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, -1.0, 1.0)),
            (Vec3::new(-999.5, 0.0, 0.0), Vec3::new(-1.0, 0.5, 0.5)),
            (Vec3::new(0.0, 999.9, 499.9), Vec3::new(0.1, 0.2, 0.2)),
            (Vec3::new(0.0, 0.0, -499.0), Vec3::new(0.0, 0.0, -0.5)),
        ];
        for (position, velocity) in cases {
            let mut label = sprite(position, velocity);
            label.advance();
            let moved = position + velocity;
            for axis in 0..3 {
                let crossed = moved[axis].abs() > LABEL_BOUNDS[axis];
                let flipped = label.velocity[axis] == -velocity[axis] && velocity[axis] != 0.0;
                assert_eq!(crossed, flipped, "axis {axis} from {position:?} by {velocity:?}");
            }
        }
    }

    #[test]
    fn test_camera_eases_toward_pointer() {
        let mut camera = Camera::new(1.0);
        update_camera(&mut camera, PointerOffset::new(100.0, -50.0));
        assert!((camera.position.x - 5.0).abs() < 1e-5);
        assert!((camera.position.y - 2.5).abs() < 1e-5);
        assert_eq!(camera.position.z, 1000.0);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_camera_converges() {
        let mut camera = Camera::new(1.0);
        let pointer = PointerOffset::new(40.0, 20.0);
        for _ in 0..500 {
            update_camera(&mut camera, pointer);
        }
        assert!((camera.position.x - 40.0).abs() < 1e-3);
        assert!((camera.position.y + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_frames_is_identity() {
        let fresh = scene();
        let mut stopped = scene();
        let mut animation = AnimationLoop::new();
        animation.stop();
        while animation.tick(&mut stopped, 7.0, PointerOffset::new(50.0, 50.0)) {}
        assert_eq!(animation.frames(), 0);
        assert_eq!(stopped, fresh);
    }

    #[test]
    fn test_paused_tick_leaves_scene() {
        let original = scene();
        let mut scene = original.clone();
        let mut animation = AnimationLoop::new();
        animation.pause();
        assert!(!animation.tick(&mut scene, 5.0, PointerOffset::new(100.0, 100.0)));
        assert_eq!(scene, original);
        assert_eq!(animation.frames(), 0);
        assert!(animation.should_rearm());

        animation.resume();
        assert!(animation.tick(&mut scene, 5.0, PointerOffset::new(100.0, 100.0)));
        assert_ne!(scene, original);
        assert_eq!(animation.frames(), 1);
    }

    #[test]
    fn test_stop_is_final() {
        let mut scene = scene();
        let mut animation = AnimationLoop::new();
        assert!(animation.should_rearm());
        animation.stop();
        assert!(!animation.should_rearm());
        animation.resume();
        animation.toggle_pause();
        assert_eq!(animation.state(), LoopState::Stopped);
        assert!(!animation.tick(&mut scene, 1.0, PointerOffset::default()));
    }
}
