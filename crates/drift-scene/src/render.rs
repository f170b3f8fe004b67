//! Draw the scene onto a Braille canvas.

use glam::{Mat4, Vec2, Vec3};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::canvas::{Canvas, Painter, Shape},
};

use crate::scene::{LineSet, PointCloud, Scene};

const POINT_OPACITY: f32 = 0.65;
const LINE_OPACITY: f32 = 0.25;
const LABEL_OPACITY: f32 = 0.45;

/// Samples per unit of NDC length when rasterizing a segment.
const LINE_SAMPLES_PER_NDC: f32 = 160.0;

/// Upper bound on samples for one segment.
const MAX_LINE_SAMPLES: usize = 512;

/// Project a model-space point to normalized device coordinates.
///
/// Returns `None` behind the camera or outside the depth range.
fn project(clip_from_model: Mat4, point: Vec3) -> Option<Vec2> {
    let clip = clip_from_model * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    (ndc.z.abs() <= 1.0).then(|| ndc.truncate())
}

fn paint_ndc(painter: &mut Painter, at: Vec2, color: Color) {
    if let Some((x, y)) = painter.get_point(f64::from(at.x), f64::from(at.y)) {
        painter.paint(x, y, color);
    }
}

struct PointLayer<'a> {
    cloud: &'a PointCloud,
    clip_from_model: Mat4,
}

impl Shape for PointLayer<'_> {
    fn draw(&self, painter: &mut Painter) {
        for i in 0..self.cloud.len() {
            if let Some(at) = project(self.clip_from_model, self.cloud.point(i)) {
                paint_ndc(painter, at, self.cloud.color(i).to_color(POINT_OPACITY));
            }
        }
    }
}

struct LineLayer<'a> {
    lines: &'a LineSet,
    clip_from_model: Mat4,
}

impl Shape for LineLayer<'_> {
    fn draw(&self, painter: &mut Painter) {
        for i in 0..self.lines.len() {
            let (a, b) = self.lines.segment(i);
            let (Some(a), Some(b)) = (
                project(self.clip_from_model, a),
                project(self.clip_from_model, b),
            ) else {
                continue;
            };

            let color = self.lines.color(i).to_color(LINE_OPACITY);
            let samples = ((b - a).length() * LINE_SAMPLES_PER_NDC).ceil() as usize;
            let samples = samples.clamp(1, MAX_LINE_SAMPLES);
            for s in 0..=samples {
                paint_ndc(painter, a.lerp(b, s as f32 / samples as f32), color);
            }
        }
    }
}

/// A label placed in NDC, left edge first.
struct PlacedLabel {
    x: f64,
    y: f64,
    text: String,
    color: Color,
}

fn place_labels(scene: &Scene, clip_from_world: Mat4, area: Rect) -> Vec<PlacedLabel> {
    scene
        .labels
        .iter()
        .filter_map(|label| {
            let at = project(clip_from_world, label.position)?;
            if at.x < -1.0 {
                return None;
            }
            let texture = label.texture();
            // Each cell spans 2 / width in NDC, so half the text is chars / width.
            let half_width = texture.text.chars().count() as f64 / f64::from(area.width);
            // The canvas drops labels that start outside its bounds.
            Some(PlacedLabel {
                x: (f64::from(at.x) - half_width).max(-1.0),
                y: f64::from(at.y),
                text: texture.text.clone(),
                color: texture.color.to_color(LABEL_OPACITY),
            })
        })
        .collect()
}

/// Render the scene through its camera into `area`.
pub fn render_scene(frame: &mut Frame, area: Rect, scene: &Scene) {
    if area.is_empty() {
        return;
    }

    let clip_from_world = scene.camera.view_projection();
    let lines = LineLayer {
        lines: &scene.lines,
        clip_from_model: clip_from_world * scene.lines.rotation.matrix(),
    };
    let points = PointLayer {
        cloud: &scene.points,
        clip_from_model: clip_from_world * scene.points.rotation.matrix(),
    };
    let labels = place_labels(scene, clip_from_world, area);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            ctx.draw(&points);
            ctx.layer();
            ctx.draw(&lines);
            for label in &labels {
                ctx.print(
                    label.x,
                    label.y,
                    Line::styled(label.text.clone(), Style::new().fg(label.color)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::{LabelSprite, LabelTexture};
    use drift_core::{Rgb, Viewport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn empty_scene(viewport: Viewport) -> Scene {
        Scene {
            camera: Camera::new(viewport.aspect()),
            points: PointCloud::new(Vec::new(), Vec::new()).unwrap(),
            lines: LineSet::new(Vec::new(), Vec::new()).unwrap(),
            labels: Vec::new(),
        }
    }

    fn draw(scene: &Scene, viewport: Viewport) -> Buffer {
        let backend = TestBackend::new(viewport.cols, viewport.rows);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_scene(frame, frame.area(), scene))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn painted(buffer: &Buffer) -> usize {
        buffer
            .content()
            .iter()
            .filter(|c| c.symbol() != " " && c.symbol() != "\u{2800}")
            .count()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_project_origin() {
        let camera = Camera::new(2.0);
        let at = project(camera.view_projection(), Vec3::ZERO).unwrap();
        assert!(at.length() < 1e-6);
        assert!(project(camera.view_projection(), Vec3::new(0.0, 0.0, 2000.0)).is_none());
    }

    #[test]
    fn test_full_scene_paints() {
        let viewport = Viewport::new(80, 24);
        let mut rng = StdRng::seed_from_u64(9);
        let scene = Scene::build(viewport, &[], &mut rng).unwrap();
        assert!(painted(&draw(&scene, viewport)) > 0);
    }

    #[test]
    fn test_point_behind_camera_is_skipped() {
        let viewport = Viewport::new(40, 20);
        let mut scene = empty_scene(viewport);
        scene.points = PointCloud::new(vec![0.0, 0.0, 1500.0], vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(painted(&draw(&scene, viewport)), 0);

        scene.points = PointCloud::new(vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(painted(&draw(&scene, viewport)), 1);
    }

    #[test]
    fn test_label_centered_on_projection() {
        let viewport = Viewport::new(80, 24);
        let mut scene = empty_scene(viewport);
        let texture = LabelTexture {
            text: "HELLO".to_string(),
            color: Rgb::from_hex(0x6fb368),
        };
        scene
            .labels
            .push(LabelSprite::new(Vec3::ZERO, Vec3::ZERO, texture));
        let rows = rows(&draw(&scene, viewport));
        let (row, col) = rows
            .iter()
            .enumerate()
            .find_map(|(y, line)| line.find("HELLO").map(|x| (y, x)))
            .expect("label drawn");
        assert!((10..=13).contains(&row));
        assert!((35..=40).contains(&col));
    }

    #[test]
    fn test_label_near_left_edge_is_clamped() {
        let viewport = Viewport::new(80, 24);
        let mut scene = empty_scene(viewport);
        let texture = LabelTexture {
            text: "HELLO".to_string(),
            color: Rgb::from_hex(0x90c98b),
        };
        let position = Vec3::new(-1250.0, 0.0, 0.0);
        let at = project(scene.camera.view_projection(), position).unwrap();
        assert!(at.x > -1.0 && at.x < -0.9);
        scene
            .labels
            .push(LabelSprite::new(position, Vec3::ZERO, texture));
        let rows = rows(&draw(&scene, viewport));
        let col = rows
            .iter()
            .find_map(|line| line.find("HELLO"))
            .expect("label drawn");
        assert_eq!(col, 0);
    }

    #[test]
    fn test_segment_paints_multiple_cells() {
        let viewport = Viewport::new(80, 24);
        let mut scene = empty_scene(viewport);
        scene.lines = LineSet::new(
            vec![-300.0, 0.0, 0.0, 300.0, 0.0, 0.0],
            vec![1.0; 6],
        )
        .unwrap();
        assert!(painted(&draw(&scene, viewport)) > 10);
    }

    #[test]
    fn test_empty_area_is_noop() {
        let viewport = Viewport::new(10, 10);
        let scene = empty_scene(viewport);
        let backend = TestBackend::new(10, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_scene(frame, Rect::new(0, 0, 0, 0), &scene))
            .unwrap();
        assert_eq!(painted(terminal.backend().buffer()), 0);
    }
}
