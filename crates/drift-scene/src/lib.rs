//! Scene state and per-frame animation for the drift background.
//!
//! The scene is a rotating cloud of colored points, a batch of short line
//! segments and a set of floating text labels, viewed through a perspective
//! camera that eases toward the pointer. [`AnimationLoop`] advances the scene
//! one frame at a time and [`render_scene`] draws it onto a Braille canvas.

mod animation;
mod builder;
mod camera;
mod clock;
mod color;
mod error;
mod input;
mod labels;
mod render;
mod scene;

pub use animation::{AnimationLoop, step};
pub use builder::{build_label_sprites, build_line_set, build_point_cloud};
pub use camera::Camera;
pub use clock::FrameClock;
pub use color::hsl_to_rgb;
pub use error::SceneError;
pub use input::InputTracker;
pub use render::render_scene;
pub use scene::{
    LABEL_COUNT, LINE_COUNT, LabelSprite, LabelTexture, LineSet, POINT_COUNT, PointCloud,
    Rotation, Scene,
};
