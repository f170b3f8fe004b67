//! Core value types shared by the drift crates.

use ratatui::style::Color;

/// Width of one terminal cell in virtual pixels.
pub const CELL_PX_WIDTH: f32 = 8.0;

/// Height of one terminal cell in virtual pixels.
pub const CELL_PX_HEIGHT: f32 = 16.0;

/// Ticker symbols used when no label source is configured.
pub const DEFAULT_SYMBOLS: &[&str] = &["AAPL", "TSLA", "NVDA", "GOOGL", "AMZN", "MSFT"];

/// Lifecycle of the animation loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Running,
    Paused,
    Stopped,
}

impl LoopState {
    /// Toggle between running and paused. A stopped loop stays stopped.
    pub fn toggle_pause(self) -> Self {
        match self {
            LoopState::Running => LoopState::Paused,
            LoopState::Paused => LoopState::Running,
            LoopState::Stopped => LoopState::Stopped,
        }
    }

    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            LoopState::Running => "running",
            LoopState::Paused => "paused",
            LoopState::Stopped => "stopped",
        }
    }
}

/// Last observed pointer offset from the viewport center.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the drawing surface in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// A viewport with no cells cannot host the scene.
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Half of the viewport extent in virtual pixels.
    pub fn half_px(&self) -> (f32, f32) {
        (
            self.cols as f32 * CELL_PX_WIDTH / 2.0,
            self.rows as f32 * CELL_PX_HEIGHT / 2.0,
        )
    }

    /// Aspect ratio of a Braille canvas covering the viewport.
    ///
    /// Each cell holds 2x4 dots and is roughly twice as tall as it is wide,
    /// so dots are square and the ratio is `cols / (2 * rows)`.
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        self.cols as f32 / (2.0 * self.rows as f32)
    }
}

/// Linear RGB color with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Convert to a terminal color, dimmed by `opacity` against a dark background.
    pub fn to_color(self, opacity: f32) -> Color {
        let opacity = opacity.clamp(0.0, 1.0);
        let channel = |c: f32| (c.clamp(0.0, 1.0) * opacity * 255.0).round() as u8;
        Color::Rgb(channel(self.r), channel(self.g), channel(self.b))
    }
}
