mod cli;
mod frame_timing;
mod logging;

use std::io::{self, IsTerminal};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use drift_config::Config;
use drift_core::{LoopState, Viewport};
use drift_scene::{AnimationLoop, FrameClock, InputTracker, Scene, render_scene};
use rand::Rng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};

use crate::cli::Cli;
use crate::frame_timing::FrameTiming;

/// Accent color for the key hint bar.
const ACCENT: Color = Color::Rgb(0x90, 0xc9, 0x8b);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = cli.config_path()?;
    let config = cli.apply(Config::load_from(&config_path)?);

    if cli.write_config {
        config.save_to(&config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    logging::init(&config.log)?;
    tracing::info!(config = %config_path.display(), "starting drift");

    if !io::stdout().is_terminal() {
        tracing::warn!("stdout is not a terminal, nothing to draw");
        eprintln!("drift: stdout is not a terminal, nothing to draw");
        return Ok(());
    }

    let (cols, rows) = crossterm::terminal::size()?;
    let app = App::new(&config, Viewport::new(cols, rows))?;

    let terminal = ratatui::init();
    let result = match execute!(io::stdout(), EnableMouseCapture) {
        Ok(()) => app.run(terminal),
        Err(err) => Err(err.into()),
    };
    restore_terminal();
    result
}

fn restore_terminal() {
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(%err, "failed to disable mouse capture");
    }
    ratatui::restore();
}

/// The main application which owns the scene and drives the animation loop.
#[derive(Debug)]
pub struct App {
    scene: Scene,
    animation: AnimationLoop,
    clock: FrameClock,
    input: InputTracker,
    timing: FrameTiming,
    /// Whether the key hint bar is visible.
    show_help: bool,
}

impl App {
    /// Build the scene for the current viewport.
    ///
    /// Fails if the viewport has no cells to draw into.
    pub fn new(config: &Config, viewport: Viewport) -> color_eyre::Result<Self> {
        Self::with_rng(config, viewport, &mut rand::rng())
    }

    fn with_rng<R: Rng + ?Sized>(
        config: &Config,
        viewport: Viewport,
        rng: &mut R,
    ) -> color_eyre::Result<Self> {
        let scene = Scene::build(viewport, &config.labels, rng)?;
        Ok(Self {
            scene,
            animation: AnimationLoop::new(),
            clock: FrameClock::new(),
            input: InputTracker::new(viewport),
            timing: FrameTiming::new(config.frame_rate),
            show_help: config.show_help,
        })
    }

    /// Run the application's main loop until stopped.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        tracing::info!(
            interval_ms = self.timing.frame_interval().as_millis() as u64,
            "animation started"
        );
        while self.animation.should_rearm() {
            self.timing.start_frame();
            let t = self.clock.now();
            self.animation.tick(&mut self.scene, t, self.input.pointer());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        tracing::info!(frames = self.animation.frames(), "animation stopped");
        Ok(())
    }

    /// Renders the scene and the key hint bar.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        render_scene(frame, area, &self.scene);

        if !self.show_help || area.height < 2 {
            return;
        }

        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

        let mut hints = vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "space".bold().fg(ACCENT),
            " pause  ".dark_gray(),
            "h".bold().fg(ACCENT),
            " hide help  ".dark_gray(),
            format!("{:.0} fps", self.timing.fps()).dark_gray(),
        ];
        if self.animation.state() == LoopState::Paused {
            hints.push("  paused".bold().fg(ACCENT));
        }
        frame.render_widget(Line::from(hints).centered(), chunks[1]);
    }

    /// Drain input until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(self.timing.time_until_next_frame())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(Viewport::new(cols, rows)),
                _ => {}
            }
            if !self.animation.should_rearm() {
                break;
            }
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            self.input.on_cell_move(mouse.column, mouse.row);
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        let (half_x, half_y) = self.input.on_resize(viewport);
        self.scene.camera.set_aspect(viewport.aspect());
        tracing::debug!(cols = viewport.cols, rows = viewport.rows, half_x, half_y, "resized");
    }

    /// Pause or resume both the loop and its clock.
    fn toggle_pause(&mut self) {
        self.animation.toggle_pause();
        match self.animation.state() {
            LoopState::Paused => self.clock.pause(),
            LoopState::Running => self.clock.resume(),
            LoopState::Stopped => {}
        }
        tracing::info!(state = self.animation.state().label(), "toggled pause");
    }

    /// Stop the loop so the terminal is released.
    fn quit(&mut self) {
        self.animation.stop();
    }
}
