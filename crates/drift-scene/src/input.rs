//! Pointer tracking relative to the viewport center.

use drift_core::{CELL_PX_HEIGHT, CELL_PX_WIDTH, PointerOffset, Viewport};

/// Scale applied to the raw distance from the center.
const POINTER_DAMPING: f32 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    half_x: f32,
    half_y: f32,
    pointer: PointerOffset,
}

impl InputTracker {
    pub fn new(viewport: Viewport) -> Self {
        let mut tracker = Self::default();
        tracker.on_resize(viewport);
        tracker
    }

    /// Latest pointer offset.
    pub fn pointer(&self) -> PointerOffset {
        self.pointer
    }

    /// Record a pointer position in virtual pixels.
    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32) -> PointerOffset {
        self.pointer = PointerOffset::new(
            (raw_x - self.half_x) * POINTER_DAMPING,
            (raw_y - self.half_y) * POINTER_DAMPING,
        );
        self.pointer
    }

    /// Record a pointer position given as a terminal cell, using its center.
    pub fn on_cell_move(&mut self, column: u16, row: u16) -> PointerOffset {
        self.on_pointer_move(
            (f32::from(column) + 0.5) * CELL_PX_WIDTH,
            (f32::from(row) + 0.5) * CELL_PX_HEIGHT,
        )
    }

    /// Update the reference center. Returns the new half dimensions.
    pub fn on_resize(&mut self, viewport: Viewport) -> (f32, f32) {
        (self.half_x, self.half_y) = viewport.half_px();
        (self.half_x, self.half_y)
    }
}
