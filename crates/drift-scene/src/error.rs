//! Errors raised while building the scene.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("viewport has no drawable cells ({cols}x{rows})")]
    EmptyViewport { cols: u16, rows: u16 },

    #[error("position buffer has {positions} floats but color buffer has {colors}")]
    BufferMismatch { positions: usize, colors: usize },

    #[error("vertex buffer length {0} is not a multiple of {1}")]
    Misaligned(usize, usize),
}
