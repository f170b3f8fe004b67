//! Label text and palette for floating sprites.

use drift_core::Rgb;

/// Label text colors, picked with equal probability.
pub const LABEL_COLORS: [u32; 2] = [0x90c98b, 0x6fb368];

/// Largest absolute percentage change shown on a label.
pub const MAX_CHANGE: f32 = 5.0;

/// Format a label such as `NVDA +1.25%` or `TSLA -0.40%`.
///
/// The `+` is decided on the rounded value, so tiny gains print as `0.00%`.
pub fn format_label(symbol: &str, change: f32) -> String {
    let rounded = format!("{change:.2}");
    let sign = if rounded.parse::<f32>().is_ok_and(|value| value > 0.0) {
        "+"
    } else {
        ""
    };
    format!("{symbol} {sign}{rounded}%")
}

pub fn label_color(index: usize) -> Rgb {
    Rgb::from_hex(LABEL_COLORS[index % LABEL_COLORS.len()])
}
