//! One-time scene generation.

use drift_core::DEFAULT_SYMBOLS;
use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::color::hsl_to_rgb;
use crate::labels::{MAX_CHANGE, format_label, label_color};
use crate::scene::{LabelSprite, LabelTexture, LineSet, PointCloud};

/// Half extent of the field on X and Y.
const FIELD_HALF_XY: f32 = 1000.0;

/// Half extent of the line and label slab on Z.
const SLAB_HALF_Z: f32 = 500.0;

/// Largest per-axis offset between the two ends of a segment.
const SEGMENT_REACH: f32 = 100.0;

/// Largest per-axis label speed.
const LABEL_SPEED: f32 = 0.25;

fn spread<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    rng.random_range(-half..half)
}

/// Build `count` points spread over the field cube, in three shades of green.
pub fn build_point_cloud<R: Rng + ?Sized>(count: usize, rng: &mut R) -> PointCloud {
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);

    for _ in 0..count {
        positions.extend([
            spread(rng, FIELD_HALF_XY),
            spread(rng, FIELD_HALF_XY),
            spread(rng, FIELD_HALF_XY),
        ]);

        // Two independent draws, so the shades are not evenly weighted
        let color = if rng.random::<f32>() > 0.7 {
            hsl_to_rgb(0.29, 0.45, 0.55)
        } else if rng.random::<f32>() > 0.4 {
            hsl_to_rgb(0.32, 0.5, 0.6)
        } else {
            hsl_to_rgb(0.27, 0.4, 0.5)
        };
        colors.extend([color.r, color.g, color.b]);
    }

    PointCloud::from_parts(positions, colors)
}

/// Build `count` short segments with one color per segment.
pub fn build_line_set<R: Rng + ?Sized>(count: usize, rng: &mut R) -> LineSet {
    let mut positions = Vec::with_capacity(count * 6);
    let mut colors = Vec::with_capacity(count * 6);

    for _ in 0..count {
        let start = Vec3::new(
            spread(rng, FIELD_HALF_XY),
            spread(rng, FIELD_HALF_XY),
            spread(rng, SLAB_HALF_Z),
        );
        let end = start
            + Vec3::new(
                spread(rng, SEGMENT_REACH),
                spread(rng, SEGMENT_REACH),
                spread(rng, SEGMENT_REACH),
            );
        positions.extend(start.to_array());
        positions.extend(end.to_array());

        let color = hsl_to_rgb(0.29 + rng.random::<f32>() * 0.06, 0.45, 0.5);
        for _ in 0..2 {
            colors.extend([color.r, color.g, color.b]);
        }
    }

    LineSet::from_parts(positions, colors)
}

/// Build `count` floating labels using symbols from `label_source`.
///
/// An empty source falls back to [`DEFAULT_SYMBOLS`].
pub fn build_label_sprites<R: Rng + ?Sized>(
    count: usize,
    label_source: &[String],
    rng: &mut R,
) -> Vec<LabelSprite> {
    let defaults: Vec<String>;
    let symbols: &[String] = if label_source.is_empty() {
        defaults = DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect();
        &defaults
    } else {
        label_source
    };

    (0..count)
        .map(|_| {
            let color = label_color(usize::from(rng.random_bool(0.5)));
            let symbol = symbols.choose(rng).map(String::as_str).unwrap_or_default();
            let change = spread(rng, MAX_CHANGE);
            let texture = LabelTexture {
                text: format_label(symbol, change),
                color,
            };

            let position = Vec3::new(
                spread(rng, FIELD_HALF_XY),
                spread(rng, FIELD_HALF_XY),
                spread(rng, SLAB_HALF_Z),
            );
            let velocity = Vec3::new(
                spread(rng, LABEL_SPEED),
                spread(rng, LABEL_SPEED),
                spread(rng, LABEL_SPEED),
            );
            LabelSprite::new(position, velocity, texture)
        })
        .collect()
}
