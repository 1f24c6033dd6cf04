//! Scatter-to-rest interpolation: the per-character mapping from a seeded
//! starting transform and a progress sample to concrete style values.

use crate::markup::{index_chars, CharAddress, Fragment};
use crate::progress::ease_out_cubic;
use crate::scatter::{ScatterEntry, ScatterLayout, ScatterParams, Vec2};

/// Opacity shown at progress 0, before any assembly has happened.
const OPACITY_FLOOR: f64 = 0.15;

/// Interpolated style values for one character at one progress sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharTransform {
    pub translate: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl CharTransform {
    /// Fully settled: the character at rest in its slot.
    pub const REST: CharTransform =
        CharTransform { translate: Vec2::ZERO, rotation: 0.0, scale: 1.0, opacity: 1.0 };
}

/// Style values for `entry` at `progress`, pure in both inputs. Progress 0
/// leaves the character fully scattered; progress 1 is exactly [`CharTransform::REST`].
pub fn transform_at(entry: &ScatterEntry, progress: f64) -> CharTransform {
    let p = ease_out_cubic(progress.clamp(0.0, 1.0));
    let remaining = 1.0 - p;
    CharTransform {
        translate: Vec2::new(entry.origin_offset.x * remaining, entry.origin_offset.y * remaining),
        rotation: entry.rotation * remaining,
        scale: entry.scale + (1.0 - entry.scale) * p,
        opacity: OPACITY_FLOOR + (1.0 - OPACITY_FLOOR) * p,
    }
}

/// A fragment tree bound to its scatter layout: the characters of every
/// leaf, addressed and scattered once at construction.
#[derive(Debug, Clone)]
pub struct KineticText {
    chars: Vec<(CharAddress, char)>,
    layout: ScatterLayout,
}

impl KineticText {
    pub fn new(fragment: &Fragment, seed: u32, params: &ScatterParams) -> Self {
        let chars = index_chars(fragment);
        let layout = ScatterLayout::generate(seed, chars.iter().map(|&(_, ch)| ch), params);
        Self { chars, layout }
    }

    pub fn from_text(text: &str, seed: u32, params: &ScatterParams) -> Self {
        Self::new(&Fragment::leaf(text), seed, params)
    }

    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub fn layout(&self) -> &ScatterLayout {
        &self.layout
    }

    /// One frame of the assembly animation: per-character transforms at
    /// `progress`, in sequence order.
    pub fn frame_at(&self, progress: f64) -> Vec<(CharAddress, char, CharTransform)> {
        self.chars
            .iter()
            .map(|&(address, ch)| {
                let transform = self
                    .layout
                    .get(address.sequence_index)
                    .map(|entry| transform_at(entry, progress))
                    .unwrap_or(CharTransform::REST);
                (address, ch, transform)
            })
            .collect()
    }
}
