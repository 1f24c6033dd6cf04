use crate::random::SequenceGenerator;

/// A 2D offset or position. Units are whatever the host renders in
/// (terminal cells, pixels); the engine only does arithmetic on them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounds for the scattered starting transforms of a kinetic text.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterParams {
    /// Maximum displacement from the rest position, per axis.
    pub distance: f64,
    /// Total rotation amplitude in degrees, centered at zero.
    pub rotation_amplitude: f64,
    /// Starting scale range `[min, max)`.
    pub scale_range: (f64, f64),
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self { distance: 400.0, rotation_amplitude: 720.0, scale_range: (0.3, 0.8) }
    }
}

/// The deterministic starting transform assigned to one animated character.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterEntry {
    pub unit: char,
    pub origin_offset: Vec2,
    /// Starting rotation in degrees.
    pub rotation: f64,
    pub scale: f64,
    /// Stable ordinal position; also the draw index within the stream.
    pub sequence_index: usize,
}

/// Scatter layout for a piece of text: one entry per character, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterLayout {
    entries: Vec<ScatterEntry>,
}

impl ScatterLayout {
    /// Generate the layout for `units`. For a fixed `(seed, units, params)`
    /// the produced tuple sequence is identical across runs and platforms.
    /// An empty `units` yields an empty layout.
    pub fn generate<I>(seed: u32, units: I, params: &ScatterParams) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut rng = SequenceGenerator::new(seed);
        let (scale_min, scale_max) = params.scale_range;
        let entries = units
            .into_iter()
            .enumerate()
            .map(|(sequence_index, unit)| {
                // Draw order is part of the layout contract: x, y, rotation, scale.
                let x = rng.next_centered(params.distance * 2.0);
                let y = rng.next_centered(params.distance * 2.0);
                let rotation = rng.next_centered(params.rotation_amplitude);
                let scale = rng.next_in(scale_min, scale_max);
                ScatterEntry {
                    unit,
                    origin_offset: Vec2::new(x, y),
                    rotation,
                    scale,
                    sequence_index,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ScatterEntry] {
        &self.entries
    }

    pub fn get(&self, sequence_index: usize) -> Option<&ScatterEntry> {
        self.entries.get(sequence_index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Density and appearance bounds for the ambient letter field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    pub count: usize,
    pub scale_range: (f64, f64),
    pub opacity_range: (f64, f64),
    /// Drift strength range; stronger drift floats further and faster.
    pub drift_range: (f64, f64),
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: 90,
            scale_range: (0.75, 1.65),
            opacity_range: (0.18, 0.73),
            drift_range: (0.6, 2.0),
        }
    }
}

/// One floating glyph in the letter field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub glyph: char,
    /// Normalized position inside the field, both axes in `[0, 1)`.
    pub position: Vec2,
    pub scale: f64,
    pub opacity: f64,
    pub drift: f64,
}

/// A fixed field of glyphs sampled from an alphabet, each drifting on its
/// own phase. The layout is computed once; motion is a pure function of
/// time and pointer, so the field never accumulates hidden state.
#[derive(Debug, Clone, Default)]
pub struct LetterField {
    entries: Vec<FieldEntry>,
}

impl LetterField {
    pub fn generate(seed: u32, alphabet: &str, params: &FieldParams) -> Self {
        let glyphs: Vec<char> = alphabet.chars().collect();
        let mut rng = SequenceGenerator::new(seed);
        let (scale_min, scale_max) = params.scale_range;
        let (opacity_min, opacity_max) = params.opacity_range;
        let (drift_min, drift_max) = params.drift_range;
        let mut entries = Vec::with_capacity(params.count);
        for _ in 0..params.count {
            // The glyph pick consumes a draw even when the alphabet is empty
            // so the rest of the layout stays stable.
            let pick = (rng.next() * glyphs.len() as f64) as usize;
            let glyph = glyphs.get(pick).copied().unwrap_or('\u{2022}');
            let x = rng.next();
            let y = rng.next();
            let scale = rng.next_in(scale_min, scale_max);
            let opacity = rng.next_in(opacity_min, opacity_max);
            let drift = rng.next_in(drift_min, drift_max);
            entries.push(FieldEntry { glyph, position: Vec2::new(x, y), scale, opacity, drift });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    /// Drift-and-parallax displacement for `entry` at `t` seconds, with the
    /// pointer normalized to `[-1, 1]` per axis. Pure in all inputs.
    pub fn drift_offset(entry: &FieldEntry, t: f64, pointer: Vec2) -> Vec2 {
        let drift_x = (t * (0.7 + entry.drift)).sin() * 6.0 * entry.drift;
        let drift_y = (t * (0.9 + entry.drift)).cos() * 6.0 * entry.drift;
        Vec2::new(
            drift_x + pointer.x * 10.0 * entry.drift,
            drift_y + pointer.y * 10.0 * entry.drift,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_reproduce_bit_for_bit() {
        let params = ScatterParams::default();
        let a = ScatterLayout::generate(42, "HELLO WORLD".chars(), &params);
        let b = ScatterLayout::generate(42, "HELLO WORLD".chars(), &params);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_yields_empty_layout() {
        let layout = ScatterLayout::generate(42, "".chars(), &ScatterParams::default());
        assert!(layout.is_empty());
    }

    #[test]
    fn entries_stay_within_configured_bounds() {
        let params = ScatterParams::default();
        let layout = ScatterLayout::generate(9, "The quick brown fox jumps".chars(), &params);
        for entry in layout.entries() {
            assert!(entry.origin_offset.x.abs() <= params.distance);
            assert!(entry.origin_offset.y.abs() <= params.distance);
            assert!((-360.0..360.0).contains(&entry.rotation));
            assert!((0.3..0.8).contains(&entry.scale));
        }
    }

    #[test]
    fn sequence_indices_are_stable_ordinals() {
        let layout = ScatterLayout::generate(1, "abc".chars(), &ScatterParams::default());
        let indices: Vec<_> = layout.entries().iter().map(|e| e.sequence_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(layout.get(1).map(|e| e.unit), Some('b'));
    }

    #[test]
    fn changing_count_shifts_subsequent_draws() {
        // One shared stream across all parameters: a longer text must keep
        // the common prefix identical and diverge only afterwards.
        let params = ScatterParams::default();
        let short = ScatterLayout::generate(5, "ab".chars(), &params);
        let long = ScatterLayout::generate(5, "abc".chars(), &params);
        assert_eq!(short.entries()[..2], long.entries()[..2]);
        assert_eq!(long.len(), 3);
    }

    #[test]
    fn letter_field_is_deterministic_and_bounded() {
        let params = FieldParams::default();
        let a = LetterField::generate(7, "KINETIC", &params);
        let b = LetterField::generate(7, "KINETIC", &params);
        assert_eq!(a.entries(), b.entries());
        assert_eq!(a.entries().len(), 90);
        for entry in a.entries() {
            assert!((0.0..1.0).contains(&entry.position.x));
            assert!((0.0..1.0).contains(&entry.position.y));
            assert!((0.18..0.73).contains(&entry.opacity));
            assert!((0.6..2.0).contains(&entry.drift));
        }
    }

    #[test]
    fn empty_alphabet_falls_back_to_bullet() {
        let field = LetterField::generate(7, "", &FieldParams { count: 4, ..FieldParams::default() });
        assert!(field.entries().iter().all(|e| e.glyph == '\u{2022}'));
    }

    #[test]
    fn drift_offset_is_pure() {
        let field = LetterField::generate(7, "AB", &FieldParams::default());
        let entry = &field.entries()[0];
        let a = LetterField::drift_offset(entry, 1.5, Vec2::new(0.2, -0.4));
        let b = LetterField::drift_offset(entry, 1.5, Vec2::new(0.2, -0.4));
        assert_eq!(a, b);
    }
}
