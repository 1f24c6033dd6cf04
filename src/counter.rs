//! Animated numeric counters: a stat literal like `"500+"` counts up from
//! zero once it first becomes visible, re-applying its grouping and
//! surrounding symbols at every step.

use crate::diagnostics::{Diagnostics, WarningClass};
use std::time::{Duration, Instant};

/// Fixed count-up duration.
pub const COUNT_DURATION: Duration = Duration::from_millis(2000);
/// Fixed number of interpolation steps across the duration.
pub const COUNT_STEPS: u32 = 60;

/// Symbols treated as currency when they lead a literal.
const CURRENCY_SYMBOLS: &[char] = &['\u{20b9}', '$', '\u{20ac}', '\u{a3}'];

/// A display literal split into its animatable parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLiteral {
    /// Currency symbols ahead of the digits.
    pub prefix: String,
    pub magnitude: f64,
    /// Trailing unit symbols.
    pub suffix: String,
}

/// Split `literal` into `(prefix, magnitude, suffix)`: a leading run of
/// currency symbols, digits and separators, then everything else. Returns
/// `None` when no numeric magnitude can be extracted.
pub fn parse_literal(literal: &str) -> Option<ParsedLiteral> {
    let mut prefix = String::new();
    let mut digits = String::new();
    let mut rest = literal;

    for (offset, ch) in literal.char_indices() {
        if CURRENCY_SYMBOLS.contains(&ch) && digits.is_empty() {
            prefix.push(ch);
        } else if ch.is_ascii_digit() || ch == '.' || ch == ',' {
            if ch != ',' {
                digits.push(ch);
            }
        } else {
            rest = &literal[offset..];
            break;
        }
        rest = &literal[offset + ch.len_utf8()..];
    }

    let magnitude: f64 = digits.parse().ok()?;
    Some(ParsedLiteral { prefix, magnitude, suffix: rest.to_string() })
}

/// Render the displayed string for `current`. One rule for every literal:
/// the magnitude rounds half-up, thousands get Indian-style grouping unless
/// a currency prefix is present, and a `Cr` unit selects the fixed
/// `prefix + value + "Cr"` format, swallowing the rest of the suffix.
pub fn format_value(parsed: &ParsedLiteral, current: f64) -> String {
    let rounded = current.max(0.0).round() as u64;
    if parsed.suffix.contains("Cr") {
        return format!("{}{}Cr", parsed.prefix, rounded);
    }
    let grouped = if rounded >= 1000 && parsed.prefix.is_empty() {
        group_indian(rounded)
    } else {
        rounded.to_string()
    };
    format!("{}{}{}", parsed.prefix, grouped, parsed.suffix)
}

/// Indian-style digit grouping: the last three digits, then groups of two.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut parts = Vec::new();
    let mut end = head.len();
    while end > 2 {
        parts.push(&head[end - 2..end]);
        end -= 2;
    }
    parts.push(&head[..end]);
    parts.reverse();
    format!("{},{}", parts.join(","), tail)
}

/// One animated counter. Counting starts the first time the counter is
/// seen and runs at most once per instance; a literal that cannot be
/// parsed is displayed unchanged, with no animation.
#[derive(Debug)]
pub struct Counter {
    parsed: Option<ParsedLiteral>,
    started_at: Option<Instant>,
    fired: bool,
    completed: bool,
    display: String,
}

impl Counter {
    pub fn new(literal: &str, diagnostics: &Diagnostics) -> Self {
        let parsed = parse_literal(literal);
        if parsed.is_none() {
            diagnostics.warn(WarningClass::UnparsableCounterLiteral, literal);
        }
        let display = if parsed.is_some() { "0".to_string() } else { literal.to_string() };
        Self { parsed, started_at: None, fired: false, completed: false, display }
    }

    /// First sighting starts the count; later sightings are ignored.
    pub fn mark_visible(&mut self, now: Instant) {
        if self.fired {
            return;
        }
        self.fired = true;
        if self.parsed.is_some() {
            self.started_at = Some(now);
        }
    }

    /// Recompute the displayed string for `now`. Returns true when the
    /// display changed.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if self.completed {
            return false;
        }
        let Some(parsed) = &self.parsed else {
            return false;
        };
        let Some(started) = self.started_at else {
            return false;
        };

        let elapsed = now.saturating_duration_since(started);
        let raw_step =
            (elapsed.as_secs_f64() / COUNT_DURATION.as_secs_f64() * f64::from(COUNT_STEPS)) as u32;
        let step = raw_step.min(COUNT_STEPS);
        let current = parsed.magnitude * f64::from(step) / f64::from(COUNT_STEPS);

        if step == COUNT_STEPS {
            self.completed = true;
        }

        let next = format_value(parsed, current);
        if next != self.display {
            self.display = next;
            true
        } else {
            false
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}
