//! Scroll-progress sampling and the breakpoint tables that turn a progress
//! scalar into style values.

use itertools::Itertools;
use serde::Deserialize;

/// Viewport geometry as the samplers see it: total height plus the current
/// (already eased) scroll offset, both in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
    pub scroll_offset: f64,
}

/// A container's page-space geometry. `top` is measured from the top of
/// the page, not the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub top: f64,
    pub height: f64,
}

impl Container {
    /// Whether any part of the container is inside the viewport.
    pub fn intersects(&self, viewport: Viewport) -> bool {
        let bottom = self.top + self.height.max(0.0);
        bottom > viewport.scroll_offset && self.top < viewport.scroll_offset + viewport.height
    }
}

/// Fractional viewport offsets bounding a scroll animation: progress is 0
/// while the container top sits below `start` (as a fraction of viewport
/// height from the top) and 1 once the container bottom passes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePair {
    pub start: f64,
    pub end: f64,
}

impl EdgePair {
    /// Track from the moment the container top enters at the viewport
    /// bottom until its bottom leaves through the viewport top.
    pub const ENTER_TO_EXIT: EdgePair = EdgePair { start: 1.0, end: 0.0 };
}

/// Samples a container's normalized scroll progress. Pure: repeated calls
/// with unchanged inputs yield the same output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSampler {
    pub container: Container,
    pub edges: EdgePair,
}

impl ProgressSampler {
    pub fn new(container: Container, edges: EdgePair) -> Self {
        Self { container, edges }
    }

    /// Progress in `[0, 1]`, clamped at both edges. A container that has no
    /// height yet (not laid out) always samples as 0, never NaN or
    /// infinity.
    pub fn sample(&self, viewport: Viewport) -> f64 {
        if self.container.height <= 0.0 || viewport.height <= 0.0 {
            return 0.0;
        }
        let scroll_start = self.container.top - self.edges.start * viewport.height;
        let scroll_end =
            self.container.top + self.container.height - self.edges.end * viewport.height;
        let span = scroll_end - scroll_start;
        if !span.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((viewport.scroll_offset - scroll_start) / span).clamp(0.0, 1.0)
    }
}

/// Piecewise-linear mapping from progress to one style property. Every
/// animated property owns its own table; tables never share a slope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Vec<(f64, f64)>")]
pub struct BreakpointTable {
    points: Vec<(f64, f64)>,
}

impl From<Vec<(f64, f64)>> for BreakpointTable {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}

impl BreakpointTable {
    /// Points are kept ordered by progress; out-of-order input is sorted.
    pub fn new(points: impl Into<Vec<(f64, f64)>>) -> Self {
        let mut points = points.into();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { points }
    }

    /// Interpolated value at `progress`, clamping outside the first and
    /// last breakpoints. An empty table maps everything to 0.
    pub fn value_at(&self, progress: f64) -> f64 {
        let Some(first) = self.points.first() else {
            return 0.0;
        };
        if progress <= first.0 {
            return first.1;
        }
        for (&(p0, v0), &(p1, v1)) in self.points.iter().tuple_windows() {
            if progress <= p1 {
                if p1 <= p0 {
                    return v1;
                }
                let t = (progress - p0) / (p1 - p0);
                return v0 + (v1 - v0) * t;
            }
        }
        self.points.last().map(|(_, v)| *v).unwrap_or(0.0)
    }
}

/// Cubic ease-out used for entrance and exit transitions.
pub fn ease_out_cubic(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(3)
}
