//! Scroll-driven kinetic typography engine.
//!
//! The engine is rendering-target agnostic: every animation is a pure
//! function of precomputed layout state and a progress or time sample, and
//! timed behavior is polled by the host's frame loop rather than by hidden
//! background timers. The `kinetext` binary hosts the engine in a terminal.

pub mod config;
pub mod counter;
pub mod diagnostics;
pub mod kinetic;
pub mod markup;
pub mod progress;
pub mod random;
pub mod rotation;
pub mod scatter;
pub mod scroll;
