//! Warning dispatch with explicit, host-configured suppression.
//!
//! Hosts that want a warning class quiet say so when they construct the
//! engine; nothing here (or anywhere else in the crate) intercepts or
//! patches a process-global logger.

use std::collections::HashSet;
use strum::{Display, EnumString};

/// Classes of recoverable conditions the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum WarningClass {
    /// A sampled container had no height yet; its progress degraded to 0.
    UnsizedContainer,
    /// A counter literal carried no numeric magnitude; shown unchanged.
    UnparsableCounterLiteral,
}

/// Receives engine warnings. Hosts inject their own sink; the default
/// forwards to `tracing`.
pub trait WarningSink {
    fn warn(&self, class: WarningClass, detail: &str);
}

/// Default sink: structured `tracing` events.
#[derive(Debug, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, class: WarningClass, detail: &str) {
        tracing::warn!(class = %class, "{detail}");
    }
}

/// Filtered warning dispatch, shared by everything in one engine host.
pub struct Diagnostics {
    sink: Box<dyn WarningSink>,
    suppressed: HashSet<WarningClass>,
}

impl Diagnostics {
    pub fn new(sink: Box<dyn WarningSink>) -> Self {
        Self { sink, suppressed: HashSet::new() }
    }

    /// Suppress `class` for the lifetime of this host.
    pub fn suppress(mut self, class: WarningClass) -> Self {
        self.suppressed.insert(class);
        self
    }

    pub fn suppress_all(mut self, classes: impl IntoIterator<Item = WarningClass>) -> Self {
        self.suppressed.extend(classes);
        self
    }

    pub fn warn(&self, class: WarningClass, detail: &str) {
        if self.suppressed.contains(&class) {
            return;
        }
        self.sink.warn(class, detail);
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Box::new(TracingSink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct CollectingSink {
        events: Arc<Mutex<Vec<(WarningClass, String)>>>,
    }

    impl WarningSink for CollectingSink {
        fn warn(&self, class: WarningClass, detail: &str) {
            self.events.lock().unwrap().push((class, detail.to_string()));
        }
    }

    #[test]
    fn warnings_reach_the_sink() {
        let sink = CollectingSink::default();
        let diagnostics = Diagnostics::new(Box::new(sink.clone()));
        diagnostics.warn(WarningClass::UnsizedContainer, "hero section");

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, WarningClass::UnsizedContainer);
    }

    #[test]
    fn suppressed_classes_are_filtered_out() {
        let sink = CollectingSink::default();
        let diagnostics = Diagnostics::new(Box::new(sink.clone()))
            .suppress(WarningClass::UnsizedContainer);

        diagnostics.warn(WarningClass::UnsizedContainer, "hero section");
        diagnostics.warn(WarningClass::UnparsableCounterLiteral, "N/A");

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, WarningClass::UnparsableCounterLiteral);
    }

    #[test]
    fn classes_round_trip_through_their_names() {
        assert_eq!(WarningClass::UnsizedContainer.to_string(), "unsized-container");
        assert_eq!(
            WarningClass::from_str("unparsable-counter-literal").unwrap(),
            WarningClass::UnparsableCounterLiteral
        );
    }
}
