//! Showcase configuration. Everything is optional: defaults reproduce the
//! page the engine was built for, and a YAML file can override any part.

use crate::diagnostics::WarningClass;
use crate::progress::BreakpointTable;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Errors raised while loading a showcase configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{0}': {1}")]
    ReadFailed(String, std::io::Error),

    #[error("failed to parse config '{0}': {1}")]
    ParseFailed(String, serde_yaml::Error),

    #[error("unknown warning class '{0}' in suppress_warnings")]
    UnknownWarningClass(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    pub kinetic: KineticConfig,
    pub field: FieldConfig,
    pub word_cycle: WordCycleConfig,
    pub carousel: CarouselConfig,
    pub counters: CountersConfig,
    /// Warning classes to silence, by kebab-case name.
    pub suppress_warnings: Vec<String>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            kinetic: KineticConfig::default(),
            field: FieldConfig::default(),
            word_cycle: WordCycleConfig::default(),
            carousel: CarouselConfig::default(),
            counters: CountersConfig::default(),
            suppress_warnings: Vec::new(),
        }
    }
}

impl ShowcaseConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(display.clone(), e))?;
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseFailed(display, e))
    }

    /// Resolve the configured suppression names into warning classes.
    pub fn suppressed_classes(&self) -> Result<Vec<WarningClass>, ConfigError> {
        self.suppress_warnings
            .iter()
            .map(|name| {
                WarningClass::from_str(name)
                    .map_err(|_| ConfigError::UnknownWarningClass(name.clone()))
            })
            .collect()
    }
}

/// Kinetic headline: seed, scatter bounds, and the progress→style tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KineticConfig {
    pub headline: String,
    pub seed: u32,
    pub scatter_distance: f64,
    pub rotation_amplitude: f64,
    /// Letter tracking (spacing multiplier) across the scroll window.
    pub tracking: BreakpointTable,
    /// Section brightness across the scroll window.
    pub brightness: BreakpointTable,
}

impl Default for KineticConfig {
    fn default() -> Self {
        Self {
            headline: "IDEAS THAT MOVE".to_string(),
            seed: 42,
            scatter_distance: 400.0,
            rotation_amplitude: 720.0,
            tracking: BreakpointTable::new(vec![(0.0, 0.7), (0.5, 1.0), (1.0, 1.3)]),
            brightness: BreakpointTable::new(vec![(0.0, 0.25), (0.3, 1.0), (0.8, 1.0), (1.0, 0.4)]),
        }
    }
}

/// Ambient letter field behind the hero.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub alphabet: String,
    pub seed: u32,
    pub count: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { alphabet: "IDEASTHATMOVE".to_string(), seed: 7, count: 90 }
    }
}

/// Rotating word strip.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordCycleConfig {
    pub words: Vec<String>,
    pub interval_ms: u64,
    pub start_index: usize,
}

impl Default for WordCycleConfig {
    fn default() -> Self {
        Self {
            words: [
                "Graphic", "Design", "Marketing", "Ads", "Growth", "SEO", "Content", "Branding",
                "UX/UI", "Shoot", "Ranking", "Strategy", "Social", "Analytics", "Creative",
                "Digital",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            interval_ms: 2000,
            start_index: 4,
        }
    }
}

/// Quote carousel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub slides: Vec<Slide>,
    pub interval_ms: u64,
    /// Horizontal span slides travel when entering or exiting.
    pub slide_span: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub quote: String,
    pub author: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let slides = [
            ("Their strategic approach grew our revenue 320% in six months.", "Priya, LuxeLife"),
            ("We acquired half a million users in the first ninety days.", "Rahul, TechPay"),
            ("Organic traffic up 280% and retention transformed.", "Ananya, WellnessHub"),
            ("They scaled us from a local brand to a national presence.", "Vikram, GreenEarth"),
        ]
        .into_iter()
        .map(|(quote, author)| Slide { quote: quote.to_string(), author: author.to_string() })
        .collect();
        Self { slides, interval_ms: 6000, slide_span: 1000.0 }
    }
}

/// Stat counters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountersConfig {
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

impl Default for CountersConfig {
    fn default() -> Self {
        let stats = [
            ("500+", "Campaigns Launched"),
            ("150+", "Happy Clients"),
            ("\u{20b9}50Cr+", "Revenue Generated"),
            ("98%", "Client Retention"),
            ("15+", "Industry Awards"),
        ]
        .into_iter()
        .map(|(value, label)| Stat { value: value.to_string(), label: label.to_string() })
        .collect();
        Self { stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_page_constants() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.kinetic.seed, 42);
        assert_eq!(config.kinetic.scatter_distance, 400.0);
        assert_eq!(config.field.seed, 7);
        assert_eq!(config.field.count, 90);
        assert_eq!(config.word_cycle.interval_ms, 2000);
        assert_eq!(config.word_cycle.words.len(), 16);
        assert_eq!(config.word_cycle.start_index, 4);
        assert_eq!(config.carousel.interval_ms, 6000);
        assert_eq!(config.carousel.slides.len(), 4);
        assert_eq!(config.counters.stats.len(), 5);
    }

    #[test]
    fn partial_yaml_overrides_only_what_it_names() {
        let config: ShowcaseConfig = serde_yaml::from_str(
            "kinetic:\n  seed: 9\nword_cycle:\n  interval_ms: 3500\n",
        )
        .unwrap();
        assert_eq!(config.kinetic.seed, 9);
        assert_eq!(config.kinetic.scatter_distance, 400.0);
        assert_eq!(config.word_cycle.interval_ms, 3500);
        assert_eq!(config.word_cycle.words.len(), 16);
    }

    #[test]
    fn breakpoint_tables_deserialize_from_pairs() {
        let config: ShowcaseConfig = serde_yaml::from_str(
            "kinetic:\n  tracking:\n    - [0.0, 0.5]\n    - [1.0, 2.0]\n",
        )
        .unwrap();
        assert_eq!(config.kinetic.tracking.value_at(0.5), 1.25);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ShowcaseConfig, _> = serde_yaml::from_str("unknown_section: 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn suppression_names_resolve_to_classes() {
        let config: ShowcaseConfig =
            serde_yaml::from_str("suppress_warnings:\n  - unsized-container\n").unwrap();
        assert_eq!(config.suppressed_classes().unwrap(), vec![WarningClass::UnsizedContainer]);

        let config: ShowcaseConfig =
            serde_yaml::from_str("suppress_warnings:\n  - no-such-class\n").unwrap();
        assert!(matches!(
            config.suppressed_classes(),
            Err(ConfigError::UnknownWarningClass(name)) if name == "no-such-class"
        ));
    }

    #[test]
    fn missing_file_reports_a_read_error() {
        let result = ShowcaseConfig::load(Path::new("/nonexistent/kinetext.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadFailed(_, _))));
    }
}
