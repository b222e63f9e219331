//! Transition configuration.
//!
//! One [`PageFadeConfig`] feeds the outbound trigger, the FOUC guard and the
//! inbound trigger, so both sides of a navigation always agree on duration,
//! easing and shift distance.
//!
//! # Example
//!
//! ```rust
//! use pagefade::config::PageFadeConfig;
//!
//! let config = PageFadeConfig::from_json(r#"{
//!     "transition": { "duration_ms": 600, "shift": "-20px" },
//!     "selectors": { "wrapper": "main" }
//! }"#).unwrap();
//!
//! assert_eq!(config.transition.duration_ms, 600);
//! assert_eq!(config.selectors.wrapper, "main");
//! assert_eq!(config.storage_key, "isTransitioning");
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::PageFadeConfigBuilder;
pub use violations::{ConfigError, ConfigViolation};

use crate::style::{fade_transition, Easing, Length};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;

/// Timing shared by the fade-out and the fade-in of the wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Offset the wrapper moves to while hidden; negative is up.
    pub shift: Length,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 800,
            easing: Easing::EaseInOut,
            shift: Length::px(-30),
        }
    }
}

impl TransitionConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Inline `transition` value for the wrapper.
    pub fn transition_css(&self) -> String {
        fade_transition(self.duration_ms, self.easing, 0)
    }
}

/// Per-element scroll reveal options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Starting offset below the final position.
    pub distance: Length,
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: Easing,
    /// Visible fraction that triggers the reveal.
    pub threshold: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            distance: Length::px(50),
            duration_ms: 1000,
            delay_ms: 0,
            easing: Easing::EaseInOut,
            threshold: 0.1,
        }
    }
}

impl RevealOptions {
    /// Shorter, slightly delayed variant used for page content blocks.
    pub fn deployment() -> Self {
        Self {
            distance: Length::px(30),
            duration_ms: 800,
            delay_ms: 100,
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn transition_css(&self) -> String {
        fade_transition(self.duration_ms, self.easing, self.delay_ms)
    }
}

/// Selectors and class names tying the triggers to page markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// The single wrapper holding the page content.
    pub wrapper: String,
    /// Class marking scroll-reveal elements.
    pub reveal_marker: String,
    /// Class that opts a link out of the fade-out.
    pub opt_out_class: String,
    /// Class whose stylesheet rule fades the wrapper in.
    pub revealed_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            wrapper: "#inner-wrap".to_string(),
            reveal_marker: "fade-up-element".to_string(),
            opt_out_class: "no-fade-transition".to_string(),
            revealed_class: "transition-active".to_string(),
        }
    }
}

/// How the inbound trigger animates the wrapper back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FadeInMode {
    /// Clear the inline hidden state and let the revealing class's
    /// stylesheet transition run.
    #[default]
    StylesheetClass,
    /// Drive the fade with inline styles after a short settle delay.
    Inline { settle_delay_ms: u64 },
}

impl FadeInMode {
    pub const DEFAULT_SETTLE_DELAY_MS: u64 = 10;

    pub fn inline() -> Self {
        Self::Inline {
            settle_delay_ms: Self::DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

/// Complete configuration for one site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFadeConfig {
    pub transition: TransitionConfig,
    pub reveal: RevealOptions,
    pub selectors: Selectors,
    /// Storage key of the persisted transition flag.
    pub storage_key: String,
    pub fade_in: FadeInMode,
}

impl Default for PageFadeConfig {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            reveal: RevealOptions::deployment(),
            selectors: Selectors::default(),
            storage_key: "isTransitioning".to_string(),
            fade_in: FadeInMode::default(),
        }
    }
}

impl PageFadeConfig {
    pub fn builder() -> PageFadeConfigBuilder {
        PageFadeConfigBuilder::new()
    }

    /// Parse JSON (missing fields take their defaults) and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PageFadeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every rule, reporting all violations together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match rules::check(self) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(ConfigError::Invalid(errors.iter().cloned().collect())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployed_site() {
        let config = PageFadeConfig::default();

        assert_eq!(config.transition.duration_ms, 800);
        assert_eq!(config.transition.easing, Easing::EaseInOut);
        assert_eq!(config.transition.shift, Length::px(-30));
        assert_eq!(config.reveal, RevealOptions::deployment());
        assert_eq!(config.selectors.wrapper, "#inner-wrap");
        assert_eq!(config.storage_key, "isTransitioning");
        assert_eq!(config.fade_in, FadeInMode::StylesheetClass);
    }

    #[test]
    fn reveal_library_defaults() {
        let options = RevealOptions::default();

        assert_eq!(options.distance, Length::px(50));
        assert_eq!(options.duration_ms, 1000);
        assert_eq!(options.delay_ms, 0);
        assert!((options.threshold - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = PageFadeConfig::from_json("{}").unwrap();
        assert_eq!(config, PageFadeConfig::default());
    }

    #[test]
    fn json_roundtrip_preserves_fade_in_mode() {
        let config = PageFadeConfig {
            fade_in: FadeInMode::inline(),
            ..PageFadeConfig::default()
        };

        let json = config.to_json().unwrap();
        let back = PageFadeConfig::from_json(&json).unwrap();

        assert_eq!(back.fade_in, FadeInMode::Inline { settle_delay_ms: 10 });
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PageFadeConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_rejected_on_load() {
        let err = PageFadeConfig::from_json(r#"{ "transition": { "duration_ms": 0 } }"#).unwrap_err();

        match err {
            ConfigError::Invalid(violations) => assert_eq!(violations.len(), 1),
            other => panic!("expected validation failure, got {other}"),
        }
    }

    #[test]
    fn transition_css_uses_duration_and_easing() {
        assert_eq!(
            TransitionConfig::default().transition_css(),
            "opacity 800ms ease-in-out, transform 800ms ease-in-out"
        );
        assert_eq!(
            RevealOptions::deployment().transition_css(),
            "opacity 800ms ease-in-out 100ms, transform 800ms ease-in-out 100ms"
        );
    }
}
