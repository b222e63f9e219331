//! Fluent builder for [`PageFadeConfig`].

use super::{ConfigError, FadeInMode, PageFadeConfig, RevealOptions};
use crate::style::{Easing, Length};

/// Builder starting from the defaults; `build` validates.
///
/// # Example
///
/// ```rust
/// use pagefade::config::PageFadeConfig;
/// use pagefade::style::Length;
///
/// let config = PageFadeConfig::builder()
///     .duration_ms(500)
///     .shift(Length::px(-20))
///     .wrapper_selector("#page")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.transition.duration_ms, 500);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PageFadeConfigBuilder {
    config: PageFadeConfig,
}

impl PageFadeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fade-out and fade-in duration.
    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.config.transition.duration_ms = ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.config.transition.easing = easing;
        self
    }

    /// Offset applied to the hidden wrapper.
    pub fn shift(mut self, shift: Length) -> Self {
        self.config.transition.shift = shift;
        self
    }

    pub fn reveal(mut self, options: RevealOptions) -> Self {
        self.config.reveal = options;
        self
    }

    pub fn wrapper_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.selectors.wrapper = selector.into();
        self
    }

    pub fn reveal_marker(mut self, class: impl Into<String>) -> Self {
        self.config.selectors.reveal_marker = class.into();
        self
    }

    pub fn opt_out_class(mut self, class: impl Into<String>) -> Self {
        self.config.selectors.opt_out_class = class.into();
        self
    }

    pub fn revealed_class(mut self, class: impl Into<String>) -> Self {
        self.config.selectors.revealed_class = class.into();
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    pub fn fade_in(mut self, mode: FadeInMode) -> Self {
        self.config.fade_in = mode;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<PageFadeConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
