//! Validation rules for [`PageFadeConfig`].
//!
//! Checks run with stillwater's `Validation` so every violation is reported
//! at once instead of stopping at the first.

use super::violations::ConfigViolation;
use super::{FadeInMode, PageFadeConfig};
use crate::style::Easing;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Longest animation window accepted for any fade.
pub const MAX_DURATION_MS: u64 = 10_000;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn duration(field: &'static str, value: u64) -> Check {
    if value == 0 {
        Validation::fail(ConfigViolation::ZeroDuration { field })
    } else if value > MAX_DURATION_MS {
        Validation::fail(ConfigViolation::DurationTooLong {
            field,
            value,
            max: MAX_DURATION_MS,
        })
    } else {
        Validation::success(())
    }
}

fn delay(field: &'static str, value: u64) -> Check {
    if value > MAX_DURATION_MS {
        Validation::fail(ConfigViolation::DurationTooLong {
            field,
            value,
            max: MAX_DURATION_MS,
        })
    } else {
        Validation::success(())
    }
}

fn name(field: &'static str, value: &str) -> Check {
    if value.trim().is_empty() {
        Validation::fail(ConfigViolation::EmptyName { field })
    } else {
        Validation::success(())
    }
}

fn easing(field: &'static str, value: Easing) -> Check {
    if value.is_valid() {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::InvalidEasing {
            field,
            easing: value.to_string(),
        })
    }
}

fn threshold(value: f64) -> Check {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::ThresholdOutOfRange(value))
    }
}

fn fade_in(mode: FadeInMode, duration_ms: u64) -> Check {
    match mode {
        FadeInMode::Inline { settle_delay_ms } if settle_delay_ms >= duration_ms => {
            Validation::fail(ConfigViolation::SettleDelayTooLong {
                settle_delay_ms,
                duration_ms,
            })
        }
        _ => Validation::success(()),
    }
}

/// Run every rule, accumulating ALL violations.
pub fn check(config: &PageFadeConfig) -> Check {
    let checks = vec![
        duration("transition.duration_ms", config.transition.duration_ms),
        easing("transition.easing", config.transition.easing),
        duration("reveal.duration_ms", config.reveal.duration_ms),
        delay("reveal.delay_ms", config.reveal.delay_ms),
        easing("reveal.easing", config.reveal.easing),
        threshold(config.reveal.threshold),
        name("selectors.wrapper", &config.selectors.wrapper),
        name("selectors.reveal_marker", &config.selectors.reveal_marker),
        name("selectors.opt_out_class", &config.selectors.opt_out_class),
        name("selectors.revealed_class", &config.selectors.revealed_class),
        name("storage_key", &config.storage_key),
        fade_in(config.fade_in, config.transition.duration_ms),
    ];

    Validation::all_vec(checks).map(|_| ())
}
