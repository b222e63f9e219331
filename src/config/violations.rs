//! Configuration violations and errors.

use thiserror::Error;

/// A single problem found while validating a [`PageFadeConfig`](super::PageFadeConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("{field} of {value}ms exceeds the {max}ms limit")]
    DurationTooLong {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("reveal threshold {0} must be a finite fraction in [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },

    #[error("{field} uses an invalid easing curve: {easing}")]
    InvalidEasing { field: &'static str, easing: String },

    #[error("inline settle delay of {settle_delay_ms}ms must be shorter than the {duration_ms}ms fade")]
    SettleDelayTooLong {
        settle_delay_ms: u64,
        duration_ms: u64,
    },
}

/// Errors from loading or building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration is invalid: {}", describe(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_error_lists_every_violation() {
        let err = ConfigError::Invalid(vec![
            ConfigViolation::ZeroDuration {
                field: "transition.duration_ms",
            },
            ConfigViolation::EmptyName {
                field: "storage_key",
            },
        ]);

        assert_eq!(
            err.to_string(),
            "configuration is invalid: transition.duration_ms must be greater than zero; storage_key must not be empty"
        );
    }
}
