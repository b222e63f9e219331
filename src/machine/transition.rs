//! Transition table entries.

use crate::core::State;

/// Errors raised when an event cannot be applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("No transition for event '{event}' from state '{from}'")]
    NoTransition { from: String, event: String },

    #[error("State '{state}' is final and accepts no events")]
    Finished { state: String },
}

/// An edge of the phase machine: `from --on--> to`.
#[derive(Clone, Debug)]
pub struct Transition<S: State, E> {
    pub from: S,
    pub on: E,
    pub to: S,
}

impl<S: State, E: PartialEq> Transition<S, E> {
    pub fn new(from: S, on: E, to: S) -> Self {
        Self { from, on, to }
    }

    /// Check if this edge applies to `event` in `current` (pure).
    pub fn can_execute(&self, current: &S, event: &E) -> bool {
        *current == self.from && *event == self.on
    }
}
