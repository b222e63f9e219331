//! Synchronous phase machine.

use crate::core::{State, StateHistory, StateTransition};
use crate::machine::transition::{Transition, TransitionError};
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Table-driven state machine.
///
/// Events are applied one at a time with [`fire`](Self::fire). The caller
/// passes the clock reading so the history stays deterministic under a
/// virtual clock.
pub struct PhaseMachine<S: State, E> {
    current: S,
    transitions: Vec<Transition<S, E>>,
    history: StateHistory<S>,
}

impl<S: State, E: PartialEq + Debug> PhaseMachine<S, E> {
    /// Create a machine in the initial state with no edges.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: Vec::new(),
            history: StateHistory::new(),
        }
    }

    /// Add several edges.
    pub fn with_transitions(mut self, transitions: impl IntoIterator<Item = Transition<S, E>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check if machine is in a final state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Get state history (pure)
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Whether `event` would be accepted right now (pure).
    pub fn can_fire(&self, event: &E) -> bool {
        !self.current.is_final()
            && self
                .transitions
                .iter()
                .any(|t| t.can_execute(&self.current, event))
    }

    /// Apply `event`, moving to the target state of the first matching edge.
    pub fn fire(&mut self, event: E, at: DateTime<Utc>) -> Result<&S, TransitionError> {
        if self.current.is_final() {
            return Err(TransitionError::Finished {
                state: self.current.name().to_string(),
            });
        }

        let Some(transition) = self
            .transitions
            .iter()
            .find(|t| t.can_execute(&self.current, &event))
        else {
            return Err(TransitionError::NoTransition {
                from: self.current.name().to_string(),
                event: format!("{event:?}"),
            });
        };

        let next = transition.to.clone();
        self.history = self.history.record(StateTransition {
            from: self.current.clone(),
            to: next.clone(),
            trigger: format!("{event:?}"),
            timestamp: at,
        });
        self.current = next;
        Ok(&self.current)
    }
}
