//! Phase transition history.
//!
//! Every transition the phase machine performs is appended here together with
//! the event that caused it and the host clock reading at that moment.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Name of the event that fired the transition
    pub trigger: String,
    /// Host clock reading when the transition happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// `record` returns a new history and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use pagefade::core::{StateHistory, StateTransition};
/// use pagefade::lifecycle::PagePhase;
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: PagePhase::Idle,
///     to: PagePhase::FadingOut,
///     trigger: "LinkIntercepted".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&PagePhase::Idle, &PagePhase::FadingOut]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first source state, then each target state.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Elapsed time between the first and the last transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Hidden,
        Revealing,
        Shown,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Hidden => "Hidden",
                Self::Revealing => "Revealing",
                Self::Shown => "Shown",
            }
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::default() + chrono::Duration::milliseconds(ms)
    }

    fn step(from: TestState, to: TestState, ms: i64) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            trigger: "test".to_string(),
            timestamp: at(ms),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let next = history.record(step(TestState::Hidden, TestState::Revealing, 0));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(next.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step(TestState::Hidden, TestState::Revealing, 0))
            .record(step(TestState::Revealing, TestState::Shown, 800));

        assert_eq!(
            history.get_path(),
            vec![&TestState::Hidden, &TestState::Revealing, &TestState::Shown]
        );
    }

    #[test]
    fn duration_uses_recorded_timestamps() {
        let history = StateHistory::new()
            .record(step(TestState::Hidden, TestState::Revealing, 10))
            .record(step(TestState::Revealing, TestState::Shown, 810));

        assert_eq!(history.duration(), Some(Duration::from_millis(800)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step(TestState::Hidden, TestState::Shown, 0));

        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.transitions().len(), 1);
        assert_eq!(back.transitions()[0].trigger, "test");
    }
}
