//! Table-driven phase machine around the pure core.
//!
//! Transitions are plain `(from, event, to)` edges. The machine applies
//! events synchronously and records every move in a
//! [`StateHistory`](crate::core::StateHistory) stamped with the injected
//! clock, so timing properties can be checked without real timers.

#[allow(clippy::module_inception)]
mod machine;
mod transition;

pub use machine::PhaseMachine;
pub use transition::{Transition, TransitionError};
