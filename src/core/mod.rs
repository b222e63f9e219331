//! Pure core of the phase machine.
//!
//! - State definitions via the `State` trait (and the `state_enum!` macro)
//! - Guard predicates for link rules
//! - Immutable, timestamped history
//!
//! Nothing here touches the page, storage or timers.

#[macro_use]
mod macros;
mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
