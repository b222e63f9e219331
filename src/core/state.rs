//! Core State trait for transition phases.
//!
//! Every phase enum driven by a [`PhaseMachine`](crate::machine::PhaseMachine)
//! implements this trait. The methods are pure and only inspect the value.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for phase machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the transition history
/// - `PartialEq`: transitions match on their source state
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: histories can be exported
///
/// # Example
///
/// ```rust
/// use pagefade::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Fade {
///     Hidden,
///     Shown,
/// }
///
/// impl State for Fade {
///     fn name(&self) -> &str {
///         match self {
///             Self::Hidden => "Hidden",
///             Self::Shown => "Shown",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Shown)
///     }
/// }
///
/// assert!(Fade::Shown.is_final());
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Name used in logs and history dumps.
    fn name(&self) -> &str;

    /// Terminal states accept no further events.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
