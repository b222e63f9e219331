//! Clock and timer services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Continuations a document schedules for later.
///
/// Timers belong to the document that scheduled them and are dropped by the
/// host when that document unloads. None of them can be cancelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Assign the location once the fade-out window has elapsed.
    Navigate { destination: String },
    /// Inline fade-in: apply the transition and final state after the settle delay.
    BeginInlineFadeIn,
    /// Inline fade-in: drop the inline transition hints.
    ClearInlineTransition,
    /// The fade-in animation window has elapsed.
    SettleFadeIn,
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Timer queue of the browser's event loop.
pub trait Scheduler: Clock {
    /// Run `task` once, `delay` from now.
    fn schedule(&mut self, delay: Duration, task: Deferred);
}
