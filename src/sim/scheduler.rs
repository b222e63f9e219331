//! Virtual clock and timer queue.

use crate::host::{Clock, Deferred, Scheduler};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

/// Timer queue driven by hand.
///
/// Tasks fire in order of due time, then insertion. Time only moves when a
/// task is popped or the clock is advanced explicitly.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: DateTime<Utc>,
    seq: u64,
    queue: BTreeMap<(DateTime<Utc>, u64), Deferred>,
}

impl ManualScheduler {
    /// Starts at the Unix epoch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// `window` from now.
    pub fn deadline(&self, window: Duration) -> DateTime<Utc> {
        offset(self.now, window)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to it.
    pub fn pop_due(&mut self, until: DateTime<Utc>) -> Option<(DateTime<Utc>, Deferred)> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let ((due, _), task) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        Some((due, task))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, at: DateTime<Utc>) {
        self.now = self.now.max(at);
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Every queued task with its due time, in firing order.
    pub fn pending(&self) -> Vec<(DateTime<Utc>, Deferred)> {
        self.queue
            .iter()
            .map(|((due, _), task)| (*due, task.clone()))
            .collect()
    }

    /// Drop every queued task, as when the document unloads.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

fn offset(from: DateTime<Utc>, delay: Duration) -> DateTime<Utc> {
    let millis = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
    chrono::Duration::try_milliseconds(millis)
        .and_then(|delta| from.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl Clock for ManualScheduler {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: Deferred) {
        let due = offset(self.now, delay);
        self.queue.insert((due, self.seq), task);
        self.seq += 1;
    }
}
