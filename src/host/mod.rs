//! Services the browser provides.
//!
//! The transition logic only talks to the page through these traits. The
//! [`sim`](crate::sim) module implements all of them in memory.

mod error;
mod page;
mod schedule;
mod storage;
mod viewport;

pub use error::{PageError, StorageError};
pub use page::{ClickEvent, Link, Modifiers, NodeId, Page};
pub use schedule::{Clock, Deferred, Scheduler};
pub use storage::KeyValueStore;
pub use viewport::{IntersectionEntry, IntersectionWatcher};

/// Borrowed view of every host service a document needs.
pub struct HostEnv<'a> {
    pub page: &'a mut dyn Page,
    pub storage: &'a mut dyn KeyValueStore,
    pub scheduler: &'a mut dyn Scheduler,
    pub viewport: &'a mut dyn IntersectionWatcher,
}
