//! Deterministic in-memory host.
//!
//! Implements every [`host`](crate::host) trait without a browser: a
//! document tree with inline styles and class rules, origin storage with
//! failure injection, a manually advanced clock and a viewport that records
//! subscriptions. [`Browser`] ties them together and follows navigations so
//! complete click-to-next-page cycles can be driven from tests.

mod browser;
mod page;
mod scheduler;
mod store;
mod viewport;

pub use browser::{Browser, LoadRecord, NavigationKind, NavigationRecord, SimError};
pub use page::{ElementBuilder, VirtualPage};
pub use scheduler::ManualScheduler;
pub use store::{MemoryStore, StoreWrite};
pub use viewport::RecordingViewport;
