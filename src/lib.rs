//! Pagefade: scroll reveal and cross-navigation page fades
//!
//! Pagefade animates a page in two independent ways:
//!
//! - **Scroll reveal**: marked elements fade up into place the first time
//!   they scroll into view.
//! - **Page transitions**: a click on an internal link fades the page
//!   wrapper up and out, persists a small flag, and navigates once the
//!   animation has finished. The next page hides its wrapper before first
//!   paint, consumes the flag and fades back in.
//!
//! The logic is a pure phase machine driven through host traits
//! ([`host`]). A browser binding implements those traits; the in-memory
//! [`sim`] module implements them for tests.
//!
//! # Core Concepts
//!
//! - **Phases**: every document moves through [`lifecycle::PagePhase`]
//! - **Handoff**: the persisted flag is written by a [`handoff::FlagWriter`]
//!   and consumed once by a [`handoff::FlagReader`]
//! - **Sessions**: a [`session::PageSession`] routes one document's events
//!
//! # Example
//!
//! ```rust
//! use pagefade::config::PageFadeConfig;
//! use pagefade::sim::{Browser, VirtualPage};
//! use std::time::Duration;
//!
//! let mut browser = Browser::new(PageFadeConfig::default(), |url| {
//!     let mut page = VirtualPage::at(url);
//!     let body = page.body();
//!     let wrap = page.append(body, "div").attr_id("inner-wrap").node();
//!     page.append(wrap, "a").href("/next/");
//!     page
//! });
//!
//! browser.open("https://example.com/").unwrap();
//! let link = browser.page().unwrap().links()[0];
//! browser.click(link).unwrap();
//! browser.advance(Duration::from_millis(800)).unwrap();
//!
//! assert_eq!(browser.loads().len(), 2);
//! assert_eq!(browser.loads()[1].url, "https://example.com/next/");
//! ```

pub mod config;
pub mod core;
pub mod handoff;
pub mod host;
pub mod inbound;
pub mod lifecycle;
pub mod machine;
pub mod outbound;
pub mod reveal;
pub mod session;
pub mod sim;
pub mod style;

// Re-export commonly used types
pub use config::{ConfigError, PageFadeConfig};
pub use core::{Guard, State, StateHistory, StateTransition};
pub use lifecycle::{PageEvent, PagePhase};
pub use session::PageSession;
