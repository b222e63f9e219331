//! Incoming half of a page transition.
//!
//! [`FoucGuard`] runs before first paint and hides the wrapper instantly.
//! [`InboundTrigger`] runs at DOMContentLoaded, consumes the persisted flag
//! and either fades the wrapper in or reveals it at once. Every path ends
//! with the wrapper visible; storage failures only change *how* it appears.

use crate::config::{FadeInMode, PageFadeConfig, TransitionConfig};
use crate::handoff::{FlagReader, FlagReading, FlagWriter, TransitionFlag};
use crate::host::{Deferred, KeyValueStore, NodeId, Page, PageError, Scheduler, StorageError};
use crate::style::{translate_y, Length, StyleProperty, WILL_CHANGE_HINT};
use std::time::Duration;
use tracing::{debug, warn};

/// Extra time after an inline fade before its transition hints are dropped.
pub const INLINE_CLEANUP_MARGIN: Duration = Duration::from_millis(50);

/// What the pre-paint guard managed to do.
#[derive(Clone, Debug, PartialEq)]
pub struct GuardOutcome {
    /// The wrapper, if it was found and hidden.
    pub hidden: Option<NodeId>,
    /// Set when the marker could not be written.
    pub marker_error: Option<StorageError>,
}

/// Pre-paint guard against a flash of the fully visible page.
#[derive(Clone, Debug)]
pub struct FoucGuard {
    wrapper_selector: String,
    shift: Length,
    marker: FlagWriter,
}

impl FoucGuard {
    pub fn new(config: &PageFadeConfig) -> Self {
        Self {
            wrapper_selector: config.selectors.wrapper.clone(),
            shift: config.transition.shift,
            marker: TransitionFlag::new(config.storage_key.clone()).writer(),
        }
    }

    /// Write the marker and hide the wrapper without a transition.
    pub fn apply(&self, page: &mut dyn Page, storage: &mut dyn KeyValueStore) -> GuardOutcome {
        let marker_error = self.marker.commit(storage).err();
        if let Some(error) = &marker_error {
            warn!(%error, "could not write transition marker before paint");
        }

        let hidden = match page.query_selector(&self.wrapper_selector) {
            Some(wrapper) => {
                let offset = translate_y(self.shift);
                let result = page.set_styles(
                    wrapper,
                    &[
                        (StyleProperty::Transition, "none"),
                        (StyleProperty::Opacity, "0"),
                        (StyleProperty::Transform, offset.as_str()),
                    ],
                );
                match result {
                    Ok(()) => Some(wrapper),
                    Err(error) => {
                        warn!(selector = %self.wrapper_selector, %error, "could not hide wrapper before paint");
                        None
                    }
                }
            }
            None => None,
        };

        GuardOutcome {
            hidden,
            marker_error,
        }
    }
}

/// Why the wrapper was shown without a fade.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealCause {
    NoFlag,
    Unrecognized(String),
    StorageFailed(StorageError),
    /// The inline fade could not be prepared.
    StyleFailed(PageError),
}

/// Result of the DOMContentLoaded decision.
#[derive(Clone, Debug, PartialEq)]
pub enum InboundOutcome {
    /// No wrapper; nothing to show.
    WrapperMissing,
    /// The flag was already consumed by this document.
    AlreadyHandled,
    /// A fade-in is running and settles after `settles_after`.
    FadingIn { settles_after: Duration },
    RevealedImmediately { cause: RevealCause },
}

/// Progress reported for fade-in timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeInProgress {
    Animating,
    Settled,
    /// The wrapper left the document before the fade finished.
    WrapperGone,
}

/// Per-document inbound trigger.
#[derive(Debug)]
pub struct InboundTrigger {
    wrapper_selector: String,
    revealed_class: String,
    transition: TransitionConfig,
    mode: FadeInMode,
    reader: Option<FlagReader>,
}

impl InboundTrigger {
    pub fn new(config: &PageFadeConfig) -> Self {
        Self {
            wrapper_selector: config.selectors.wrapper.clone(),
            revealed_class: config.selectors.revealed_class.clone(),
            transition: config.transition,
            mode: config.fade_in,
            reader: Some(TransitionFlag::new(config.storage_key.clone()).reader()),
        }
    }

    /// Consume the flag and show the wrapper.
    pub fn on_dom_content_loaded(
        &mut self,
        page: &mut dyn Page,
        storage: &mut dyn KeyValueStore,
        scheduler: &mut dyn Scheduler,
    ) -> InboundOutcome {
        let Some(wrapper) = page.query_selector(&self.wrapper_selector) else {
            warn!(selector = %self.wrapper_selector, "page wrapper not found, fade-in skipped");
            return InboundOutcome::WrapperMissing;
        };
        let Some(reader) = self.reader.take() else {
            debug!("transition flag already consumed for this document");
            return InboundOutcome::AlreadyHandled;
        };

        let cause = match reader.consume(storage) {
            Ok(consumed) => {
                if let Some(error) = consumed.clear_error {
                    warn!(%error, "could not clear transition flag");
                }
                match consumed.reading {
                    FlagReading::Transitioning => {
                        return self.fade_in(wrapper, page, scheduler);
                    }
                    FlagReading::Absent => RevealCause::NoFlag,
                    FlagReading::Unrecognized(value) => {
                        debug!(%value, "ignoring unrecognized transition flag");
                        RevealCause::Unrecognized(value)
                    }
                }
            }
            Err(error) => {
                warn!(%error, "could not read transition flag, revealing page");
                RevealCause::StorageFailed(error)
            }
        };

        self.reveal_with_class(wrapper, page);
        InboundOutcome::RevealedImmediately { cause }
    }

    /// Advance a fade-in timer. Returns `None` for tasks that are not ours.
    pub fn on_timer(
        &mut self,
        task: &Deferred,
        page: &mut dyn Page,
        scheduler: &mut dyn Scheduler,
    ) -> Option<FadeInProgress> {
        let progress = match task {
            Deferred::BeginInlineFadeIn => {
                let Some(wrapper) = page.query_selector(&self.wrapper_selector) else {
                    return Some(FadeInProgress::WrapperGone);
                };
                if let Err(error) = self.animate_inline(wrapper, page) {
                    warn!(%wrapper, %error, "inline fade-in failed, forcing wrapper visible");
                    self.reveal_with_class(wrapper, page);
                    return Some(FadeInProgress::Settled);
                }
                scheduler.schedule(
                    self.transition.duration() + INLINE_CLEANUP_MARGIN,
                    Deferred::ClearInlineTransition,
                );
                FadeInProgress::Animating
            }
            Deferred::ClearInlineTransition => {
                let Some(wrapper) = page.query_selector(&self.wrapper_selector) else {
                    return Some(FadeInProgress::WrapperGone);
                };
                let cleared = page.set_styles(
                    wrapper,
                    &[(StyleProperty::Transition, ""), (StyleProperty::WillChange, "")],
                );
                if let Err(error) = cleared {
                    debug!(%wrapper, %error, "could not drop inline transition hints");
                }
                FadeInProgress::Settled
            }
            Deferred::SettleFadeIn => FadeInProgress::Settled,
            Deferred::Navigate { .. } => return None,
        };
        Some(progress)
    }

    fn fade_in(
        &self,
        wrapper: NodeId,
        page: &mut dyn Page,
        scheduler: &mut dyn Scheduler,
    ) -> InboundOutcome {
        match self.mode {
            FadeInMode::StylesheetClass => {
                self.reveal_with_class(wrapper, page);
                let settles_after = self.transition.duration();
                scheduler.schedule(settles_after, Deferred::SettleFadeIn);
                InboundOutcome::FadingIn { settles_after }
            }
            FadeInMode::Inline { settle_delay_ms } => {
                let offset = translate_y(self.transition.shift);
                let hidden = page.set_styles(
                    wrapper,
                    &[
                        (StyleProperty::Transition, "none"),
                        (StyleProperty::Opacity, "0"),
                        (StyleProperty::Transform, offset.as_str()),
                    ],
                );
                if let Err(error) = hidden {
                    warn!(%wrapper, %error, "could not reset wrapper for inline fade-in, revealing");
                    self.reveal_with_class(wrapper, page);
                    return InboundOutcome::RevealedImmediately {
                        cause: RevealCause::StyleFailed(error),
                    };
                }
                let settle = Duration::from_millis(settle_delay_ms);
                scheduler.schedule(settle, Deferred::BeginInlineFadeIn);
                InboundOutcome::FadingIn {
                    settles_after: settle + self.transition.duration() + INLINE_CLEANUP_MARGIN,
                }
            }
        }
    }

    fn animate_inline(&self, wrapper: NodeId, page: &mut dyn Page) -> Result<(), PageError> {
        let timing = self.transition.transition_css();
        let settled = translate_y(Length::ZERO);
        page.set_styles(
            wrapper,
            &[
                (StyleProperty::Transition, timing.as_str()),
                (StyleProperty::WillChange, WILL_CHANGE_HINT),
                (StyleProperty::Opacity, "1"),
                (StyleProperty::Transform, settled.as_str()),
            ],
        )
    }

    /// Drop the inline hidden state and hand over to the revealing class.
    fn reveal_with_class(&self, wrapper: NodeId, page: &mut dyn Page) {
        let cleared = page.set_styles(
            wrapper,
            &[
                (StyleProperty::Opacity, ""),
                (StyleProperty::Transform, ""),
                (StyleProperty::Transition, ""),
            ],
        );
        if let Err(error) = cleared {
            warn!(%wrapper, %error, "could not clear inline hidden state");
        }
        if let Err(error) = page.add_class(wrapper, &self.revealed_class) {
            warn!(%wrapper, %error, class = %self.revealed_class, "could not apply revealing class");
        }
    }
}
