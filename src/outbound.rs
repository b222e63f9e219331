//! Outbound transition trigger.
//!
//! Turns a click on a qualifying link into a deferred, animated navigation:
//! the default navigation is suppressed, the transition flag is committed,
//! the wrapper fades up and out, and the location is assigned exactly one
//! animation window later. If the fade cannot be started the trigger
//! navigates immediately instead.

use crate::config::{PageFadeConfig, TransitionConfig};
use crate::core::Guard;
use crate::handoff::{FlagWriter, TransitionFlag};
use crate::host::{
    ClickEvent, Deferred, KeyValueStore, Link, Modifiers, Page, PageError, Scheduler,
};
use crate::style::{translate_y, StyleProperty, WILL_CHANGE_HINT};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Why a click was left to the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exclusion {
    /// The click was not inside a link.
    NoLink,
    /// The link has no destination.
    NoDestination,
    /// A modifier key or a non-primary button was used.
    ModifiedClick,
    /// The link opens another browsing context.
    NewBrowsingContext,
    /// Not an http(s) destination.
    UnsupportedScheme,
    /// Fragment link into the current page.
    SamePageFragment,
    /// The link carries the opt-out class.
    OptedOut,
    /// A rule added with [`LinkFilter::with_rule`].
    Custom(String),
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLink => f.write_str("no link"),
            Self::NoDestination => f.write_str("no destination"),
            Self::ModifiedClick => f.write_str("modified click"),
            Self::NewBrowsingContext => f.write_str("new browsing context"),
            Self::UnsupportedScheme => f.write_str("unsupported scheme"),
            Self::SamePageFragment => f.write_str("same-page fragment"),
            Self::OptedOut => f.write_str("opted out"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// A resolved link together with the click and document it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkCandidate {
    pub link: Link,
    pub current_path: String,
    pub modifiers: Modifiers,
    pub button: u16,
}

/// Ordered exclusion rules; the first matching rule wins.
#[derive(Clone, Debug)]
pub struct LinkFilter {
    rules: Vec<(Exclusion, Guard<LinkCandidate>)>,
}

impl LinkFilter {
    /// The rules every site gets.
    pub fn standard(opt_out_class: &str) -> Self {
        let opt_out = opt_out_class.to_string();
        let rules = vec![
            (
                Exclusion::NoDestination,
                Guard::new(|c: &LinkCandidate| c.link.href.is_empty()),
            ),
            (
                Exclusion::ModifiedClick,
                Guard::new(|c: &LinkCandidate| c.modifiers.any() || c.button != 0),
            ),
            (
                Exclusion::NewBrowsingContext,
                Guard::new(|c: &LinkCandidate| c.link.opens_new_context()),
            ),
            (
                Exclusion::UnsupportedScheme,
                Guard::new(|c: &LinkCandidate| !matches!(c.link.protocol.as_str(), "http:" | "https:")),
            ),
            (
                Exclusion::SamePageFragment,
                Guard::new(|c: &LinkCandidate| {
                    c.link.pathname == c.current_path && !c.link.hash.is_empty()
                }),
            ),
            (
                Exclusion::OptedOut,
                Guard::new(move |c: &LinkCandidate| c.link.has_class(&opt_out)),
            ),
        ];
        Self { rules }
    }

    /// Append a site-specific rule.
    pub fn with_rule<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&LinkCandidate) -> bool + Send + Sync + 'static,
    {
        self.rules
            .push((Exclusion::Custom(name.into()), Guard::new(predicate)));
        self
    }

    /// First rule excluding `candidate`, if any.
    pub fn exclusion(&self, candidate: &LinkCandidate) -> Option<Exclusion> {
        self.rules
            .iter()
            .find(|(_, guard)| guard.check(candidate))
            .map(|(exclusion, _)| exclusion.clone())
    }
}

/// What the trigger did with a click.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// No wrapper was found at setup; clicks are never intercepted.
    Inactive,
    /// Default navigation proceeds untouched.
    Ignored(Exclusion),
    /// Fade-out started; navigation is scheduled after `navigate_after`.
    Intercepted {
        destination: String,
        navigate_after: Duration,
    },
    /// A fade-out is already pending; this click was swallowed.
    Suppressed { destination: String },
    /// The fade could not start; navigated immediately.
    FallbackNavigated {
        destination: String,
        error: PageError,
    },
}

/// Per-document outbound trigger.
#[derive(Debug)]
pub struct OutboundTrigger {
    active: bool,
    wrapper_selector: String,
    transition: TransitionConfig,
    filter: LinkFilter,
    writer: FlagWriter,
    pending: Option<String>,
}

impl OutboundTrigger {
    /// Look up the wrapper and pre-set its transition timing.
    ///
    /// Without a wrapper the trigger stays inactive for the whole document
    /// and every click navigates normally.
    pub fn setup(config: &PageFadeConfig, page: &mut dyn Page) -> Self {
        let selector = config.selectors.wrapper.clone();
        let active = page.query_selector(&selector).is_some();
        if !active {
            warn!(%selector, "page wrapper not found, fade-out on navigation disabled");
        }

        let trigger = Self {
            active,
            wrapper_selector: selector,
            transition: config.transition,
            filter: LinkFilter::standard(&config.selectors.opt_out_class),
            writer: TransitionFlag::new(config.storage_key.clone()).writer(),
            pending: None,
        };
        trigger.prime(page);
        trigger
    }

    /// Put the fade-out timing and hint on the wrapper ahead of any click.
    ///
    /// The pre-paint guard and the fade-in both rewrite the wrapper's
    /// transition, so this runs again once the page has settled.
    pub fn prime(&self, page: &mut dyn Page) {
        if !self.active || self.pending.is_some() {
            return;
        }
        let Some(wrapper) = page.query_selector(&self.wrapper_selector) else {
            return;
        };
        if let Err(error) = apply_timing(page, wrapper, &self.transition) {
            error!(selector = %self.wrapper_selector, %error, "could not pre-apply fade-out timing");
        }
    }

    /// Replace the exclusion rules.
    pub fn with_filter(mut self, filter: LinkFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Destination of the fade-out in flight, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Capture-phase click handler.
    pub fn on_click(
        &mut self,
        event: &mut ClickEvent,
        page: &mut dyn Page,
        storage: &mut dyn KeyValueStore,
        scheduler: &mut dyn Scheduler,
    ) -> ClickOutcome {
        if !self.active {
            return ClickOutcome::Inactive;
        }
        let Some(link) = page.closest_link(event.target) else {
            return ClickOutcome::Ignored(Exclusion::NoLink);
        };
        let candidate = LinkCandidate {
            link,
            current_path: page.location_path(),
            modifiers: event.modifiers,
            button: event.button,
        };
        if let Some(exclusion) = self.filter.exclusion(&candidate) {
            debug!(href = %candidate.link.href, %exclusion, "click left to the browser");
            return ClickOutcome::Ignored(exclusion);
        }

        let destination = candidate.link.href;
        event.prevent_default();

        if let Some(pending) = &self.pending {
            debug!(%destination, %pending, "fade-out already pending, click suppressed");
            return ClickOutcome::Suppressed { destination };
        }
        self.pending = Some(destination.clone());

        if let Err(error) = self.writer.commit(storage) {
            warn!(%error, "could not persist transition flag, next page will not fade in");
        }

        match self.start_fade_out(page) {
            Ok(()) => {
                let navigate_after = self.transition.duration();
                scheduler.schedule(
                    navigate_after,
                    Deferred::Navigate {
                        destination: destination.clone(),
                    },
                );
                debug!(%destination, ?navigate_after, "fade-out started");
                ClickOutcome::Intercepted {
                    destination,
                    navigate_after,
                }
            }
            Err(error) => {
                error!(%destination, %error, "fade-out failed, navigating immediately");
                page.navigate(&destination);
                ClickOutcome::FallbackNavigated { destination, error }
            }
        }
    }

    fn start_fade_out(&self, page: &mut dyn Page) -> Result<(), PageError> {
        let wrapper = page
            .query_selector(&self.wrapper_selector)
            .ok_or_else(|| PageError::NotFound(self.wrapper_selector.clone()))?;

        apply_timing(page, wrapper, &self.transition)?;
        let offset = translate_y(self.transition.shift);
        page.set_styles(
            wrapper,
            &[
                (StyleProperty::Opacity, "0"),
                (StyleProperty::Transform, offset.as_str()),
            ],
        )
    }
}

fn apply_timing(
    page: &mut dyn Page,
    wrapper: crate::host::NodeId,
    transition: &TransitionConfig,
) -> Result<(), PageError> {
    let timing = transition.transition_css();
    page.set_styles(
        wrapper,
        &[
            (StyleProperty::Transition, timing.as_str()),
            (StyleProperty::WillChange, WILL_CHANGE_HINT),
        ],
    )
}
