//! One document's transition session.
//!
//! A [`PageSession`] is created by the pre-paint script of every page load
//! and receives the host events for that document: DOMContentLoaded, clicks,
//! timers and intersection entries. It routes each one to the trigger that
//! owns it and keeps the [`PagePhase`] machine in step, so a timer that
//! belongs to a phase the document has already left is dropped instead of
//! undoing newer styling.

use crate::config::PageFadeConfig;
use crate::core::{State, StateHistory};
use crate::host::{ClickEvent, Clock, Deferred, HostEnv, IntersectionEntry, NodeId};
use crate::inbound::{FadeInProgress, FoucGuard, GuardOutcome, InboundOutcome, InboundTrigger};
use crate::lifecycle::{page_machine, PageEvent, PagePhase};
use crate::machine::PhaseMachine;
use crate::outbound::{ClickOutcome, OutboundTrigger};
use crate::reveal::ScrollReveal;
use tracing::debug;
use uuid::Uuid;

/// What a timer did when it fired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    Navigated { destination: String },
    FadeIn(FadeInProgress),
    /// The document had moved past the phase that scheduled the task.
    Stale,
}

/// Transition state of one loaded document.
pub struct PageSession {
    document: Uuid,
    config: PageFadeConfig,
    machine: PhaseMachine<PagePhase, PageEvent>,
    outbound: OutboundTrigger,
    inbound: InboundTrigger,
    reveal: Option<ScrollReveal>,
    guard: GuardOutcome,
}

impl PageSession {
    /// Run the pre-paint scripts: outbound setup, then the FOUC guard.
    pub fn start(config: PageFadeConfig, env: &mut HostEnv<'_>) -> Self {
        let document = Uuid::new_v4();
        let outbound = OutboundTrigger::setup(&config, env.page);
        let guard = FoucGuard::new(&config).apply(env.page, env.storage);
        debug!(%document, hidden = guard.hidden.is_some(), "page session started");

        Self {
            document,
            inbound: InboundTrigger::new(&config),
            config,
            machine: page_machine(),
            outbound,
            reveal: None,
            guard,
        }
    }

    pub fn document(&self) -> Uuid {
        self.document
    }

    pub fn config(&self) -> &PageFadeConfig {
        &self.config
    }

    pub fn phase(&self) -> PagePhase {
        *self.machine.current_state()
    }

    pub fn history(&self) -> &StateHistory<PagePhase> {
        self.machine.history()
    }

    pub fn guard_outcome(&self) -> &GuardOutcome {
        &self.guard
    }

    pub fn outbound(&self) -> &OutboundTrigger {
        &self.outbound
    }

    pub fn scroll_reveal(&self) -> Option<&ScrollReveal> {
        self.reveal.as_ref()
    }

    /// Arm scroll reveal and run the inbound decision.
    ///
    /// Returns `None` when a navigation already started before the document
    /// finished parsing; the flag is then left for the next document.
    pub fn on_dom_content_loaded(&mut self, env: &mut HostEnv<'_>) -> Option<InboundOutcome> {
        if self.reveal.is_none() {
            self.reveal = Some(ScrollReveal::attach(
                &self.config.selectors.reveal_marker,
                self.config.reveal,
                env.page,
                env.viewport,
            ));
        }

        if !self.advance(PageEvent::DomContentLoaded, env) {
            return None;
        }

        let outcome = self
            .inbound
            .on_dom_content_loaded(env.page, env.storage, env.scheduler);
        match &outcome {
            InboundOutcome::WrapperMissing => {
                self.advance(PageEvent::WrapperMissing, env);
            }
            InboundOutcome::AlreadyHandled => {}
            InboundOutcome::FadingIn { .. } => {
                self.advance(PageEvent::FlagFound, env);
            }
            InboundOutcome::RevealedImmediately { .. } => {
                self.advance(PageEvent::FlagAbsent, env);
                if self.advance(PageEvent::Revealed, env) {
                    self.outbound.prime(env.page);
                }
            }
        }
        Some(outcome)
    }

    pub fn on_click(&mut self, event: &mut ClickEvent, env: &mut HostEnv<'_>) -> ClickOutcome {
        let outcome = self
            .outbound
            .on_click(event, env.page, env.storage, env.scheduler);
        match &outcome {
            ClickOutcome::Intercepted { .. } => {
                self.advance(PageEvent::LinkIntercepted, env);
            }
            ClickOutcome::FallbackNavigated { .. } => {
                self.advance(PageEvent::FallbackNavigation, env);
            }
            _ => {}
        }
        outcome
    }

    /// Handle a task this document scheduled earlier.
    pub fn on_timer(&mut self, task: Deferred, env: &mut HostEnv<'_>) -> TimerOutcome {
        match task {
            Deferred::Navigate { destination } => {
                if !self.advance(PageEvent::DurationElapsed, env) {
                    return TimerOutcome::Stale;
                }
                env.page.navigate(&destination);
                TimerOutcome::Navigated { destination }
            }
            fade_in => {
                if self.phase() != PagePhase::FadingIn {
                    debug!(
                        document = %self.document,
                        phase = self.phase().name(),
                        task = ?fade_in,
                        "dropping stale fade-in timer"
                    );
                    return TimerOutcome::Stale;
                }
                let Some(progress) = self.inbound.on_timer(&fade_in, env.page, env.scheduler)
                else {
                    return TimerOutcome::Stale;
                };
                if matches!(progress, FadeInProgress::Settled | FadeInProgress::WrapperGone)
                    && self.advance(PageEvent::FadeInSettled, env)
                {
                    self.outbound.prime(env.page);
                }
                TimerOutcome::FadeIn(progress)
            }
        }
    }

    pub fn on_intersection(
        &mut self,
        entries: &[IntersectionEntry],
        env: &mut HostEnv<'_>,
    ) -> Vec<NodeId> {
        match self.reveal.as_mut() {
            Some(reveal) => reveal.on_intersection(entries, env.page, env.viewport),
            None => Vec::new(),
        }
    }

    fn advance(&mut self, event: PageEvent, env: &HostEnv<'_>) -> bool {
        let from = self.phase();
        match self.machine.fire(event, env.scheduler.now()) {
            Ok(to) => {
                debug!(
                    document = %self.document,
                    from = from.name(),
                    to = to.name(),
                    ?event,
                    "phase transition"
                );
                true
            }
            Err(error) => {
                debug!(document = %self.document, phase = from.name(), %error, "event ignored");
                false
            }
        }
    }
}
