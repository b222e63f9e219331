//! Whole-browser simulation across page loads.

use super::page::VirtualPage;
use super::scheduler::ManualScheduler;
use super::store::MemoryStore;
use super::viewport::RecordingViewport;
use crate::config::PageFadeConfig;
use crate::host::{ClickEvent, Clock, HostEnv, IntersectionEntry, NodeId, Page};
use crate::inbound::InboundOutcome;
use crate::outbound::ClickOutcome;
use crate::session::{PageSession, TimerOutcome};
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid destination: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no document is loaded")]
    NoDocument,
}

/// How a navigation was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKind {
    /// Scheduled at the end of a fade-out.
    Faded,
    /// Immediate fallback after a failed fade-out.
    Fallback,
    /// The browser's own link handling.
    Default,
    /// Typed into the address bar or opened by the test.
    Direct,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRecord {
    pub destination: String,
    pub at: DateTime<Utc>,
    pub kind: NavigationKind,
}

/// One page load as seen from storage.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRecord {
    pub url: String,
    pub at: DateTime<Utc>,
    /// Flag value before the pre-paint guard ran.
    pub flag_at_start: Option<String>,
    pub inbound: Option<InboundOutcome>,
}

struct Document {
    page: VirtualPage,
    session: PageSession,
}

type PageFactory = Box<dyn FnMut(Url) -> VirtualPage>;

/// A single tab: storage and the clock survive navigations, documents do not.
pub struct Browser {
    config: PageFadeConfig,
    factory: PageFactory,
    store: MemoryStore,
    scheduler: ManualScheduler,
    viewport: RecordingViewport,
    document: Option<Document>,
    navigations: Vec<NavigationRecord>,
    loads: Vec<LoadRecord>,
}

impl Browser {
    /// `factory` builds the markup served for each URL.
    pub fn new(config: PageFadeConfig, factory: impl FnMut(Url) -> VirtualPage + 'static) -> Self {
        Self {
            config,
            factory: Box::new(factory),
            store: MemoryStore::new(),
            scheduler: ManualScheduler::new(),
            viewport: RecordingViewport::new(),
            document: None,
            navigations: Vec::new(),
            loads: Vec::new(),
        }
    }

    pub fn with_store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    /// Load `url` as a direct navigation and run it to DOMContentLoaded.
    pub fn open(&mut self, url: &str) -> Result<(), SimError> {
        self.navigate(url, NavigationKind::Direct)
    }

    /// Unload the current document and run the pre-paint scripts of a new one.
    pub fn begin_load(&mut self, url: &str) -> Result<(), SimError> {
        let url = Url::parse(url)?;
        self.scheduler.clear();
        self.viewport.reset();

        let flag_at_start = self.store.value(&self.config.storage_key).map(str::to_string);
        let mut page = (self.factory)(url.clone());
        let session = {
            let mut env = HostEnv {
                page: &mut page,
                storage: &mut self.store,
                scheduler: &mut self.scheduler,
                viewport: &mut self.viewport,
            };
            PageSession::start(self.config.clone(), &mut env)
        };
        debug!(url = %url, document = %session.document(), "document loading");

        self.loads.push(LoadRecord {
            url: url.into(),
            at: self.scheduler.now(),
            flag_at_start,
            inbound: None,
        });
        self.document = Some(Document { page, session });
        Ok(())
    }

    /// Fire DOMContentLoaded on the current document.
    pub fn finish_load(&mut self) -> Result<Option<InboundOutcome>, SimError> {
        let outcome = {
            let document = self.document.as_mut().ok_or(SimError::NoDocument)?;
            let mut env = HostEnv {
                page: &mut document.page,
                storage: &mut self.store,
                scheduler: &mut self.scheduler,
                viewport: &mut self.viewport,
            };
            document.session.on_dom_content_loaded(&mut env)
        };
        if let Some(load) = self.loads.last_mut() {
            load.inbound = outcome.clone();
        }
        Ok(outcome)
    }

    /// Primary-button click on `target`.
    pub fn click(&mut self, target: NodeId) -> Result<ClickOutcome, SimError> {
        self.click_with(ClickEvent::primary(target))
    }

    /// Dispatch `event`, then perform whatever navigation results from it.
    pub fn click_with(&mut self, mut event: ClickEvent) -> Result<ClickOutcome, SimError> {
        let (outcome, default_destination) = {
            let document = self.document.as_mut().ok_or(SimError::NoDocument)?;
            let mut env = HostEnv {
                page: &mut document.page,
                storage: &mut self.store,
                scheduler: &mut self.scheduler,
                viewport: &mut self.viewport,
            };
            let outcome = document.session.on_click(&mut event, &mut env);
            let default_destination = if event.default_prevented() {
                None
            } else {
                default_navigation(&document.page, &event)
            };
            (outcome, default_destination)
        };

        if let ClickOutcome::FallbackNavigated { destination, .. } = &outcome {
            self.navigate(destination, NavigationKind::Fallback)?;
        } else if let Some(destination) = default_destination {
            self.navigate(&destination, NavigationKind::Default)?;
        }
        Ok(outcome)
    }

    /// Let `window` of virtual time pass, firing timers and following any
    /// navigation they start.
    pub fn advance(&mut self, window: Duration) -> Result<Vec<TimerOutcome>, SimError> {
        let until = self.scheduler.deadline(window);
        let mut fired = Vec::new();
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            let outcome = {
                let document = self.document.as_mut().ok_or(SimError::NoDocument)?;
                let mut env = HostEnv {
                    page: &mut document.page,
                    storage: &mut self.store,
                    scheduler: &mut self.scheduler,
                    viewport: &mut self.viewport,
                };
                document.session.on_timer(task, &mut env)
            };
            if let TimerOutcome::Navigated { destination } = &outcome {
                let destination = destination.clone();
                fired.push(outcome);
                self.navigate(&destination, NavigationKind::Faded)?;
            } else {
                fired.push(outcome);
            }
        }
        self.scheduler.advance_to(until);
        Ok(fired)
    }

    /// Report `node` as `ratio` visible. Returns the nodes revealed.
    pub fn scroll_into_view(&mut self, node: NodeId, ratio: f64) -> Result<Vec<NodeId>, SimError> {
        if !self.viewport.is_observing(node) {
            return Ok(Vec::new());
        }
        let document = self.document.as_mut().ok_or(SimError::NoDocument)?;
        let mut env = HostEnv {
            page: &mut document.page,
            storage: &mut self.store,
            scheduler: &mut self.scheduler,
            viewport: &mut self.viewport,
        };
        Ok(document
            .session
            .on_intersection(&[IntersectionEntry::visible(node, ratio)], &mut env))
    }

    pub fn page(&self) -> Option<&VirtualPage> {
        self.document.as_ref().map(|d| &d.page)
    }

    pub fn page_mut(&mut self) -> Option<&mut VirtualPage> {
        self.document.as_mut().map(|d| &mut d.page)
    }

    pub fn session(&self) -> Option<&PageSession> {
        self.document.as_ref().map(|d| &d.session)
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    pub fn viewport(&self) -> &RecordingViewport {
        &self.viewport
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.scheduler.now()
    }

    pub fn navigations(&self) -> &[NavigationRecord] {
        &self.navigations
    }

    pub fn loads(&self) -> &[LoadRecord] {
        &self.loads
    }

    fn navigate(&mut self, destination: &str, kind: NavigationKind) -> Result<(), SimError> {
        self.navigations.push(NavigationRecord {
            destination: destination.to_string(),
            at: self.scheduler.now(),
            kind,
        });
        self.begin_load(destination)?;
        self.finish_load()?;
        Ok(())
    }
}

/// Where the browser itself would go for an unhandled click.
///
/// Only same-tab http(s) navigations to another document count; new tabs,
/// external handlers and in-page scrolls leave the current document loaded.
fn default_navigation(page: &VirtualPage, event: &ClickEvent) -> Option<String> {
    if event.button != 0 || event.modifiers.any() {
        return None;
    }
    let link = page.closest_link(event.target)?;
    let same_tab = !link.opens_new_context();
    let http = matches!(link.protocol.as_str(), "http:" | "https:");
    let in_page = link.pathname == page.location_path() && !link.hash.is_empty();
    (same_tab && http && !in_page && !link.href.is_empty()).then_some(link.href)
}
