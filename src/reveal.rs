//! Scroll reveal controller.
//!
//! Each marked element starts hidden and offset downwards, and fades up into
//! place the first time enough of it scrolls into view. The watch is one-shot:
//! once revealed, an element is unobserved and never touched again.

use crate::config::RevealOptions;
use crate::host::{IntersectionEntry, IntersectionWatcher, NodeId, Page, PageError};
use crate::style::{translate_y, Length, StyleProperty};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One armed element with its own options.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealElement {
    node: NodeId,
    options: RevealOptions,
}

impl RevealElement {
    /// Apply the hidden starting state, then subscribe to the watcher.
    ///
    /// The styles are written before observing so the final state can never
    /// paint first. If they cannot be written the element is left visible and
    /// unwatched.
    pub fn arm(
        node: NodeId,
        options: RevealOptions,
        page: &mut dyn Page,
        viewport: &mut dyn IntersectionWatcher,
    ) -> Option<Self> {
        let offset = translate_y(options.distance);
        let transition = options.transition_css();
        let hidden = [
            (StyleProperty::Opacity, "0"),
            (StyleProperty::Transform, offset.as_str()),
            (StyleProperty::Transition, transition.as_str()),
        ];

        if let Err(error) = page.set_styles(node, &hidden) {
            warn!(%node, %error, "could not hide reveal element, leaving it visible");
            for (property, _) in hidden {
                if let Err(error) = page.set_style(node, property, "") {
                    debug!(%node, %error, property = property.css_name(), "could not reset style");
                }
            }
            return None;
        }

        viewport.observe(node, options.threshold);
        Some(Self { node, options })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    fn reveal(&self, page: &mut dyn Page) -> Result<(), PageError> {
        let settled = translate_y(Length::ZERO);
        page.set_styles(
            self.node,
            &[
                (StyleProperty::Opacity, "1"),
                (StyleProperty::Transform, settled.as_str()),
            ],
        )
    }
}

/// All reveal watches of one document.
#[derive(Debug, Default)]
pub struct ScrollReveal {
    watched: BTreeMap<NodeId, RevealElement>,
    revealed: Vec<NodeId>,
}

impl ScrollReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm every element carrying `marker_class` with the same options.
    pub fn attach(
        marker_class: &str,
        options: RevealOptions,
        page: &mut dyn Page,
        viewport: &mut dyn IntersectionWatcher,
    ) -> Self {
        let mut reveal = Self::new();
        for node in page.query_all_by_class(marker_class) {
            reveal.arm(node, options, page, viewport);
        }
        debug!(
            marker = marker_class,
            watching = reveal.watched.len(),
            "scroll reveal attached"
        );
        reveal
    }

    /// Arm a single element. Returns `false` if it is already watched or
    /// could not be hidden.
    pub fn arm(
        &mut self,
        node: NodeId,
        options: RevealOptions,
        page: &mut dyn Page,
        viewport: &mut dyn IntersectionWatcher,
    ) -> bool {
        if self.watched.contains_key(&node) {
            return false;
        }
        match RevealElement::arm(node, options, page, viewport) {
            Some(element) => {
                self.watched.insert(node, element);
                true
            }
            None => false,
        }
    }

    /// Handle watcher entries. Returns the nodes revealed by this batch.
    pub fn on_intersection(
        &mut self,
        entries: &[IntersectionEntry],
        page: &mut dyn Page,
        viewport: &mut dyn IntersectionWatcher,
    ) -> Vec<NodeId> {
        let mut revealed = Vec::new();
        for entry in entries {
            let qualifies = self
                .watched
                .get(&entry.node)
                .is_some_and(|element| entry.qualifies(element.options.threshold));
            if !qualifies {
                continue;
            }
            let Some(element) = self.watched.remove(&entry.node) else {
                continue;
            };

            if let Err(error) = element.reveal(page) {
                warn!(node = %element.node, %error, "could not reveal element");
            }
            viewport.unobserve(element.node);
            self.revealed.push(element.node);
            revealed.push(element.node);
        }
        revealed
    }

    pub fn is_watching(&self, node: NodeId) -> bool {
        self.watched.contains_key(&node)
    }

    pub fn watching(&self) -> usize {
        self.watched.len()
    }

    /// Every node revealed so far, in reveal order.
    pub fn revealed(&self) -> &[NodeId] {
        &self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RecordingViewport, VirtualPage};

    fn page_with_blocks(count: usize) -> (VirtualPage, Vec<NodeId>) {
        let mut page = VirtualPage::new("https://example.com/").unwrap();
        let body = page.body();
        let nodes = (0..count)
            .map(|_| page.append(body, "section").class("fade-up-element").node())
            .collect();
        (page, nodes)
    }

    #[test]
    fn attach_hides_before_observing() {
        let (mut page, nodes) = page_with_blocks(2);
        let mut viewport = RecordingViewport::new();

        let reveal = ScrollReveal::attach(
            "fade-up-element",
            RevealOptions::deployment(),
            &mut page,
            &mut viewport,
        );

        assert_eq!(reveal.watching(), 2);
        for node in nodes {
            assert_eq!(page.inline_style(node, StyleProperty::Opacity), Some("0"));
            assert_eq!(
                page.inline_style(node, StyleProperty::Transform),
                Some("translateY(30px)")
            );
            assert_eq!(
                page.inline_style(node, StyleProperty::Transition),
                Some("opacity 800ms ease-in-out 100ms, transform 800ms ease-in-out 100ms")
            );
            assert_eq!(viewport.threshold(node), Some(0.1));
        }
    }

    #[test]
    fn first_qualifying_entry_reveals_and_unobserves() {
        let (mut page, nodes) = page_with_blocks(1);
        let mut viewport = RecordingViewport::new();
        let mut reveal =
            ScrollReveal::attach("fade-up-element", RevealOptions::default(), &mut page, &mut viewport);

        let shown = reveal.on_intersection(
            &[IntersectionEntry::visible(nodes[0], 0.5)],
            &mut page,
            &mut viewport,
        );

        assert_eq!(shown, vec![nodes[0]]);
        assert_eq!(page.inline_style(nodes[0], StyleProperty::Opacity), Some("1"));
        assert_eq!(
            page.inline_style(nodes[0], StyleProperty::Transform),
            Some("translateY(0)")
        );
        assert!(!viewport.is_observing(nodes[0]));
        assert!(!reveal.is_watching(nodes[0]));
    }

    #[test]
    fn below_threshold_keeps_watching() {
        let (mut page, nodes) = page_with_blocks(1);
        let mut viewport = RecordingViewport::new();
        let mut reveal =
            ScrollReveal::attach("fade-up-element", RevealOptions::default(), &mut page, &mut viewport);

        let shown = reveal.on_intersection(
            &[IntersectionEntry::visible(nodes[0], 0.05)],
            &mut page,
            &mut viewport,
        );

        assert!(shown.is_empty());
        assert!(reveal.is_watching(nodes[0]));
        assert_eq!(page.inline_style(nodes[0], StyleProperty::Opacity), Some("0"));
    }

    #[test]
    fn reveal_is_one_shot() {
        let (mut page, nodes) = page_with_blocks(1);
        let mut viewport = RecordingViewport::new();
        let mut reveal =
            ScrollReveal::attach("fade-up-element", RevealOptions::default(), &mut page, &mut viewport);
        reveal.on_intersection(
            &[IntersectionEntry::visible(nodes[0], 1.0)],
            &mut page,
            &mut viewport,
        );
        let writes = page.style_writes();

        let again = reveal.on_intersection(
            &[
                IntersectionEntry::visible(nodes[0], 0.0),
                IntersectionEntry::visible(nodes[0], 1.0),
            ],
            &mut page,
            &mut viewport,
        );

        assert!(again.is_empty());
        assert_eq!(page.style_writes(), writes);
        assert_eq!(reveal.revealed(), &[nodes[0]]);
    }

    #[test]
    fn elements_reveal_independently() {
        let (mut page, nodes) = page_with_blocks(3);
        let mut viewport = RecordingViewport::new();
        let mut reveal =
            ScrollReveal::attach("fade-up-element", RevealOptions::default(), &mut page, &mut viewport);

        reveal.on_intersection(
            &[IntersectionEntry::visible(nodes[2], 0.3)],
            &mut page,
            &mut viewport,
        );

        assert_eq!(reveal.watching(), 2);
        assert_eq!(page.inline_style(nodes[2], StyleProperty::Opacity), Some("1"));
        assert_eq!(page.inline_style(nodes[0], StyleProperty::Opacity), Some("0"));
    }

    #[test]
    fn per_element_threshold_override() {
        let (mut page, nodes) = page_with_blocks(1);
        let mut viewport = RecordingViewport::new();
        let mut reveal = ScrollReveal::new();
        assert!(reveal.arm(
            nodes[0],
            RevealOptions::default().with_threshold(0.75),
            &mut page,
            &mut viewport,
        ));

        assert!(reveal
            .on_intersection(&[IntersectionEntry::visible(nodes[0], 0.5)], &mut page, &mut viewport)
            .is_empty());
        assert_eq!(
            reveal.on_intersection(&[IntersectionEntry::visible(nodes[0], 0.8)], &mut page, &mut viewport),
            vec![nodes[0]]
        );
    }

    #[test]
    fn failed_hide_leaves_element_unwatched() {
        let (mut page, nodes) = page_with_blocks(1);
        let mut viewport = RecordingViewport::new();
        page.reject_style_writes(true);

        let reveal =
            ScrollReveal::attach("fade-up-element", RevealOptions::default(), &mut page, &mut viewport);

        assert_eq!(reveal.watching(), 0);
        assert!(!viewport.is_observing(nodes[0]));
    }
}
