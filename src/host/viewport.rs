//! Viewport intersection watching.

use super::page::NodeId;

/// Reports when watched elements cross their visibility threshold.
///
/// Entries are delivered by the host to
/// [`PageSession::on_intersection`](crate::session::PageSession::on_intersection).
pub trait IntersectionWatcher {
    fn observe(&mut self, node: NodeId, threshold: f64);

    fn unobserve(&mut self, node: NodeId);
}

/// One observation delivered by the watcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub node: NodeId,
    pub is_intersecting: bool,
    /// Visible fraction of the element, in `[0, 1]`.
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn visible(node: NodeId, ratio: f64) -> Self {
        Self {
            node,
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    /// Intersecting with at least `threshold` of the element visible.
    pub fn qualifies(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifies_at_or_above_threshold() {
        assert!(IntersectionEntry::visible(NodeId(1), 0.1).qualifies(0.1));
        assert!(IntersectionEntry::visible(NodeId(1), 0.6).qualifies(0.1));
        assert!(!IntersectionEntry::visible(NodeId(1), 0.05).qualifies(0.1));
    }

    #[test]
    fn leaving_viewport_never_qualifies() {
        let entry = IntersectionEntry::visible(NodeId(1), 0.0);
        assert!(!entry.is_intersecting);
        assert!(!entry.qualifies(0.0));
    }
}
