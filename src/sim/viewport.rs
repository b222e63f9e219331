//! Intersection watcher that only records subscriptions.

use crate::host::{IntersectionWatcher, NodeId};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct RecordingViewport {
    observed: BTreeMap<NodeId, f64>,
    unobserved: Vec<NodeId>,
}

impl RecordingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.contains_key(&node)
    }

    /// Threshold `node` is observed with.
    pub fn threshold(&self, node: NodeId) -> Option<f64> {
        self.observed.get(&node).copied()
    }

    pub fn observing(&self) -> Vec<NodeId> {
        self.observed.keys().copied().collect()
    }

    /// Nodes unsubscribed so far, in order.
    pub fn unobserved(&self) -> &[NodeId] {
        &self.unobserved
    }

    /// Forget everything, as when the document unloads.
    pub fn reset(&mut self) {
        self.observed.clear();
        self.unobserved.clear();
    }
}

impl IntersectionWatcher for RecordingViewport {
    fn observe(&mut self, node: NodeId, threshold: f64) {
        self.observed.insert(node, threshold);
    }

    fn unobserve(&mut self, node: NodeId) {
        if self.observed.remove(&node).is_some() {
            self.unobserved.push(node);
        }
    }
}
