//! Host failure types.

use super::page::NodeId;
use thiserror::Error;

/// Failures of the persisted key-value store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// Storage is disabled or blocked (private mode, policy, sandbox)
    #[error("persisted storage unavailable: {0}")]
    Unavailable(String),

    /// A write exceeded the origin's quota
    #[error("persisted storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },
}

/// Failures while mutating the document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    /// No element matches the selector
    #[error("no element matches '{0}'")]
    NotFound(String),

    /// The element is no longer in the document
    #[error("node {0} is not attached to the document")]
    NodeMissing(NodeId),

    /// The styling system refused the write
    #[error("style write rejected for {property} on node {node}: {reason}")]
    StyleRejected {
        node: NodeId,
        property: &'static str,
        reason: String,
    },
}
