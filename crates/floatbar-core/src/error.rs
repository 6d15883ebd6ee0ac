//! Error types for floatbar-core.

use crate::dom::{DocumentId, NodeId};

/// Errors that can occur while manipulating a [`Document`](crate::dom::Document).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node ID is invalid or the node has been removed.
    #[error("Invalid or removed node {0:?}")]
    InvalidNode(NodeId),

    /// Attempted to append a node into its own subtree.
    #[error("Cannot append a node into its own subtree")]
    CircularParentage,

    /// The node tree is structural and cannot be detached or removed.
    #[error("Node {0:?} is a structural node and cannot be removed")]
    StructuralNode(NodeId),

    /// An operation was given a document other than the one it is bound to.
    #[error("Expected document {expected:?}, got {got:?}")]
    CrossDocument {
        /// The document the caller is bound to.
        expected: DocumentId,
        /// The document that was supplied.
        got: DocumentId,
    },
}

/// Result type for document operations.
pub type DomResult<T> = std::result::Result<T, DomError>;
