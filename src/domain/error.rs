//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::forest::NodeId;

/// Domain errors represent violations of the selection-tree model.
/// These are independent of host and infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cycle detected in parent-name hierarchy at: {0}")]
    CycleDetected(String),

    #[error("unknown selection node: {0:?}")]
    UnknownNode(NodeId),
}

/// Result type for selection-tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
