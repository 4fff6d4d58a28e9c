//! Error types for tree operations

use crate::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Cannot remove or move the root node")]
    RootRemoval,

    #[error("Would create cycle: {node} cannot be placed relative to {target}")]
    Cycle { node: NodeId, target: NodeId },
}

/// Result alias for tree operations
pub type TreeResult<T> = Result<T, TreeError>;
