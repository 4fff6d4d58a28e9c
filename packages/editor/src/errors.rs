//! Error types for the editor

use arbor_tree::{NodeId, TreeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown node type: {0}")]
    UnknownType(String),

    #[error("Type {node_type} requires props: {props}")]
    MissingProps { node_type: String, props: String },

    #[error("Operation requires explicit confirmation")]
    ConfirmationRequired,

    #[error("No active node")]
    NoActiveNode,

    #[error("Node {0} has no children to export")]
    EmptySubtree(NodeId),

    #[error("{0}")]
    Handler(String),
}

/// Result alias for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
