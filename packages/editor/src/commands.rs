//! # Commands
//!
//! Named requests published on the event bus. Producers (CLI scripts, the
//! wasm facade, tests) build a `Command` value and execute it; the plugin
//! that recognizes the name consumes it.
//!
//! Commands serialize with a `command` tag, so a script is plain JSON:
//!
//! ```json
//! [
//!   { "command": "addElement", "type": "Folder", "text": "Inbox" },
//!   { "command": "changeNodeText", "text": "Renamed" },
//!   { "command": "moveNode", "nodeId": "a", "targetId": "b", "position": "inside" }
//! ]
//! ```

use arbor_tree::{NodeId, Position, Props};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    ActivateNode { node_id: NodeId },

    DeactivateAll,

    /// Insert under an explicit parent, else the active node, else the root
    AddElement(NewNode),

    /// Insert under an explicit parent, else the active node
    AddChild(NewNode),

    #[serde(rename_all = "camelCase")]
    DeleteNode { node_id: NodeId },

    DeleteActiveNode,

    #[serde(rename_all = "camelCase")]
    ChangeNodeText {
        #[serde(default)]
        node_id: Option<NodeId>,
        text: String,
    },

    #[serde(rename_all = "camelCase")]
    ChangeNodeType {
        #[serde(default)]
        node_id: Option<NodeId>,
        #[serde(rename = "type")]
        node_type: String,
    },

    #[serde(rename_all = "camelCase")]
    MoveNode {
        node_id: NodeId,
        target_id: NodeId,
        position: Position,
    },

    /// Replace the whole tree; `data` is a tree object or JSON text
    #[serde(rename_all = "camelCase")]
    LoadTreeFromJson {
        data: serde_json::Value,
        #[serde(default)]
        confirmed: bool,
    },

    SaveTreeToJson,

    DownloadTreeAsJson,

    SaveActiveChildToJson,

    DownloadActiveChildAsJson,

    LogTree {
        #[serde(default)]
        format: LogFormat,
    },

    #[serde(rename_all = "camelCase")]
    LogNode {
        node_id: NodeId,
        #[serde(default)]
        format: LogFormat,
    },

    ExportTreeJson,

    ListTypes,

    /// Extension point for plugins outside this crate
    Custom {
        name: String,
        #[serde(default)]
        data: serde_json::Value,
    },
}

impl Command {
    /// Event name the command is published under
    pub fn name(&self) -> &str {
        match self {
            Command::ActivateNode { .. } => "activateNode",
            Command::DeactivateAll => "deactivateAll",
            Command::AddElement(_) => "addElement",
            Command::AddChild(_) => "addChild",
            Command::DeleteNode { .. } => "deleteNode",
            Command::DeleteActiveNode => "deleteActiveNode",
            Command::ChangeNodeText { .. } => "changeNodeText",
            Command::ChangeNodeType { .. } => "changeNodeType",
            Command::MoveNode { .. } => "moveNode",
            Command::LoadTreeFromJson { .. } => "loadTreeFromJson",
            Command::SaveTreeToJson => "saveTreeToJson",
            Command::DownloadTreeAsJson => "downloadTreeAsJson",
            Command::SaveActiveChildToJson => "saveActiveChildToJson",
            Command::DownloadActiveChildAsJson => "downloadActiveChildAsJson",
            Command::LogTree { .. } => "logTree",
            Command::LogNode { .. } => "logNode",
            Command::ExportTreeJson => "exportTreeJson",
            Command::ListTypes => "listTypes",
            Command::Custom { name, .. } => name,
        }
    }
}

/// Operands for creating a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNode {
    /// Defaults to the configured default type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Defaults to the configured default text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,

    /// Position among the parent's children (append when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,

    /// Activate the new node (configured default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activate: Option<bool>,
}

impl NewNode {
    pub fn new(node_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn under(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn without_activation(mut self) -> Self {
        self.activate = Some(false);
        self
    }
}

/// Output format for tree dumps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    /// Indented `text [type] ID: id` outline
    #[serde(alias = "formatted")]
    Outline,
}
