//! # Tree Nodes
//!
//! A `TreeNode` owns its children outright. There are no parent pointers:
//! the parent of a node is whatever node's `children` contains it, and is
//! found by searching from the root (see `TreeStore::find_parent`).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Open key/value metadata attached to a node. Opaque to the tree.
pub type Props = BTreeMap<String, serde_json::Value>;

/// Opaque node identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id (UUID v4, hyphenated lowercase)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Where a moved node lands relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Sibling placed immediately before the target
    Before,
    /// Sibling placed immediately after the target
    After,
    /// Appended as the target's last child
    Inside,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::Before => "before",
            Position::After => "after",
            Position::Inside => "inside",
        };
        f.write_str(name)
    }
}

/// A typed, labeled vertex with ordered children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,

    /// Type tag from the (open) type catalog
    #[serde(rename = "type")]
    pub node_type: String,

    pub text: String,

    #[serde(default)]
    pub children: Vec<TreeNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
}

impl TreeNode {
    pub fn new(
        id: impl Into<NodeId>,
        node_type: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            text: text.into(),
            children: Vec::new(),
            props: None,
        }
    }

    /// New leaf node with a generated id
    pub fn create(node_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NodeId::generate(), node_type, text)
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = Some(props);
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Pre-order, depth-first iteration over this node and its descendants
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels in this subtree; a leaf has height 1
    pub fn height(&self) -> usize {
        let mut stack = vec![(self, 1)];
        let mut height = 0;

        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }

        height
    }

    /// Level of `id` below this node, counting this node as level 1
    pub fn level_of(&self, id: &str) -> Option<usize> {
        let mut stack = vec![(self, 1)];

        while let Some((node, level)) = stack.pop() {
            if node.id == id {
                return Some(level);
            }
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }

        None
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        if self.id == id {
            return Some(self);
        }

        for child in &mut self.children {
            if let Some(found) = child.find_mut(id) {
                return Some(found);
            }
        }

        None
    }

    /// Node whose `children` directly contains `id`
    pub fn find_parent_of(&self, id: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.children.iter().any(|c| c.id == id))
    }

    pub(crate) fn find_parent_of_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        if self.children.iter().any(|c| c.id == id) {
            return Some(self);
        }

        for child in &mut self.children {
            if let Some(found) = child.find_parent_of_mut(id) {
                return Some(found);
            }
        }

        None
    }

    /// Index of the direct child with `id`
    pub fn child_index(&self, id: &str) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }
}

/// Stack-based pre-order iterator (children visited in order)
pub struct NodeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
