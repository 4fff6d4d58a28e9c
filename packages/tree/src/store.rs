//! # Tree Store
//!
//! Sole owner and mutator of the tree. Lookups are depth-first walks from
//! the root; trees are small (hundreds to a few thousand nodes) and no index
//! is maintained.
//!
//! ## Mutation Semantics
//!
//! ### Insert
//! - Parent must exist
//! - Inserted subtree must be well-formed and share no ids with the tree
//! - Appends by default; explicit index is clamped to the child count
//!
//! ### Remove
//! - Root cannot be removed
//! - Reports which node should become active next:
//!   former next sibling, else former previous sibling, else the parent
//!
//! ### Move
//! - Fails if the node is the target or an ancestor of it
//! - Detaches first, then appends (`inside`) or splices beside the target
//!
//! ### Depth
//! - Insert and move refuse to grow the tree past `MAX_DEPTH` levels, so
//!   every tree the store holds can be written and read back
//!
//! Every operation validates before touching the tree, so a failed call
//! leaves the tree exactly as it was.

use crate::codec::{validate, MAX_DEPTH};
use crate::{NodeId, Position, Props, TreeError, TreeNode, TreeResult};
use std::collections::HashSet;
use tracing::debug;

/// Owner of a single rooted tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStore {
    root: TreeNode,
}

/// Result of detaching a node
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// Detached subtree
    pub node: TreeNode,

    /// Parent the node was detached from
    pub parent_id: NodeId,

    /// Index the node occupied among its siblings
    pub index: usize,

    /// Node that should become active in its place
    pub next_active: NodeId,
}

/// Result of a successful move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub old_parent_id: NodeId,
    pub new_parent_id: NodeId,
    pub index: usize,
}

impl TreeStore {
    /// Install a fully formed root tree
    pub fn new(root: TreeNode) -> TreeResult<Self> {
        validate(&root)?;
        debug!(root_id = %root.id, nodes = root.subtree_len(), "Tree store initialized");
        Ok(Self { root })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root.id
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.root.id == id
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    /// A tree always has its root
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// All ids in pre-order
    pub fn ids(&self) -> Vec<NodeId> {
        self.root.iter().map(|n| n.id.clone()).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&TreeNode> {
        self.root.find(id)
    }

    /// Parent of `id`; `None` for the root or an unknown id
    pub fn find_parent(&self, id: &str) -> Option<&TreeNode> {
        self.root.find_parent_of(id)
    }

    /// All nodes of the given type, pre-order
    pub fn find_by_type(&self, node_type: &str) -> Vec<&TreeNode> {
        self.root
            .iter()
            .filter(|n| n.node_type.eq_ignore_ascii_case(node_type))
            .collect()
    }

    /// True if `id` is `ancestor` or lies inside `ancestor`'s subtree
    pub fn is_descendant(&self, ancestor: &str, id: &str) -> bool {
        self.find_by_id(ancestor)
            .map(|node| node.find(id).is_some())
            .unwrap_or(false)
    }

    pub fn insert_child(
        &mut self,
        parent_id: &str,
        node: TreeNode,
        index: Option<usize>,
    ) -> TreeResult<()> {
        validate(&node)?;

        let existing: HashSet<&str> = self.root.iter().map(|n| n.id.as_str()).collect();
        if let Some(clash) = node.iter().find(|n| existing.contains(n.id.as_str())) {
            return Err(TreeError::InvalidTree(format!(
                "node id {} already exists in tree",
                clash.id
            )));
        }

        let parent_level = self
            .root
            .level_of(parent_id)
            .ok_or_else(|| TreeError::ParentNotFound(NodeId::from(parent_id)))?;
        check_depth(parent_level, &node)?;

        let parent = self
            .root
            .find_mut(parent_id)
            .ok_or_else(|| TreeError::ParentNotFound(NodeId::from(parent_id)))?;

        let insert_index = index
            .unwrap_or(parent.children.len())
            .min(parent.children.len());
        debug!(node_id = %node.id, parent_id, index = insert_index, "Inserting node");
        parent.children.insert(insert_index, node);
        Ok(())
    }

    pub fn remove_child(&mut self, id: &str) -> TreeResult<Removal> {
        if self.is_root(id) {
            return Err(TreeError::RootRemoval);
        }

        let parent = self
            .root
            .find_parent_of_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(NodeId::from(id)))?;

        let index = parent
            .child_index(id)
            .ok_or_else(|| TreeError::NodeNotFound(NodeId::from(id)))?;
        let node = parent.children.remove(index);

        let next_active = parent
            .children
            .get(index)
            .or_else(|| parent.children.last())
            .map(|sibling| sibling.id.clone())
            .unwrap_or_else(|| parent.id.clone());

        debug!(
            node_id = id,
            parent_id = %parent.id,
            index,
            next_active = %next_active,
            "Removed node"
        );

        Ok(Removal {
            node,
            parent_id: parent.id.clone(),
            index,
            next_active,
        })
    }

    pub fn move_node(
        &mut self,
        id: &str,
        target_id: &str,
        position: Position,
    ) -> TreeResult<MoveOutcome> {
        if id == target_id {
            return Err(TreeError::Cycle {
                node: NodeId::from(id),
                target: NodeId::from(target_id),
            });
        }
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(NodeId::from(id)));
        }
        if !self.contains(target_id) {
            return Err(TreeError::NodeNotFound(NodeId::from(target_id)));
        }
        if self.is_descendant(id, target_id) {
            return Err(TreeError::Cycle {
                node: NodeId::from(id),
                target: NodeId::from(target_id),
            });
        }
        // Unreachable in practice: the root is an ancestor of every target
        if self.is_root(id) {
            return Err(TreeError::RootRemoval);
        }
        if position != Position::Inside && self.is_root(target_id) {
            return Err(TreeError::ParentNotFound(NodeId::from(target_id)));
        }
        if let (Some(moved), Some(target_level)) =
            (self.find_by_id(id), self.root.level_of(target_id))
        {
            // Detaching cannot change the target's level: it is not inside the moved node
            let parent_level = match position {
                Position::Inside => target_level,
                Position::Before | Position::After => target_level - 1,
            };
            check_depth(parent_level, moved)?;
        }

        let removal = self.remove_child(id)?;
        let old_parent_id = removal.parent_id;
        let node = removal.node;

        // Target is neither the moved node nor inside it, so it survived the detach
        let (new_parent_id, index) = match position {
            Position::Inside => {
                let target = self
                    .root
                    .find_mut(target_id)
                    .ok_or_else(|| TreeError::NodeNotFound(NodeId::from(target_id)))?;
                target.children.push(node);
                (target.id.clone(), target.children.len() - 1)
            }
            Position::Before | Position::After => {
                let parent = self
                    .root
                    .find_parent_of_mut(target_id)
                    .ok_or_else(|| TreeError::ParentNotFound(NodeId::from(target_id)))?;
                let target_index = parent
                    .child_index(target_id)
                    .ok_or_else(|| TreeError::NodeNotFound(NodeId::from(target_id)))?;
                let index = if position == Position::Before {
                    target_index
                } else {
                    target_index + 1
                };
                parent.children.insert(index, node);
                (parent.id.clone(), index)
            }
        };

        debug!(
            node_id = id,
            target_id,
            %position,
            old_parent = %old_parent_id,
            new_parent = %new_parent_id,
            "Moved node"
        );

        Ok(MoveOutcome {
            old_parent_id,
            new_parent_id,
            index,
        })
    }

    /// Deep, independent copy of a subtree
    pub fn clone_subtree(&self, id: &str) -> TreeResult<TreeNode> {
        self.find_by_id(id)
            .cloned()
            .ok_or_else(|| TreeError::NodeNotFound(NodeId::from(id)))
    }

    /// Validate and atomically swap in a new root, returning the old one
    pub fn replace_all(&mut self, root: TreeNode) -> TreeResult<TreeNode> {
        validate(&root)?;
        debug!(root_id = %root.id, nodes = root.subtree_len(), "Replacing tree");
        Ok(std::mem::replace(&mut self.root, root))
    }

    /// Replace a node's text, returning the previous text
    pub fn update_text(&mut self, id: &str, text: impl Into<String>) -> TreeResult<String> {
        let node = self.node_mut(id)?;
        Ok(std::mem::replace(&mut node.text, text.into()))
    }

    /// Replace a node's type, returning the previous type
    pub fn update_type(&mut self, id: &str, node_type: impl Into<String>) -> TreeResult<String> {
        let node_type = node_type.into();
        if node_type.trim().is_empty() {
            return Err(TreeError::InvalidTree(format!("empty type for node {}", id)));
        }
        let node = self.node_mut(id)?;
        Ok(std::mem::replace(&mut node.node_type, node_type))
    }

    /// Replace a node's props, returning the previous props
    pub fn update_props(&mut self, id: &str, props: Option<Props>) -> TreeResult<Option<Props>> {
        let node = self.node_mut(id)?;
        Ok(std::mem::replace(&mut node.props, props))
    }

    fn node_mut(&mut self, id: &str) -> TreeResult<&mut TreeNode> {
        self.root
            .find_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(NodeId::from(id)))
    }
}

/// Refuse a subtree that would end deeper than `MAX_DEPTH` under a parent at `parent_level`
fn check_depth(parent_level: usize, node: &TreeNode) -> TreeResult<()> {
    let deepest = parent_level + node.height();
    if deepest > MAX_DEPTH {
        return Err(TreeError::InvalidTree(format!(
            "placing {} would make the tree {} levels deep, at most {} are allowed",
            node.id, deepest, MAX_DEPTH
        )));
    }
    Ok(())
}
