//! # Activation State
//!
//! Tracks at most one active node. Switching the active node emits a single
//! `nodeActivated`; `nodeDeactivated` fires only on an explicit clear.

use crate::{EditorResult, Event, EventBus, Logger, SharedTree};
use arbor_tree::{NodeId, TreeError, TreeNode};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Capability published as the `activateItem` module
pub trait Activation {
    fn activate(&self, id: &str) -> EditorResult<()>;
    fn deactivate(&self) -> bool;
    fn active(&self) -> Option<NodeId>;
}

pub struct ActivationState {
    active: RefCell<Option<NodeId>>,
    tree: SharedTree,
    events: Rc<EventBus>,
    logger: Rc<dyn Logger>,
}

impl ActivationState {
    pub fn new(tree: SharedTree, events: Rc<EventBus>, logger: Rc<dyn Logger>) -> Self {
        Self {
            active: RefCell::new(None),
            tree,
            events,
            logger,
        }
    }

    pub fn activate(&self, id: &str) -> EditorResult<()> {
        let (node_id, label) = {
            let tree = self.tree.borrow();
            let node = tree
                .find_by_id(id)
                .ok_or_else(|| TreeError::NodeNotFound(NodeId::from(id)))?;
            (node.id.clone(), format!("{} [{}]", node.text, node.node_type))
        };

        let previous = self.active.replace(Some(node_id.clone()));
        debug!(node_id = %node_id, previous = ?previous, "Activated node");
        self.logger.log(&format!("Activated node: {}", label));

        self.events.emit(&Event::NodeActivated { node_id });
        Ok(())
    }

    /// Clear the active node; false (and no event) if nothing was active
    pub fn deactivate(&self) -> bool {
        let Some(previous) = self.active.take() else {
            return false;
        };

        debug!(node_id = %previous, "Deactivated node");
        self.logger.log("Deactivated node");
        self.events.emit(&Event::NodeDeactivated);
        true
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active.borrow().clone()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.borrow().as_ref().map(|a| a == id).unwrap_or(false)
    }

    /// Copy of the active node, if it still resolves
    pub fn active_node(&self) -> Option<TreeNode> {
        let id = self.active()?;
        self.tree.borrow().find_by_id(id.as_str()).cloned()
    }
}

impl Activation for ActivationState {
    fn activate(&self, id: &str) -> EditorResult<()> {
        ActivationState::activate(self, id)
    }

    fn deactivate(&self) -> bool {
        ActivationState::deactivate(self)
    }

    fn active(&self) -> Option<NodeId> {
        ActivationState::active(self)
    }
}
