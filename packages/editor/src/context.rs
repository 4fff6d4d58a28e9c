//! # Host Context
//!
//! Explicit bundle of the shared components handed to every plugin at
//! init. Cloning is cheap: every field is reference counted.

use crate::{
    ActivationState, Command, EditorConfig, EditorResult, Event, EventBus, Logger,
    ModuleRegistry,
};
use arbor_tree::{NodeId, TreeNode, TreeStore};
use std::cell::RefCell;
use std::rc::Rc;

/// The single mutable tree shared by all components
pub type SharedTree = Rc<RefCell<TreeStore>>;

/// Read access to the tree, published as the `treeManager` module
pub trait TreeAccess {
    fn root_id(&self) -> NodeId;
    fn node(&self, id: &str) -> Option<TreeNode>;
    fn parent_of(&self, id: &str) -> Option<NodeId>;
    fn to_value(&self) -> serde_json::Value;
}

impl TreeAccess for RefCell<TreeStore> {
    fn root_id(&self) -> NodeId {
        self.borrow().root_id().clone()
    }

    fn node(&self, id: &str) -> Option<TreeNode> {
        self.borrow().find_by_id(id).cloned()
    }

    fn parent_of(&self, id: &str) -> Option<NodeId> {
        self.borrow().find_parent(id).map(|p| p.id.clone())
    }

    fn to_value(&self) -> serde_json::Value {
        arbor_tree::codec::to_value(self.borrow().root())
    }
}

#[derive(Clone)]
pub struct HostContext {
    pub events: Rc<EventBus>,
    pub modules: Rc<ModuleRegistry>,
    pub tree: SharedTree,
    pub activation: Rc<ActivationState>,
    pub logger: Rc<dyn Logger>,
    pub config: Rc<EditorConfig>,
}

impl HostContext {
    pub fn new(root: TreeNode, config: EditorConfig, logger: Rc<dyn Logger>) -> EditorResult<Self> {
        let tree: SharedTree = Rc::new(RefCell::new(TreeStore::new(root)?));
        let events = Rc::new(EventBus::new(Rc::clone(&logger)));
        let modules = Rc::new(ModuleRegistry::new(Rc::clone(&logger)));
        let activation = Rc::new(ActivationState::new(
            Rc::clone(&tree),
            Rc::clone(&events),
            Rc::clone(&logger),
        ));

        Ok(Self {
            events,
            modules,
            tree,
            activation,
            logger,
            config: Rc::new(config),
        })
    }

    pub fn log(&self, message: impl AsRef<str>) {
        self.logger.log(message.as_ref());
    }

    pub fn emit(&self, event: Event) -> usize {
        self.events.emit(&event)
    }

    /// Publish a command; returns how many handlers received it
    pub fn execute(&self, command: Command) -> usize {
        self.events.emit(&Event::Command(command))
    }

    /// Explicit id, else the active node, else the root
    pub fn resolve_target(&self, explicit: Option<&NodeId>) -> NodeId {
        if let Some(id) = explicit {
            return id.clone();
        }

        let tree = self.tree.borrow();
        self.activation
            .active()
            .filter(|id| tree.contains(id.as_str()))
            .unwrap_or_else(|| tree.root_id().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryLogger;

    fn context() -> HostContext {
        let root = TreeNode::new("root", "Root", "R").with_child(TreeNode::new("a", "Def", "A"));
        HostContext::new(root, EditorConfig::default(), Rc::new(MemoryLogger::new())).unwrap()
    }

    #[test]
    fn test_resolve_target_precedence() {
        let ctx = context();
        assert_eq!(ctx.resolve_target(None), "root");

        ctx.activation.activate("a").unwrap();
        assert_eq!(ctx.resolve_target(None), "a");

        let explicit = NodeId::from("elsewhere");
        assert_eq!(ctx.resolve_target(Some(&explicit)), "elsewhere");
    }

    #[test]
    fn test_invalid_root_is_rejected() {
        let root = TreeNode::new("", "Root", "R");
        let result = HostContext::new(root, EditorConfig::default(), Rc::new(MemoryLogger::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_tree_access_reads_current_state() {
        let ctx = context();
        let access: Rc<dyn TreeAccess> = ctx.tree.clone();

        assert_eq!(access.parent_of("a"), Some(NodeId::from("root")));
        ctx.tree.borrow_mut().update_text("a", "Renamed").unwrap();
        assert_eq!(access.node("a").unwrap().text, "Renamed");
        assert_eq!(access.to_value()["id"], "root");
    }
}
