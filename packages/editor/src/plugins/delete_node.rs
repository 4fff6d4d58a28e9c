use super::DELETE_NODE;
use crate::{Command, EditorError, EditorResult, Event, HostContext, Plugin, Subscriptions};
use arbor_tree::Removal;
use std::rc::Rc;

/// Removes a node and activates its replacement
pub struct DeleteNode {
    ctx: HostContext,
}

impl DeleteNode {
    pub fn delete(&self, id: &str) -> EditorResult<Removal> {
        let removal = self.ctx.tree.borrow_mut().remove_child(id)?;

        self.ctx.log(format!(
            "Deleted node: {} [{}]",
            removal.node.text, removal.node.node_type
        ));

        self.ctx.activation.activate(removal.next_active.as_str())?;
        self.ctx.emit(Event::TreeUpdated {
            node_id: removal.parent_id.clone(),
            full_replace: false,
        });
        self.ctx.emit(Event::NodeDeleted {
            node_id: removal.node.id.clone(),
            parent_id: removal.parent_id.clone(),
        });

        Ok(removal)
    }

    pub fn delete_active(&self) -> EditorResult<Removal> {
        let active = self
            .ctx
            .activation
            .active()
            .ok_or(EditorError::NoActiveNode)?;
        self.delete(active.as_str())
    }
}

#[derive(Debug, Default)]
pub struct DeleteNodePlugin {
    subscriptions: Subscriptions,
}

impl Plugin for DeleteNodePlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(DeleteNode { ctx: ctx.clone() });
        ctx.modules.register(DELETE_NODE, Rc::clone(&api));

        let handler = Rc::clone(&api);
        self.subscriptions.on(&ctx.events, "deleteNode", move |event| {
            if let Some(Command::DeleteNode { node_id }) = event.as_command() {
                handler.delete(node_id.as_str())?;
            }
            Ok(())
        });

        self.subscriptions.on(&ctx.events, "deleteActiveNode", move |_| {
            api.delete_active()?;
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(DELETE_NODE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Editor, EditorConfig, MemoryLogger};
    use arbor_tree::{NodeId, TreeNode};
    use std::cell::RefCell;

    fn editor() -> (Editor, Rc<MemoryLogger>) {
        let logger = Rc::new(MemoryLogger::new());
        let root = TreeNode::new("root", "Root", "R")
            .with_child(TreeNode::new("a", "Def", "A").with_child(TreeNode::new("a1", "Def", "A1")))
            .with_child(TreeNode::new("b", "Def", "B"))
            .with_child(TreeNode::new("c", "Def", "C"));
        let editor =
            Editor::with_default_plugins(root, EditorConfig::default(), logger.clone()).unwrap();
        (editor, logger)
    }

    #[test]
    fn test_delete_active_activates_next_sibling() {
        let (editor, logger) = editor();
        editor.execute(Command::ActivateNode { node_id: NodeId::from("b") });
        editor.execute(Command::DeleteActiveNode);

        assert!(!editor.tree().contains("b"));
        assert_eq!(editor.active(), Some(NodeId::from("c")));
        assert!(logger.contains("Deleted node: B [Def]"));
    }

    #[test]
    fn test_delete_last_child_activates_previous() {
        let (editor, _) = editor();
        editor.execute(Command::DeleteNode { node_id: NodeId::from("c") });
        assert_eq!(editor.active(), Some(NodeId::from("b")));
    }

    #[test]
    fn test_delete_only_child_activates_parent() {
        let (editor, _) = editor();
        editor.execute(Command::DeleteNode { node_id: NodeId::from("a1") });
        assert_eq!(editor.active(), Some(NodeId::from("a")));
    }

    #[test]
    fn test_delete_emits_updated_then_deleted() {
        let (editor, _) = editor();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for name in [Event::TREE_UPDATED, Event::NODE_DELETED] {
            let seen = Rc::clone(&seen);
            editor.on(name, move |event| {
                seen.borrow_mut().push(event.clone());
                Ok(())
            });
        }

        editor.execute(Command::DeleteNode { node_id: NodeId::from("a") });

        assert_eq!(
            *seen.borrow(),
            vec![
                Event::TreeUpdated { node_id: NodeId::from("root"), full_replace: false },
                Event::NodeDeleted { node_id: NodeId::from("a"), parent_id: NodeId::from("root") },
            ]
        );
    }

    #[test]
    fn test_root_and_missing_are_refused() {
        let (editor, logger) = editor();
        let before = editor.tree().clone();

        editor.execute(Command::DeleteNode { node_id: NodeId::from("root") });
        editor.execute(Command::DeleteNode { node_id: NodeId::from("ghost") });
        editor.execute(Command::DeleteActiveNode);

        assert_eq!(*editor.tree(), before);
        assert_eq!(editor.active(), None);
        assert!(logger.contains("Cannot remove or move the root node"));
        assert!(logger.contains("Node not found: ghost"));
        assert!(logger.contains("No active node"));
    }
}
