use super::{canonical_type, CHANGE_TYPE};
use crate::{Command, EditorResult, Event, HostContext, Plugin, Subscriptions};
use arbor_tree::{NodeId, TreeError};
use std::rc::Rc;

pub struct ChangeType {
    ctx: HostContext,
}

impl ChangeType {
    /// Retype the explicit node, else the active node, else the root
    ///
    /// With a type catalog registered, the name must be known and the
    /// node's props must satisfy it; the catalog spelling is stored.
    pub fn change(&self, node_id: Option<&NodeId>, node_type: &str) -> EditorResult<String> {
        let target = self.ctx.resolve_target(node_id);

        let props = {
            let tree = self.ctx.tree.borrow();
            let node = tree
                .find_by_id(target.as_str())
                .ok_or_else(|| TreeError::NodeNotFound(target.clone()))?;
            node.props.clone()
        };
        let new_type = canonical_type(&self.ctx, node_type, props.as_ref())?;

        let old_type = self
            .ctx
            .tree
            .borrow_mut()
            .update_type(target.as_str(), new_type.clone())?;

        self.ctx.log(format!(
            "Changed type of {}: {} -> {}",
            target, old_type, new_type
        ));

        self.ctx.emit(Event::TreeUpdated {
            node_id: target.clone(),
            full_replace: false,
        });
        self.ctx.emit(Event::NodeTypeChanged {
            node_id: target,
            old_type: old_type.clone(),
            new_type,
        });

        Ok(old_type)
    }
}

#[derive(Debug, Default)]
pub struct ChangeTypePlugin {
    subscriptions: Subscriptions,
}

impl Plugin for ChangeTypePlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(ChangeType { ctx: ctx.clone() });
        ctx.modules.register(CHANGE_TYPE, Rc::clone(&api));

        self.subscriptions.on(&ctx.events, "changeNodeType", move |event| {
            if let Some(Command::ChangeNodeType { node_id, node_type }) = event.as_command() {
                api.change(node_id.as_ref(), node_type)?;
            }
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(CHANGE_TYPE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Editor, EditorConfig, MemoryLogger};
    use arbor_tree::TreeNode;
    use std::cell::RefCell;

    fn editor() -> (Editor, Rc<MemoryLogger>) {
        let logger = Rc::new(MemoryLogger::new());
        let root = TreeNode::new("root", "Root", "R").with_child(TreeNode::new("a", "Def", "A"));
        let editor =
            Editor::with_default_plugins(root, EditorConfig::default(), logger.clone()).unwrap();
        (editor, logger)
    }

    #[test]
    fn test_change_type_emits_updated_then_changed() {
        let (editor, _) = editor();
        let names = Rc::new(RefCell::new(Vec::new()));
        for name in [Event::TREE_UPDATED, Event::NODE_TYPE_CHANGED] {
            let names = Rc::clone(&names);
            editor.on(name, move |event| {
                names.borrow_mut().push(event.name().to_string());
                Ok(())
            });
        }

        editor.execute(Command::ChangeNodeType {
            node_id: Some(NodeId::from("a")),
            node_type: "FOLDER".to_string(),
        });

        assert_eq!(editor.tree().find_by_id("a").unwrap().node_type, "Folder");
        assert_eq!(*names.borrow(), vec!["treeUpdated", "nodeTypeChanged"]);
    }

    #[test]
    fn test_unknown_type_is_refused() {
        let (editor, logger) = editor();
        editor.execute(Command::ChangeNodeType {
            node_id: Some(NodeId::from("a")),
            node_type: "Widget".to_string(),
        });

        assert_eq!(editor.tree().find_by_id("a").unwrap().node_type, "Def");
        assert!(logger.contains("Unknown node type: Widget"));
    }

    #[test]
    fn test_any_type_accepted_without_catalog() {
        let (mut editor, _) = editor();
        editor.host_mut().unregister(crate::plugins::TYPE_MANAGER);

        editor.execute(Command::ChangeNodeType {
            node_id: Some(NodeId::from("a")),
            node_type: "Widget".to_string(),
        });

        assert_eq!(editor.tree().find_by_id("a").unwrap().node_type, "Widget");
    }
}
