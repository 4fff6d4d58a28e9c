use super::LOAD_DOCUMENT;
use crate::{Command, EditorError, EditorResult, Event, HostContext, Plugin, Subscriptions};
use arbor_tree::{codec, NodeId, TreeNode};
use serde_json::Value;
use std::rc::Rc;

/// Whole-document replacement
pub struct LoadDocument {
    ctx: HostContext,
}

impl LoadDocument {
    /// Decode `data` (a tree object, or JSON text) without touching state
    pub fn decode(data: &Value) -> EditorResult<TreeNode> {
        let root = match data {
            Value::String(text) => codec::from_json(text)?,
            other => codec::from_value(other.clone())?,
        };
        Ok(root)
    }

    /// Replace the tree once the document is valid and the caller confirmed
    ///
    /// On success activation is reset to the new root.
    pub fn load(&self, data: &Value, confirmed: bool) -> EditorResult<NodeId> {
        let root = Self::decode(data)?;
        if !confirmed {
            return Err(EditorError::ConfirmationRequired);
        }

        let root_id = root.id.clone();
        let nodes = root.subtree_len();
        self.ctx.tree.borrow_mut().replace_all(root)?;

        self.ctx
            .log(format!("Loaded document {} ({} nodes)", root_id, nodes));

        self.ctx.activation.deactivate();
        self.ctx.emit(Event::TreeLoaded {
            root_id: root_id.clone(),
        });
        self.ctx.emit(Event::TreeUpdated {
            node_id: root_id.clone(),
            full_replace: true,
        });
        self.ctx.activation.activate(root_id.as_str())?;

        Ok(root_id)
    }
}

#[derive(Debug, Default)]
pub struct LoadDocumentPlugin {
    subscriptions: Subscriptions,
}

impl Plugin for LoadDocumentPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(LoadDocument { ctx: ctx.clone() });
        ctx.modules.register(LOAD_DOCUMENT, Rc::clone(&api));

        self.subscriptions.on(&ctx.events, "loadTreeFromJson", move |event| {
            if let Some(Command::LoadTreeFromJson { data, confirmed }) = event.as_command() {
                api.load(data, *confirmed)?;
            }
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(LOAD_DOCUMENT);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Editor, EditorConfig, MemoryLogger};
    use serde_json::json;
    use std::cell::RefCell;

    fn editor() -> (Editor, Rc<MemoryLogger>) {
        let logger = Rc::new(MemoryLogger::new());
        let root = TreeNode::new("root", "Root", "R").with_child(TreeNode::new("a", "Def", "A"));
        let editor =
            Editor::with_default_plugins(root, EditorConfig::default(), logger.clone()).unwrap();
        (editor, logger)
    }

    fn document() -> Value {
        json!({
            "id": "doc",
            "type": "Root",
            "text": "Document",
            "children": [{ "id": "x", "type": "Def", "text": "X" }]
        })
    }

    #[test]
    fn test_load_requires_confirmation() {
        let (editor, logger) = editor();
        editor.execute(Command::LoadTreeFromJson { data: document(), confirmed: false });

        assert_eq!(editor.tree().root_id(), "root");
        assert!(logger.contains("confirmation"));
    }

    #[test]
    fn test_confirmed_load_resets_activation() {
        let (editor, _) = editor();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for name in [
            Event::NODE_DEACTIVATED,
            Event::TREE_LOADED,
            Event::TREE_UPDATED,
            Event::NODE_ACTIVATED,
        ] {
            let seen = Rc::clone(&seen);
            editor.on(name, move |event| {
                seen.borrow_mut().push(event.name().to_string());
                Ok(())
            });
        }

        editor.execute(Command::ActivateNode { node_id: NodeId::from("a") });
        seen.borrow_mut().clear();

        editor.execute(Command::LoadTreeFromJson { data: document(), confirmed: true });

        assert_eq!(editor.tree().root_id(), "doc");
        assert_eq!(editor.active(), Some(NodeId::from("doc")));
        assert_eq!(
            *seen.borrow(),
            vec!["nodeDeactivated", "treeLoaded", "treeUpdated", "nodeActivated"]
        );
    }

    #[test]
    fn test_load_accepts_json_text() {
        let (editor, _) = editor();
        let text = Value::String(document().to_string());
        editor.execute(Command::LoadTreeFromJson { data: text, confirmed: true });
        assert_eq!(editor.tree().len(), 2);
    }

    #[test]
    fn test_invalid_document_is_rejected_before_confirmation() {
        let (editor, logger) = editor();
        let bad = json!({ "id": "doc", "type": "Root", "children": [] });

        editor.execute(Command::LoadTreeFromJson { data: bad, confirmed: true });

        assert_eq!(editor.tree().root_id(), "root");
        assert!(logger.contains("Invalid tree"));
    }
}
