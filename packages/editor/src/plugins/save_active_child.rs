use super::{sanitize_file_name, SAVE_ACTIVE_CHILD};
use crate::{EditorError, EditorResult, Event, HostContext, Plugin, Subscriptions};
use arbor_tree::TreeNode;
use std::rc::Rc;

/// Export of the active node's subtree
pub struct SaveActiveChild {
    ctx: HostContext,
}

impl SaveActiveChild {
    /// Deep copy of the active node; it must have children
    fn active_subtree(&self) -> EditorResult<TreeNode> {
        let active = self
            .ctx
            .activation
            .active()
            .ok_or(EditorError::NoActiveNode)?;
        let subtree = self.ctx.tree.borrow().clone_subtree(active.as_str())?;

        if !subtree.has_children() {
            return Err(EditorError::EmptySubtree(active));
        }
        Ok(subtree)
    }

    pub fn save(&self) -> EditorResult<String> {
        let subtree = self.active_subtree()?;
        let json = self.ctx.config.render_json(&subtree)?;
        self.ctx.log(format!(
            "Subtree of {} saved to JSON ({} nodes)",
            subtree.id,
            subtree.subtree_len()
        ));
        Ok(json)
    }

    pub fn download(&self) -> EditorResult<String> {
        let subtree = self.active_subtree()?;
        let json = self.ctx.config.render_json(&subtree)?;
        let file_name = format!("{}_children.json", sanitize_file_name(&subtree.text, "subtree"));

        self.ctx.emit(Event::DocumentExported {
            file_name: file_name.clone(),
            json,
        });
        self.ctx.log(format!("File {} saved", file_name));
        Ok(file_name)
    }
}

#[derive(Debug, Default)]
pub struct SaveActiveChildPlugin {
    subscriptions: Subscriptions,
}

impl Plugin for SaveActiveChildPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(SaveActiveChild { ctx: ctx.clone() });
        ctx.modules.register(SAVE_ACTIVE_CHILD, Rc::clone(&api));

        let handler = Rc::clone(&api);
        self.subscriptions.on(&ctx.events, "saveActiveChildToJson", move |_| {
            handler.save()?;
            Ok(())
        });

        self.subscriptions.on(&ctx.events, "downloadActiveChildAsJson", move |_| {
            api.download()?;
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(SAVE_ACTIVE_CHILD);
        Ok(())
    }
}
