use super::CHANGE_TEXT;
use crate::{Command, EditorResult, Event, HostContext, Plugin, Subscriptions};
use arbor_tree::NodeId;
use std::rc::Rc;

pub struct ChangeText {
    ctx: HostContext,
}

impl ChangeText {
    /// Set the text of the explicit node, else the active node, else the root
    pub fn change(&self, node_id: Option<&NodeId>, text: &str) -> EditorResult<String> {
        let target = self.ctx.resolve_target(node_id);
        let old_text = self
            .ctx
            .tree
            .borrow_mut()
            .update_text(target.as_str(), text)?;

        self.ctx.log(format!(
            "Changed text of {}: \"{}\" -> \"{}\"",
            target, old_text, text
        ));

        self.ctx.emit(Event::NodeTextChanged {
            node_id: target.clone(),
            old_text: old_text.clone(),
            new_text: text.to_string(),
        });
        self.ctx.emit(Event::TreeUpdated {
            node_id: target,
            full_replace: false,
        });

        Ok(old_text)
    }
}

#[derive(Debug, Default)]
pub struct ChangeTextPlugin {
    subscriptions: Subscriptions,
}

impl Plugin for ChangeTextPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(ChangeText { ctx: ctx.clone() });
        ctx.modules.register(CHANGE_TEXT, Rc::clone(&api));

        self.subscriptions.on(&ctx.events, "changeNodeText", move |event| {
            if let Some(Command::ChangeNodeText { node_id, text }) = event.as_command() {
                api.change(node_id.as_ref(), text)?;
            }
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(CHANGE_TEXT);
        Ok(())
    }
}
