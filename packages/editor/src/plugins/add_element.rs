use super::{insert_new_node, ADD_ELEMENT};
use crate::{Command, EditorResult, HostContext, NewNode, Plugin, Subscriptions};
use arbor_tree::NodeId;
use std::rc::Rc;

/// Inserts under the explicit parent, else the active node, else the root
pub struct AddElement {
    ctx: HostContext,
}

impl AddElement {
    pub fn add(&self, spec: &NewNode) -> EditorResult<NodeId> {
        let parent_id = self.ctx.resolve_target(spec.parent_id.as_ref());
        insert_new_node(&self.ctx, &parent_id, spec)
    }
}

#[derive(Debug, Default)]
pub struct AddElementPlugin {
    subscriptions: Subscriptions,
}

impl Plugin for AddElementPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(AddElement { ctx: ctx.clone() });
        ctx.modules.register(ADD_ELEMENT, Rc::clone(&api));

        self.subscriptions.on(&ctx.events, "addElement", move |event| {
            if let Some(Command::AddElement(spec)) = event.as_command() {
                api.add(spec)?;
            }
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(ADD_ELEMENT);
        Ok(())
    }
}
