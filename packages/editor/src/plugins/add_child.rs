use super::{insert_new_node, ADD_CHILD};
use crate::{Command, EditorError, EditorResult, HostContext, NewNode, Plugin, Subscriptions};
use arbor_tree::NodeId;
use std::rc::Rc;

/// Inserts under the explicit parent or the active node; never the root by default
pub struct AddChild {
    ctx: HostContext,
}

impl AddChild {
    pub fn add(&self, spec: &NewNode) -> EditorResult<NodeId> {
        let parent_id = spec
            .parent_id
            .clone()
            .or_else(|| self.ctx.activation.active())
            .ok_or(EditorError::NoActiveNode)?;
        insert_new_node(&self.ctx, &parent_id, spec)
    }
}

#[derive(Debug, Default)]
pub struct AddChildPlugin {
    subscriptions: Subscriptions,
}

impl Plugin for AddChildPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(AddChild { ctx: ctx.clone() });
        ctx.modules.register(ADD_CHILD, Rc::clone(&api));

        self.subscriptions.on(&ctx.events, "addChild", move |event| {
            if let Some(Command::AddChild(spec)) = event.as_command() {
                api.add(spec)?;
            }
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(ADD_CHILD);
        Ok(())
    }
}
