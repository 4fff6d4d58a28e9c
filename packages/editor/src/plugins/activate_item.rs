use crate::modules::ACTIVATE_ITEM;
use crate::{Activation, Command, EditorResult, HostContext, Plugin, Subscriptions};
use std::rc::Rc;

/// Drives activation from `activateNode` / `deactivateAll`
#[derive(Debug, Default)]
pub struct ActivateItemPlugin {
    subscriptions: Subscriptions,
}

impl Plugin for ActivateItemPlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let activation: Rc<dyn Activation> = ctx.activation.clone();
        ctx.modules.register(ACTIVATE_ITEM, activation);

        let state = Rc::clone(&ctx.activation);
        self.subscriptions.on(&ctx.events, "activateNode", move |event| {
            match event.as_command() {
                Some(Command::ActivateNode { node_id }) => state.activate(node_id.as_str()),
                _ => Ok(()),
            }
        });

        let state = Rc::clone(&ctx.activation);
        self.subscriptions.on(&ctx.events, "deactivateAll", move |_| {
            state.deactivate();
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(ACTIVATE_ITEM);
        Ok(())
    }
}
