use super::MOVE_NODE;
use crate::{Command, EditorResult, Event, HostContext, Plugin, Subscriptions};
use arbor_tree::{MoveOutcome, NodeId, Position};
use std::rc::Rc;

/// Drag-and-drop relocation of a subtree
pub struct MoveNode {
    ctx: HostContext,
}

impl MoveNode {
    pub fn relocate(
        &self,
        node_id: &NodeId,
        target_id: &NodeId,
        position: Position,
    ) -> EditorResult<MoveOutcome> {
        let outcome = self
            .ctx
            .tree
            .borrow_mut()
            .move_node(node_id.as_str(), target_id.as_str(), position)?;

        self.ctx.log(format!(
            "Moved node {} {} {}",
            node_id, position, target_id
        ));

        self.ctx.emit(Event::NodeMoved {
            node_id: node_id.clone(),
            old_parent_id: outcome.old_parent_id.clone(),
            new_parent_id: outcome.new_parent_id.clone(),
            position,
        });
        self.ctx.emit(Event::TreeUpdated {
            node_id: node_id.clone(),
            full_replace: false,
        });

        Ok(outcome)
    }
}

#[derive(Debug, Default)]
pub struct MoveNodePlugin {
    subscriptions: Subscriptions,
}

impl Plugin for MoveNodePlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(MoveNode { ctx: ctx.clone() });
        ctx.modules.register(MOVE_NODE, Rc::clone(&api));

        self.subscriptions.on(&ctx.events, "moveNode", move |event| {
            if let Some(Command::MoveNode { node_id, target_id, position }) = event.as_command() {
                api.relocate(node_id, target_id, *position)?;
            }
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(MOVE_NODE);
        Ok(())
    }
}
