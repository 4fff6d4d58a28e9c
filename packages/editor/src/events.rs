//! # Event Bus
//!
//! Synchronous publish/subscribe channel shared by every component.
//!
//! ## Dispatch rules
//!
//! - Handlers for a name run in registration order, before `emit` returns
//! - A failing handler is logged; the remaining handlers still run and the
//!   emitter never sees the error
//! - Handlers may emit (depth-first), subscribe or unsubscribe while a
//!   dispatch is in progress; each emit works on a snapshot of the list
//!
//! Callers must not hold a `RefCell` borrow of shared state across `emit`.

use crate::{Command, EditorResult, Logger};
use arbor_tree::{NodeId, Position};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{trace, warn};

/// Notifications and commands carried by the bus
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Event {
    /// Published under the command's own name
    Command(Command),

    #[serde(rename_all = "camelCase")]
    TreeUpdated { node_id: NodeId, full_replace: bool },

    #[serde(rename_all = "camelCase")]
    NodeActivated { node_id: NodeId },

    NodeDeactivated,

    #[serde(rename_all = "camelCase")]
    NodeDeleted { node_id: NodeId, parent_id: NodeId },

    #[serde(rename_all = "camelCase")]
    NodeTextChanged {
        node_id: NodeId,
        old_text: String,
        new_text: String,
    },

    #[serde(rename_all = "camelCase")]
    NodeTypeChanged {
        node_id: NodeId,
        old_type: String,
        new_type: String,
    },

    #[serde(rename_all = "camelCase")]
    NodeMoved {
        node_id: NodeId,
        old_parent_id: NodeId,
        new_parent_id: NodeId,
        position: Position,
    },

    #[serde(rename_all = "camelCase")]
    TreeLoaded { root_id: NodeId },

    /// A document is ready for the download collaborator
    #[serde(rename_all = "camelCase")]
    DocumentExported { file_name: String, json: String },
}

impl Event {
    pub const TREE_UPDATED: &'static str = "treeUpdated";
    pub const NODE_ACTIVATED: &'static str = "nodeActivated";
    pub const NODE_DEACTIVATED: &'static str = "nodeDeactivated";
    pub const NODE_DELETED: &'static str = "nodeDeleted";
    pub const NODE_TEXT_CHANGED: &'static str = "nodeTextChanged";
    pub const NODE_TYPE_CHANGED: &'static str = "nodeTypeChanged";
    pub const NODE_MOVED: &'static str = "nodeMoved";
    pub const TREE_LOADED: &'static str = "treeLoaded";
    pub const DOCUMENT_EXPORTED: &'static str = "documentExported";

    /// Every domain notification name (commands excluded)
    pub const DOMAIN_EVENTS: [&'static str; 9] = [
        Self::TREE_UPDATED,
        Self::NODE_ACTIVATED,
        Self::NODE_DEACTIVATED,
        Self::NODE_DELETED,
        Self::NODE_TEXT_CHANGED,
        Self::NODE_TYPE_CHANGED,
        Self::NODE_MOVED,
        Self::TREE_LOADED,
        Self::DOCUMENT_EXPORTED,
    ];

    pub fn name(&self) -> &str {
        match self {
            Event::Command(command) => command.name(),
            Event::TreeUpdated { .. } => Self::TREE_UPDATED,
            Event::NodeActivated { .. } => Self::NODE_ACTIVATED,
            Event::NodeDeactivated => Self::NODE_DEACTIVATED,
            Event::NodeDeleted { .. } => Self::NODE_DELETED,
            Event::NodeTextChanged { .. } => Self::NODE_TEXT_CHANGED,
            Event::NodeTypeChanged { .. } => Self::NODE_TYPE_CHANGED,
            Event::NodeMoved { .. } => Self::NODE_MOVED,
            Event::TreeLoaded { .. } => Self::TREE_LOADED,
            Event::DocumentExported { .. } => Self::DOCUMENT_EXPORTED,
        }
    }

    pub fn as_command(&self) -> Option<&Command> {
        match self {
            Event::Command(command) => Some(command),
            _ => None,
        }
    }
}

/// Handle returned by `EventBus::on`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Handler = Rc<dyn Fn(&Event) -> EditorResult<()>>;

struct Subscription {
    id: SubscriptionId,
    event: String,
    handler: Handler,
}

pub struct EventBus {
    subscriptions: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
    logger: Rc<dyn Logger>,
}

impl EventBus {
    pub fn new(logger: Rc<dyn Logger>) -> Self {
        Self {
            subscriptions: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            logger,
        }
    }

    pub fn on<F>(&self, event: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) -> EditorResult<()> + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let event = event.into();
        trace!(event = %event, subscription = id.0, "Subscribed");
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            event,
            handler: Rc::new(handler),
        });
        id
    }

    /// Remove a subscription; false if it was already gone
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    /// Dispatch to every handler registered for the event's name
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&self, event: &Event) -> usize {
        let name = event.name();
        let handlers: Vec<(SubscriptionId, Handler)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.event == name)
            .map(|s| (s.id, Rc::clone(&s.handler)))
            .collect();

        trace!(event = name, handlers = handlers.len(), "Emitting");

        for (id, handler) in &handlers {
            if let Err(err) = handler(event) {
                warn!(event = name, subscription = id.0, error = %err, "Event handler failed");
                self.logger
                    .log(&format!("Handler for event {} failed: {}", name, err));
            }
        }

        handlers.len()
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|s| s.event == event)
            .count()
    }

    /// Drop every subscription
    pub fn clear(&self) {
        self.subscriptions.borrow_mut().clear();
    }
}

/// Subscriptions owned by one plugin, released together on teardown
#[derive(Debug, Default)]
pub struct Subscriptions {
    ids: Vec<SubscriptionId>,
}

impl Subscriptions {
    pub fn on<F>(&mut self, events: &EventBus, event: &str, handler: F)
    where
        F: Fn(&Event) -> EditorResult<()> + 'static,
    {
        self.ids.push(events.on(event, handler));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn release(&mut self, events: &EventBus) {
        for id in self.ids.drain(..) {
            events.off(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorError, MemoryLogger};

    fn bus() -> (Rc<EventBus>, Rc<MemoryLogger>) {
        let logger = Rc::new(MemoryLogger::new());
        (Rc::new(EventBus::new(logger.clone())), logger)
    }

    fn updated(id: &str) -> Event {
        Event::TreeUpdated { node_id: NodeId::from(id), full_replace: false }
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let (bus, _) = bus();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            bus.on(Event::TREE_UPDATED, move |_| {
                order.borrow_mut().push(tag);
                Ok(())
            });
        }

        assert_eq!(bus.emit(&updated("x")), 3);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failing_handler_does_not_stop_others() {
        let (bus, logger) = bus();
        let reached = Rc::new(Cell::new(false));

        bus.on(Event::TREE_UPDATED, |_| Err(EditorError::Handler("boom".to_string())));
        let flag = Rc::clone(&reached);
        bus.on(Event::TREE_UPDATED, move |_| {
            flag.set(true);
            Ok(())
        });

        bus.emit(&updated("x"));

        assert!(reached.get());
        assert!(logger.contains("boom"));
    }

    #[test]
    fn test_reentrant_emit_is_depth_first() {
        let (bus, _) = bus();
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = Rc::clone(&bus);
        let log = Rc::clone(&order);
        bus.on(Event::TREE_UPDATED, move |_| {
            log.borrow_mut().push("outer-start");
            inner_bus.emit(&Event::NodeDeactivated);
            log.borrow_mut().push("outer-end");
            Ok(())
        });

        let log = Rc::clone(&order);
        bus.on(Event::NODE_DEACTIVATED, move |_| {
            log.borrow_mut().push("inner");
            Ok(())
        });

        let log = Rc::clone(&order);
        bus.on(Event::TREE_UPDATED, move |_| {
            log.borrow_mut().push("second-outer");
            Ok(())
        });

        bus.emit(&updated("x"));

        assert_eq!(
            *order.borrow(),
            vec!["outer-start", "inner", "outer-end", "second-outer"]
        );
    }

    #[test]
    fn test_off_removes_handler() {
        let (bus, _) = bus();
        let id = bus.on(Event::NODE_DEACTIVATED, |_| Ok(()));
        assert_eq!(bus.handler_count(Event::NODE_DEACTIVATED), 1);
        assert!(bus.off(id));
        assert!(!bus.off(id));
        assert_eq!(bus.emit(&Event::NodeDeactivated), 0);
    }

    #[test]
    fn test_subscribe_during_dispatch_applies_to_next_emit() {
        let (bus, _) = bus();
        let count = Rc::new(Cell::new(0));

        let inner_bus = Rc::clone(&bus);
        let counter = Rc::clone(&count);
        bus.on(Event::NODE_DEACTIVATED, move |_| {
            let counter = Rc::clone(&counter);
            inner_bus.on(Event::NODE_DEACTIVATED, move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            });
            Ok(())
        });

        assert_eq!(bus.emit(&Event::NodeDeactivated), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(bus.emit(&Event::NodeDeactivated), 2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_command_events_use_command_name() {
        let (bus, _) = bus();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        bus.on("deactivateAll", move |event| {
            assert!(event.as_command().is_some());
            counter.set(counter.get() + 1);
            Ok(())
        });

        bus.emit(&Event::Command(Command::DeactivateAll));
        bus.emit(&Event::NodeDeactivated);

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(updated("n1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event": "treeUpdated", "nodeId": "n1", "fullReplace": false })
        );
    }
}
