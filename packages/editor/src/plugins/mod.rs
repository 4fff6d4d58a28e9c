//! # Command Plugins
//!
//! Each plugin subscribes to one or more command names, publishes a typed
//! API under its module name and releases both on `destroy`.
//!
//! Handlers return the operation's error to the bus, which logs it. A
//! failed command leaves the tree and activation untouched and emits no
//! mutation event.

mod activate_item;
mod add_child;
mod add_element;
mod change_text;
mod change_type;
mod delete_node;
mod load_document;
mod log_tree;
mod move_node;
mod save_active_child;
mod save_document;
mod type_manager;

pub use activate_item::ActivateItemPlugin;
pub use add_child::{AddChild, AddChildPlugin};
pub use add_element::{AddElement, AddElementPlugin};
pub use change_text::{ChangeText, ChangeTextPlugin};
pub use change_type::{ChangeType, ChangeTypePlugin};
pub use delete_node::{DeleteNode, DeleteNodePlugin};
pub use load_document::{LoadDocument, LoadDocumentPlugin};
pub use log_tree::{outline, LogTree, LogTreePlugin};
pub use move_node::{MoveNode, MoveNodePlugin};
pub use save_active_child::{SaveActiveChild, SaveActiveChildPlugin};
pub use save_document::{sanitize_file_name, SaveDocument, SaveDocumentPlugin};
pub use type_manager::TypeManagerPlugin;

use crate::modules::ACTIVATE_ITEM;
use crate::{EditorResult, Event, HostContext, NewNode, Plugin, TypeCatalog};
use arbor_tree::{NodeId, Props, TreeNode};

pub const ADD_ELEMENT: &str = "addElem";
pub const ADD_CHILD: &str = "addChild";
pub const DELETE_NODE: &str = "delActItem";
pub const CHANGE_TEXT: &str = "changeText";
pub const CHANGE_TYPE: &str = "changeType";
pub const MOVE_NODE: &str = "dragNDrop";
pub const LOAD_DOCUMENT: &str = "loadAllDoc";
pub const SAVE_DOCUMENT: &str = "saveAllDoc";
pub const SAVE_ACTIVE_CHILD: &str = "saveActiveChild";
pub const LOG_TREE: &str = "logTree";
pub const TYPE_MANAGER: &str = "typeManager";

fn boxed<P: Plugin + Default + 'static>() -> Box<dyn Plugin> {
    Box::<P>::default()
}

/// Every built-in plugin under its module name, in registration order
pub fn default_plugins() -> Vec<(&'static str, Box<dyn Plugin>)> {
    vec![
        (TYPE_MANAGER, boxed::<TypeManagerPlugin>()),
        (ACTIVATE_ITEM, boxed::<ActivateItemPlugin>()),
        (ADD_ELEMENT, boxed::<AddElementPlugin>()),
        (ADD_CHILD, boxed::<AddChildPlugin>()),
        (DELETE_NODE, boxed::<DeleteNodePlugin>()),
        (CHANGE_TEXT, boxed::<ChangeTextPlugin>()),
        (CHANGE_TYPE, boxed::<ChangeTypePlugin>()),
        (MOVE_NODE, boxed::<MoveNodePlugin>()),
        (LOAD_DOCUMENT, boxed::<LoadDocumentPlugin>()),
        (SAVE_DOCUMENT, boxed::<SaveDocumentPlugin>()),
        (SAVE_ACTIVE_CHILD, boxed::<SaveActiveChildPlugin>()),
        (LOG_TREE, boxed::<LogTreePlugin>()),
    ]
}

/// Catalog spelling of `requested`, when a type catalog is registered
pub(crate) fn canonical_type(
    ctx: &HostContext,
    requested: &str,
    props: Option<&Props>,
) -> EditorResult<String> {
    match ctx.modules.get::<TypeCatalog>(TYPE_MANAGER) {
        Some(catalog) => Ok(catalog.validate(requested, props)?.to_string()),
        None => Ok(requested.to_string()),
    }
}

/// Build a node from `spec` and insert it under `parent_id`
pub(crate) fn insert_new_node(
    ctx: &HostContext,
    parent_id: &NodeId,
    spec: &NewNode,
) -> EditorResult<NodeId> {
    let requested = spec
        .node_type
        .as_deref()
        .unwrap_or(&ctx.config.default_type);
    let node_type = canonical_type(ctx, requested, spec.props.as_ref())?;
    let text = spec
        .text
        .clone()
        .unwrap_or_else(|| ctx.config.default_text.clone());

    let mut node = TreeNode::create(node_type, text);
    node.props = spec.props.clone();
    let node_id = node.id.clone();
    let label = format!("{} [{}]", node.text, node.node_type);

    ctx.tree
        .borrow_mut()
        .insert_child(parent_id.as_str(), node, spec.index)?;

    ctx.log(format!("Added node {} under {}", label, parent_id));
    ctx.emit(Event::TreeUpdated {
        node_id: node_id.clone(),
        full_replace: false,
    });

    if spec.activate.unwrap_or(ctx.config.activate_new_nodes) {
        ctx.activation.activate(node_id.as_str())?;
    }

    Ok(node_id)
}
