//! # Editor
//!
//! Facade that wires a tree, the shared components and a plugin host
//! together. Producers only ever need `execute` and the read accessors.

use crate::modules::TREE_MANAGER;
use crate::plugins::default_plugins;
use crate::{
    Command, EditorConfig, EditorResult, Event, HostContext, Logger, Plugin, PluginHost,
    SubscriptionId, TreeAccess,
};
use arbor_tree::{codec, NodeId, TreeNode, TreeStore};
use std::cell::Ref;
use std::rc::Rc;
use tracing::info;

pub struct Editor {
    ctx: HostContext,
    host: PluginHost,
}

impl Editor {
    /// Editor with only the core `treeManager` module and no plugins
    pub fn new(root: TreeNode, config: EditorConfig, logger: Rc<dyn Logger>) -> EditorResult<Self> {
        let ctx = HostContext::new(root, config, logger)?;

        let access: Rc<dyn TreeAccess> = ctx.tree.clone();
        ctx.modules.register(TREE_MANAGER, access);

        let host = PluginHost::new(ctx.clone());
        Ok(Self { ctx, host })
    }

    /// Editor with every built-in command plugin registered
    pub fn with_default_plugins(
        root: TreeNode,
        config: EditorConfig,
        logger: Rc<dyn Logger>,
    ) -> EditorResult<Self> {
        let mut editor = Self::new(root, config, logger)?;
        for (name, plugin) in default_plugins() {
            editor.host.register(name, plugin);
        }
        info!(
            plugins = editor.host.len(),
            nodes = editor.tree().len(),
            "Editor ready"
        );
        Ok(editor)
    }

    /// Decode a persisted document and open it with the built-in plugins
    pub fn from_json(
        source: &str,
        config: EditorConfig,
        logger: Rc<dyn Logger>,
    ) -> EditorResult<Self> {
        let root = codec::from_json(source)?;
        Self::with_default_plugins(root, config, logger)
    }

    pub fn context(&self) -> &HostContext {
        &self.ctx
    }

    pub fn host(&self) -> &PluginHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut PluginHost {
        &mut self.host
    }

    pub fn register_plugin(&mut self, name: &str, plugin: Box<dyn Plugin>) -> bool {
        self.host.register(name, plugin)
    }

    /// Publish a command; returns how many handlers received it
    pub fn execute(&self, command: Command) -> usize {
        self.ctx.execute(command)
    }

    pub fn on<F>(&self, event: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) -> EditorResult<()> + 'static,
    {
        self.ctx.events.on(event, handler)
    }

    pub fn off(&self, id: SubscriptionId) -> bool {
        self.ctx.events.off(id)
    }

    /// Read view of the tree; drop it before executing further commands
    pub fn tree(&self) -> Ref<'_, TreeStore> {
        self.ctx.tree.borrow()
    }

    pub fn active(&self) -> Option<NodeId> {
        self.ctx.activation.active()
    }

    pub fn to_value(&self) -> serde_json::Value {
        codec::to_value(self.tree().root())
    }

    /// Document JSON, indented when the config asks for it
    pub fn to_json(&self) -> EditorResult<String> {
        self.ctx.config.render_json(self.tree().root())
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        // Handlers and modules hold context clones; release them so the
        // shared components can be freed
        self.host.shutdown();
        self.ctx.events.clear();
        self.ctx.modules.clear();
    }
}
