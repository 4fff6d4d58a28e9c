use super::LOG_TREE;
use crate::{Command, EditorResult, HostContext, LogFormat, Plugin, Subscriptions};
use arbor_tree::{codec, walk_node, NodeId, TreeError, TreeNode, Visitor};
use std::rc::Rc;

/// Indented outline of a subtree, one entry per line
///
/// ```text
/// Project [Root] ID: root
///   owner: "sam"
///   Children (1):
///     Notes [Def] ID: n1
/// ```
pub fn outline(node: &TreeNode) -> Vec<String> {
    let mut writer = OutlineWriter::default();
    writer.visit_root(node);
    writer.lines
}

#[derive(Default)]
struct OutlineWriter {
    lines: Vec<String>,
}

impl Visitor for OutlineWriter {
    fn visit_node(&mut self, node: &TreeNode, depth: usize) {
        // Each level nests under a "Children" header, hence two steps per depth
        let indent = "  ".repeat(depth * 2);
        self.lines.push(format!(
            "{}{} [{}] ID: {}",
            indent, node.text, node.node_type, node.id
        ));

        if let Some(props) = &node.props {
            for (key, value) in props {
                self.lines.push(format!("{}  {}: {}", indent, key, value));
            }
        }

        if node.has_children() {
            self.lines
                .push(format!("{}  Children ({}):", indent, node.children.len()));
            walk_node(self, node, depth);
        }
    }
}

/// Diagnostic dumps through the logging collaborator
pub struct LogTree {
    ctx: HostContext,
}

impl LogTree {
    pub fn log_tree(&self, format: LogFormat) -> EditorResult<()> {
        let root = self.ctx.tree.borrow().root().clone();
        self.ctx.log("Tree structure:");
        self.write(&root, format)
    }

    pub fn log_node(&self, node_id: &NodeId, format: LogFormat) -> EditorResult<()> {
        let node = self
            .ctx
            .tree
            .borrow()
            .find_by_id(node_id.as_str())
            .cloned()
            .ok_or_else(|| TreeError::NodeNotFound(node_id.clone()))?;

        self.ctx.log(format!("Node structure of {}:", node.text));
        self.write(&node, format)
    }

    /// Pretty JSON of the whole tree, also written to the log
    pub fn export_json(&self) -> EditorResult<String> {
        let json = codec::to_json_pretty(self.ctx.tree.borrow().root())?;
        self.ctx.log(&json);
        self.ctx.log("Tree exported to JSON");
        Ok(json)
    }

    fn write(&self, node: &TreeNode, format: LogFormat) -> EditorResult<()> {
        match format {
            LogFormat::Json => self.ctx.log(codec::to_json_pretty(node)?),
            LogFormat::Outline => {
                for line in outline(node) {
                    self.ctx.log(line);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct LogTreePlugin {
    subscriptions: Subscriptions,
}

impl Plugin for LogTreePlugin {
    fn init(&mut self, ctx: &HostContext) -> EditorResult<()> {
        let api = Rc::new(LogTree { ctx: ctx.clone() });
        ctx.modules.register(LOG_TREE, Rc::clone(&api));

        let handler = Rc::clone(&api);
        self.subscriptions.on(&ctx.events, "logTree", move |event| {
            if let Some(Command::LogTree { format }) = event.as_command() {
                handler.log_tree(*format)?;
            }
            Ok(())
        });

        let handler = Rc::clone(&api);
        self.subscriptions.on(&ctx.events, "logNode", move |event| {
            if let Some(Command::LogNode { node_id, format }) = event.as_command() {
                handler.log_node(node_id, *format)?;
            }
            Ok(())
        });

        self.subscriptions.on(&ctx.events, "exportTreeJson", move |_| {
            api.export_json()?;
            Ok(())
        });

        Ok(())
    }

    fn destroy(&mut self, ctx: &HostContext) -> EditorResult<()> {
        self.subscriptions.release(&ctx.events);
        ctx.modules.unregister(LOG_TREE);
        Ok(())
    }
}
