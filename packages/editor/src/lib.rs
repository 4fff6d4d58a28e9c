//! # Arbor Editor
//!
//! Event-driven plugin coordination on top of the Arbor tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ producers: CLI scripts, wasm UI, tests      │
//! └─────────────────────────────────────────────┘
//!                     ↓ Command
//! ┌─────────────────────────────────────────────┐
//! │ EventBus: synchronous, ordered dispatch     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ plugins: one per command family             │
//! │  - Resolve target (explicit/active/root)    │
//! │  - Mutate TreeStore, update activation      │
//! │  - Emit domain events on success only       │
//! └─────────────────────────────────────────────┘
//!                     ↓ treeUpdated, nodeActivated, ...
//! ┌─────────────────────────────────────────────┐
//! │ renderer (external): re-queries the tree    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Explicit context**: plugins receive a `HostContext`, there are no globals
//! 2. **Typed capabilities**: modules are looked up as `Rc<T>`, absent means unavailable
//! 3. **Isolated failures**: a failing plugin or handler never takes down the others
//! 4. **No partial mutation**: a failed command leaves tree and activation as they were
//!
//! ## Usage
//!
//! ```rust
//! use arbor_editor::{Command, Editor, EditorConfig, MemoryLogger, NewNode};
//! use arbor_tree::TreeNode;
//! use std::rc::Rc;
//!
//! let logger = Rc::new(MemoryLogger::new());
//! let root = TreeNode::new("root", "Root", "Project");
//! let editor = Editor::with_default_plugins(root, EditorConfig::default(), logger.clone())?;
//!
//! editor.execute(Command::AddElement(NewNode::new("Folder", "Inbox")));
//! editor.execute(Command::ChangeNodeText { node_id: None, text: "Today".into() });
//!
//! assert_eq!(editor.tree().root().children[0].text, "Today");
//! assert!(logger.contains("Changed text"));
//! # Ok::<(), arbor_editor::EditorError>(())
//! ```

mod activation;
mod catalog;
mod commands;
mod config;
mod context;
mod editor;
mod errors;
mod events;
mod host;
mod logger;
pub mod modules;
pub mod plugins;

pub use activation::{Activation, ActivationState};
pub use catalog::{PropSpec, TypeCatalog, TypeEntry, FALLBACK_COLOR};
pub use commands::{Command, LogFormat, NewNode};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use context::{HostContext, SharedTree, TreeAccess};
pub use editor::Editor;
pub use errors::{EditorError, EditorResult};
pub use events::{Event, EventBus, Handler, SubscriptionId, Subscriptions};
pub use host::{Plugin, PluginHost};
pub use logger::{Logger, MemoryLogger, TracingLogger};
pub use modules::ModuleRegistry;
