//! # Arbor Tree
//!
//! In-memory tree data model for the Arbor editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ codec: JSON ⇄ TreeNode (validated)          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: TreeStore                            │
//! │  - Sole owner of the root node              │
//! │  - Lookup, parent lookup, cycle guard       │
//! │  - Insert / remove / move / clone           │
//! │  - Every method leaves the tree well-formed │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: plugins, events, activation         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Single owner**: children are owned by exactly one parent
//! 2. **Derived parents**: parent links are query results, never stored
//! 3. **Validate before accept**: nothing malformed enters the store
//! 4. **No partial mutation**: failed operations leave the tree untouched
//!
//! ## Usage
//!
//! ```rust
//! use arbor_tree::{Position, TreeNode, TreeStore};
//!
//! let root = TreeNode::new("root", "Root", "R")
//!     .with_child(TreeNode::new("a", "Def", "A"));
//! let mut store = TreeStore::new(root)?;
//!
//! store.insert_child("root", TreeNode::new("b", "Def", "B"), None)?;
//! store.move_node("a", "b", Position::Inside)?;
//!
//! assert_eq!(store.find_parent("a").map(|p| p.id.as_str()), Some("b"));
//! # Ok::<(), arbor_tree::TreeError>(())
//! ```

pub mod codec;
mod errors;
mod node;
mod store;
pub mod visitor;

pub use codec::{validate, MAX_DEPTH};
pub use errors::{TreeError, TreeResult};
pub use node::{NodeId, NodeIter, Position, Props, TreeNode};
pub use store::{MoveOutcome, Removal, TreeStore};
pub use visitor::{walk_node, Visitor};
