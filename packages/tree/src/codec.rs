//! # JSON Codec
//!
//! Persisted format is the node itself, recursively:
//!
//! ```json
//! { "id": "root", "type": "Root", "text": "R", "children": [], "props": {} }
//! ```
//!
//! Decoding is all-or-nothing: a payload is rejected if any node lacks an
//! `id`, a `type`, or a string `text`, or if two nodes share an id.
//! `children` may be omitted and decodes as empty.
//!
//! Every tree level costs two JSON nesting levels (the node object and its
//! `children` array), so serde_json's default recursion limit is lifted and
//! replaced by [`MAX_DEPTH`], which the store enforces on every mutation.

use crate::{TreeError, TreeNode, TreeResult};
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Maximum number of levels in a tree, root included
pub const MAX_DEPTH: usize = 256;

/// JSON nesting allowed in a document: two per tree level plus room for props
const MAX_NESTING: usize = 2 * MAX_DEPTH + 128;

/// Check the structural well-formedness of a subtree
///
/// Applied top-down: non-empty id, non-empty type, ids unique within the
/// subtree, at most [`MAX_DEPTH`] levels.
pub fn validate(root: &TreeNode) -> TreeResult<()> {
    let height = root.height();
    if height > MAX_DEPTH {
        return Err(TreeError::InvalidTree(format!(
            "tree has {} levels, at most {} are allowed",
            height, MAX_DEPTH
        )));
    }

    let mut seen: HashSet<&str> = HashSet::new();

    for node in root.iter() {
        if node.id.is_empty() {
            return Err(TreeError::InvalidTree(format!(
                "node with text {:?} has an empty id",
                node.text
            )));
        }
        if node.node_type.trim().is_empty() {
            return Err(TreeError::InvalidTree(format!(
                "node {} has an empty type",
                node.id
            )));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(TreeError::InvalidTree(format!("duplicate node id {}", node.id)));
        }
    }

    Ok(())
}

/// Parse JSON text without serde_json's recursion limit
///
/// Nesting is bounded up front instead, so deep documents the editor wrote
/// itself load back while hostile input cannot exhaust the stack.
pub fn parse_value(source: &str) -> Result<Value, serde_json::Error> {
    let nesting = nesting_depth(source);
    if nesting > MAX_NESTING {
        return Err(serde_json::Error::custom(format!(
            "document nests {} levels deep, at most {} are allowed",
            nesting, MAX_NESTING
        )));
    }

    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Deepest bracket nesting outside string literals
fn nesting_depth(source: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in source.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

/// Decode and validate a tree from a JSON value
pub fn from_value(value: Value) -> TreeResult<TreeNode> {
    if !value.is_object() {
        return Err(TreeError::InvalidTree("tree root must be a JSON object".to_string()));
    }

    let root: TreeNode =
        serde_json::from_value(value).map_err(|e| TreeError::InvalidTree(e.to_string()))?;
    validate(&root)?;
    Ok(root)
}

/// Decode and validate a tree from JSON text
pub fn from_json(source: &str) -> TreeResult<TreeNode> {
    let value = parse_value(source).map_err(|e| TreeError::InvalidTree(e.to_string()))?;
    from_value(value)
}

pub fn to_value(root: &TreeNode) -> Value {
    // TreeNode has string keys only, so conversion cannot fail
    serde_json::to_value(root).unwrap_or(Value::Null)
}

pub fn to_json(root: &TreeNode) -> Result<String, serde_json::Error> {
    serde_json::to_string(root)
}

/// Two-space indented JSON, the format used for downloads
pub fn to_json_pretty(root: &TreeNode) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_preserves_structure() {
        let source = json!({
            "id": "root",
            "type": "Root",
            "text": "R",
            "children": [
                { "id": "a", "type": "Def", "text": "", "children": [],
                  "props": { "weight": 3, "tags": ["x"] } },
                { "id": "b", "type": "Folder", "text": "B", "children": [
                    { "id": "b1", "type": "Def", "text": "B1", "children": [] }
                ] }
            ]
        });

        let tree = from_value(source.clone()).unwrap();
        assert_eq!(to_value(&tree), source);

        let again = from_json(&to_json(&tree).unwrap()).unwrap();
        assert_eq!(again, tree);
    }

    #[test]
    fn test_round_trip_deep_chain() {
        let mut root = TreeNode::new("n219", "Def", "leaf");
        for level in (0..219).rev() {
            root = TreeNode::new(format!("n{}", level), "Def", level.to_string()).with_child(root);
        }

        let json = to_json(&root).unwrap();
        let decoded = from_json(&json).unwrap();
        assert_eq!(decoded, root);
        assert_eq!(decoded.height(), 220);
    }

    #[test]
    fn test_nesting_ignores_brackets_in_strings() {
        assert_eq!(nesting_depth(r#"{"a":"[[[{"}"#), 1);
        assert_eq!(nesting_depth(r#"{"a":"\"[[","b":[{}]}"#), 3);
        assert_eq!(nesting_depth("[]"), 1);
    }

    #[test]
    fn test_missing_children_decodes_as_empty() {
        let tree = from_json(r#"{"id":"r","type":"Root","text":"R"}"#).unwrap();
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_rejects_missing_fields() {
        let missing_id = json!({ "type": "Root", "text": "R", "children": [] });
        assert!(matches!(from_value(missing_id), Err(TreeError::InvalidTree(_))));

        let missing_type = json!({ "id": "r", "text": "R", "children": [] });
        assert!(matches!(from_value(missing_type), Err(TreeError::InvalidTree(_))));

        let numeric_text = json!({ "id": "r", "type": "Root", "text": 7, "children": [] });
        assert!(matches!(from_value(numeric_text), Err(TreeError::InvalidTree(_))));
    }

    #[test]
    fn test_rejects_deep_malformed_descendant() {
        let source = json!({
            "id": "root", "type": "Root", "text": "R",
            "children": [
                { "id": "a", "type": "Def", "text": "A", "children": [
                    { "id": "a1", "type": "", "text": "A1", "children": [] }
                ] }
            ]
        });

        assert!(matches!(from_value(source), Err(TreeError::InvalidTree(_))));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let source = json!({
            "id": "root", "type": "Root", "text": "R",
            "children": [
                { "id": "dup", "type": "Def", "text": "1", "children": [] },
                { "id": "dup", "type": "Def", "text": "2", "children": [] }
            ]
        });

        let err = from_value(source).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(from_json("[]").is_err());
        assert!(from_json("not json").is_err());
    }
}
