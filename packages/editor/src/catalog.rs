//! # Type Catalog
//!
//! Injected description of the node types the editor offers. The tree
//! itself accepts any non-empty type name; the catalog is consulted only by
//! plugins that create or retype nodes.

use crate::{EditorError, EditorResult};
use arbor_tree::Props;
use serde::{Deserialize, Serialize};

/// Color used for types without an entry
pub const FALLBACK_COLOR: &str = "black";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCatalog {
    entries: Vec<TypeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub name: String,

    pub color: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropSpec>,
}

/// A property a node of some type may carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSpec {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    /// Free-form value kind hint (e.g. "string", "number")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: None,
            props: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, required: bool) -> Self {
        self.props.push(PropSpec {
            name: name.into(),
            required,
            kind: None,
        });
        self
    }
}

impl TypeCatalog {
    pub fn new(entries: Vec<TypeEntry>) -> Self {
        Self { entries }
    }

    pub fn types(&self) -> &[TypeEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn props_of(&self, name: &str) -> &[PropSpec] {
        self.get(name).map(|e| e.props.as_slice()).unwrap_or(&[])
    }

    pub fn color_of(&self, name: &str) -> &str {
        self.get(name)
            .map(|e| e.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Check the type exists and every required prop is present
    ///
    /// Returns the catalog's spelling of the type name.
    pub fn validate(&self, name: &str, props: Option<&Props>) -> EditorResult<&str> {
        let entry = self
            .get(name)
            .ok_or_else(|| EditorError::UnknownType(name.to_string()))?;

        let missing: Vec<&str> = entry
            .props
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| !props.map(|p| p.contains_key(&spec.name)).unwrap_or(false))
            .map(|spec| spec.name.as_str())
            .collect();

        if !missing.is_empty() {
            return Err(EditorError::MissingProps {
                node_type: entry.name.clone(),
                props: missing.join(", "),
            });
        }

        Ok(entry.name.as_str())
    }

    /// Type used when a command names none: first non-root entry
    pub fn default_type(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| !e.name.eq_ignore_ascii_case("root"))
            .or_else(|| self.entries.first())
            .map(|e| e.name.as_str())
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new(vec![
            TypeEntry::new("Root", "darkred").with_description("Document root"),
            TypeEntry::new("Def", "steelblue").with_description("Plain element"),
            TypeEntry::new("Folder", "goldenrod").with_description("Groups other elements"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> TypeCatalog {
        serde_json::from_value(json!([
            { "type": "Root", "color": "darkred" },
            { "type": "Task", "color": "green", "props": [{ "name": "due", "required": true }] },
            { "type": "Note", "color": "gray", "description": "Free text" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.get("task").unwrap().name, "Task");
        assert_eq!(catalog.color_of("NOTE"), "gray");
        assert_eq!(catalog.color_of("Unknown"), FALLBACK_COLOR);
        assert!(catalog.props_of("Unknown").is_empty());
    }

    #[test]
    fn test_validate_required_props() {
        let catalog = catalog();

        let err = catalog.validate("task", None).unwrap_err();
        assert!(matches!(err, EditorError::MissingProps { .. }));

        let mut props = Props::new();
        props.insert("due".to_string(), json!("2024-01-01"));
        assert_eq!(catalog.validate("task", Some(&props)).unwrap(), "Task");

        assert!(matches!(
            catalog.validate("Widget", None),
            Err(EditorError::UnknownType(_))
        ));
    }

    #[test]
    fn test_default_type_skips_root() {
        assert_eq!(catalog().default_type(), Some("Task"));
        assert_eq!(TypeCatalog::default().default_type(), Some("Def"));
        assert_eq!(TypeCatalog::new(vec![]).default_type(), None);
    }
}
