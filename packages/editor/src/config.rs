use crate::{EditorResult, TypeCatalog};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "arbor.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Type given to new nodes when the command names none
    #[serde(default = "default_type")]
    pub default_type: String,

    /// Text given to new nodes when the command names none
    #[serde(default = "default_text")]
    pub default_text: String,

    /// Activate nodes right after they are created
    #[serde(default = "default_true")]
    pub activate_new_nodes: bool,

    /// Indent saved and exported documents
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Node type catalog
    #[serde(default)]
    pub types: TypeCatalog,

    /// `tracing` filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_type() -> String {
    "Def".to_string()
}

fn default_text() -> String {
    "New element".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(cwd: impl AsRef<Path>) -> EditorResult<Self> {
        let config_path = Self::path_in(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    pub fn path_in(cwd: impl AsRef<Path>) -> PathBuf {
        cwd.as_ref().join(DEFAULT_CONFIG_NAME)
    }

    /// Serialize a document the way this config asks for
    pub fn render_json(&self, node: &arbor_tree::TreeNode) -> EditorResult<String> {
        let json = if self.pretty_json {
            arbor_tree::codec::to_json_pretty(node)?
        } else {
            arbor_tree::codec::to_json(node)?
        };
        Ok(json)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_type: default_type(),
            default_text: default_text(),
            activate_new_nodes: true,
            pretty_json: true,
            types: TypeCatalog::default(),
            log_level: default_log_level(),
        }
    }
}
