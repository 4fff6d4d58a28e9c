pub mod export;
pub mod init;
pub mod run;
pub mod show;
pub mod validate;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use run::{run, RunArgs};
pub use show::{show, ShowArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{anyhow, Result};
use arbor_tree::{codec, TreeNode};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve `path` against the working directory
pub(crate) fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

/// Read and validate a persisted tree document
pub(crate) fn read_tree(path: &Path) -> Result<TreeNode> {
    let source = fs::read_to_string(path)
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
    codec::from_json(&source).map_err(|e| anyhow!("{}: {}", path.display(), e))
}
