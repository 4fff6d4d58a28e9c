use super::resolve;
use anyhow::Result;
use arbor_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use arbor_tree::{codec, TreeNode};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Starter document to create
    #[arg(short = 'o', long, default_value = "tree.json")]
    pub file: PathBuf,

    /// Force overwrite existing config and document
    #[arg(short, long)]
    pub force: bool,
}

/// Small document showing the default types
fn starter_tree() -> TreeNode {
    TreeNode::create("Root", "My Project")
        .with_child(
            TreeNode::create("Folder", "Inbox")
                .with_child(TreeNode::create("Def", "First note")),
        )
        .with_child(TreeNode::create("Folder", "Archive"))
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = EditorConfig::path_in(cwd);
    let tree_path = resolve(cwd, &args.file);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Arbor project...".bright_blue().bold());

    let config_json = serde_json::to_string_pretty(&EditorConfig::default())?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    if !tree_path.exists() || args.force {
        if let Some(parent) = tree_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tree_path, codec::to_json_pretty(&starter_tree())?)?;
        println!("  {} Created {}", "✓".green(), args.file.display());
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: arbor show {} --format outline", args.file.display());
    println!(
        "  2. Write a command script and run: arbor run {} --script commands.json",
        args.file.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_tree_is_valid() {
        let tree = starter_tree();
        assert!(codec::validate(&tree).is_ok());
        assert_eq!(tree.subtree_len(), 4);
        assert!(EditorConfig::default().types.get(&tree.node_type).is_some());
    }
}
