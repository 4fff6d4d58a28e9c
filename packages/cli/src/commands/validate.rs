use super::{read_tree, resolve};
use anyhow::Result;
use arbor_editor::EditorConfig;
use arbor_tree::{walk_node, TreeNode, Visitor};
use clap::Args;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Tree document to check
    pub file: PathBuf,
}

/// Node count per type and maximum depth
#[derive(Debug, Default)]
struct Stats {
    types: BTreeMap<String, usize>,
    max_depth: usize,
}

impl Visitor for Stats {
    fn visit_node(&mut self, node: &TreeNode, depth: usize) {
        *self.types.entry(node.node_type.clone()).or_insert(0) += 1;
        self.max_depth = self.max_depth.max(depth);
        walk_node(self, node, depth);
    }
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let path = resolve(cwd, &args.file);
    let root = read_tree(&path)?;

    let mut stats = Stats::default();
    stats.visit_root(&root);

    println!(
        "{} {}: {} nodes, depth {}",
        "✓".green(),
        args.file.display(),
        root.subtree_len(),
        stats.max_depth
    );

    for (node_type, count) in &stats.types {
        let known = config.types.get(node_type).is_some();
        let marker = if known { "•".normal() } else { "?".yellow() };
        println!("  {} {} × {}", marker, node_type.bright_white(), count);
    }

    let unknown = stats
        .types
        .keys()
        .filter(|t| config.types.get(t).is_none())
        .count();
    if unknown > 0 {
        println!();
        println!(
            "{} {} type(s) not in the configured catalog",
            "⚠️".yellow(),
            unknown
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counts_types_and_depth() {
        let root = TreeNode::new("r", "Root", "R")
            .with_child(TreeNode::new("a", "Def", "A").with_child(TreeNode::new("a1", "Def", "A1")))
            .with_child(TreeNode::new("b", "Folder", "B"));

        let mut stats = Stats::default();
        stats.visit_root(&root);

        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.types.get("Def"), Some(&2));
        assert_eq!(stats.types.get("Root"), Some(&1));
    }
}
