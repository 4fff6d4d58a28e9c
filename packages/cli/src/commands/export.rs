use super::{read_tree, resolve};
use anyhow::Result;
use arbor_editor::plugins::sanitize_file_name;
use arbor_editor::EditorConfig;
use arbor_tree::TreeStore;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Tree document to read
    pub file: PathBuf,

    /// Root of the subtree to export
    #[arg(short, long)]
    pub node: String,

    /// Output file (defaults to `<node text>_children.json`)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let store = TreeStore::new(read_tree(&resolve(cwd, &args.file))?)?;
    let subtree = store.clone_subtree(&args.node)?;
    let json = config.render_json(&subtree)?;

    if args.stdout {
        println!("{}", json);
        return Ok(());
    }

    let out = args.out.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}_children.json",
            sanitize_file_name(&subtree.text, "subtree")
        ))
    });
    fs::write(resolve(cwd, &out), json)?;

    println!(
        "{} Exported {} ({} nodes) → {}",
        "✓".green(),
        subtree.id,
        subtree.subtree_len(),
        out.display()
    );

    Ok(())
}
