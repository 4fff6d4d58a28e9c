use super::{read_tree, resolve};
use anyhow::{anyhow, Result};
use arbor_editor::plugins::outline;
use arbor_tree::codec;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Json,
    Outline,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Tree document to print
    pub file: PathBuf,

    /// Print only this node's subtree
    #[arg(short, long)]
    pub node: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "outline")]
    pub format: ShowFormat,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let root = read_tree(&resolve(cwd, &args.file))?;

    let node = match &args.node {
        Some(id) => root
            .find(id)
            .ok_or_else(|| anyhow!("Node not found: {}", id))?,
        None => &root,
    };

    match args.format {
        ShowFormat::Json => println!("{}", codec::to_json_pretty(node)?),
        ShowFormat::Outline => {
            for line in outline(node) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
