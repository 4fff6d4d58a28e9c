mod commands;

use arbor_editor::EditorConfig;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export, init, run, show, validate, ExportArgs, InitArgs, RunArgs, ShowArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Arbor CLI - edit typed trees from the command line
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a starter document
    Init(InitArgs),

    /// Check that a document is a well-formed tree
    Validate(ValidateArgs),

    /// Print a document or one of its subtrees
    Show(ShowArgs),

    /// Execute a command script against a document
    Run(RunArgs),

    /// Write a subtree to its own document
    Export(ExportArgs),
}

fn init_tracing(cwd: &str) {
    // A broken config is reported by the command itself
    let level = EditorConfig::load(cwd)
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    init_tracing(&cwd);

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Run(args) => run(args, &cwd),
        Command::Export(args) => export(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
