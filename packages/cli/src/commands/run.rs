use super::{read_tree, resolve};
use anyhow::{anyhow, Result};
use arbor_editor::{Command, Editor, EditorConfig, Event, Logger};
use arbor_tree::codec;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Tree document to edit
    pub file: PathBuf,

    /// JSON array of commands to execute in order
    #[arg(short, long)]
    pub script: PathBuf,

    /// Where to write the resulting tree (defaults to the input file)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Directory for documents produced by download commands
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Confirm document loads without asking (otherwise each load prompts)
    #[arg(short, long)]
    pub yes: bool,
}

/// Prints editor log lines as they happen
struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        tracing::debug!(target: "arbor", "{}", message);
        println!("  {} {}", "│".dimmed(), message);
    }
}

fn read_script(path: &Path) -> Result<Vec<Command>> {
    let source = fs::read_to_string(path)
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
    codec::parse_value(&source)
        .and_then(serde_json::from_value)
        .map_err(|e| anyhow!("Invalid script {}: {}", path.display(), e))
}

/// Settle confirmation for commands that need it
///
/// Loads already confirmed in the script or covered by `--yes` go through;
/// any other load asks.
fn confirm(
    command: Command,
    yes: bool,
    mut ask: impl FnMut() -> Result<bool>,
) -> Result<Command> {
    match command {
        Command::LoadTreeFromJson { data, confirmed } => {
            let confirmed = confirmed || yes || ask()?;
            Ok(Command::LoadTreeFromJson { data, confirmed })
        }
        other => Ok(other),
    }
}

/// Prompt on stdin before a load replaces the tree
fn ask_to_replace() -> Result<bool> {
    print!("  {} Replace the current tree? [y/N] ", "?".yellow().bold());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

/// `y` or `yes` in any case; anything else, including no input, declines
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn run(args: RunArgs, cwd: &str) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let input = resolve(cwd, &args.file);
    let root = read_tree(&input)?;
    let script = read_script(&resolve(cwd, &args.script))?;

    println!(
        "{} {} command(s) on {}",
        "▶".bright_blue().bold(),
        script.len(),
        args.file.display()
    );

    let editor = Editor::with_default_plugins(root, config, Rc::new(ConsoleLogger))?;

    // Download collaborator: exported documents land in the export directory
    let export_dir = resolve(cwd, &args.export_dir);
    editor.on(Event::DOCUMENT_EXPORTED, move |event| {
        if let Event::DocumentExported { file_name, json } = event {
            fs::create_dir_all(&export_dir)?;
            fs::write(export_dir.join(file_name), json)?;
        }
        Ok(())
    });

    let mut unhandled = 0;
    for command in script {
        let command = confirm(command, args.yes, ask_to_replace)?;
        let name = command.name().to_string();
        println!("{} {}", "•".bright_blue(), name.bright_white());

        if editor.execute(command) == 0 {
            unhandled += 1;
            println!("  {} no plugin handles {}", "⚠️".yellow(), name);
        }
    }

    let out = args.out.clone().unwrap_or_else(|| args.file.clone());
    fs::write(resolve(cwd, &out), editor.to_json()?)?;

    println!();
    println!(
        "{} Wrote {} nodes to {}",
        "✅".green(),
        editor.tree().len(),
        out.display()
    );
    if unhandled > 0 {
        println!("{} {} command(s) were not handled", "⚠️".yellow(), unhandled);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(confirmed: bool) -> Command {
        Command::LoadTreeFromJson {
            data: json!({}),
            confirmed,
        }
    }

    fn never_asked() -> Result<bool> {
        Err(anyhow!("prompt should not be shown"))
    }

    #[test]
    fn test_yes_confirms_loads_without_asking() {
        assert_eq!(confirm(load(false), true, never_asked).unwrap(), load(true));
        assert_eq!(confirm(load(true), false, never_asked).unwrap(), load(true));
        assert_eq!(
            confirm(Command::DeactivateAll, false, never_asked).unwrap(),
            Command::DeactivateAll
        );
    }

    #[test]
    fn test_unconfirmed_load_uses_the_answer() {
        assert_eq!(confirm(load(false), false, || Ok(true)).unwrap(), load(true));
        assert_eq!(confirm(load(false), false, || Ok(false)).unwrap(), load(false));
        assert!(confirm(load(false), false, never_asked).is_err());
    }

    #[test]
    fn test_answer_parsing() {
        for answer in ["y\n", "Y", " yes ", "YES\r\n"] {
            assert!(is_yes(answer), "{:?} should confirm", answer);
        }
        for answer in ["", "\n", "n", "no", "yep", "sure"] {
            assert!(!is_yes(answer), "{:?} should decline", answer);
        }
    }
}
