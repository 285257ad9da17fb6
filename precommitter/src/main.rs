use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use precommitter::core::registry::all_linters;
use precommitter::core::types::Selection;
use precommitter::exit_codes;
use precommitter::io::command::SystemRunner;
use precommitter::io::config::{DEFAULT_CONFIG_FILE, ToolConfig, load_config};
use precommitter::io::process::Echo;
use precommitter::io::prompt::{PromptError, prompt_repo_target, prompt_selection};
use precommitter::io::target::resolve_repo_target;
use precommitter::logging;
use precommitter::setup::run_setup;

#[derive(Parser)]
#[command(
    name = "precommitter",
    version,
    about = "Set up linters and pre-commit hooks in a git repository"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install linters, copy their configs and wire the git hooks.
    Config {
        /// Repository root; prompted for when omitted.
        #[arg(long, value_name = "PATH")]
        repo: Option<String>,
        /// Linter to enable (repeatable); a picker is shown when omitted.
        #[arg(long = "linter", value_name = "KEY")]
        linters: Vec<String>,
        /// Tool config file (default: ./precommitter.toml if present).
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Hide package-manager output and progress lines.
        #[arg(short, long)]
        quiet: bool,
    },
    /// List the supported linters.
    Linters,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => report(&err),
    };
    std::process::exit(code);
}

fn report(err: &anyhow::Error) -> i32 {
    if let Some(PromptError::Cancelled) = err.downcast_ref::<PromptError>() {
        eprintln!("Cancelled.");
        return exit_codes::CANCELLED;
    }
    eprintln!("Error: {err:#}");
    exit_codes::FAILED
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Config {
            repo,
            linters,
            config,
            quiet,
        } => cmd_config(repo.as_deref(), &linters, config.as_deref(), quiet),
        Command::Linters => cmd_linters(),
    }
}

fn cmd_config(
    repo: Option<&str>,
    linters: &[String],
    config: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let cfg = read_config(config)?;
    let cwd = std::env::current_dir().context("resolve current directory")?;

    let target = match repo {
        Some(input) => resolve_repo_target(&cwd, input)?,
        None => prompt_repo_target(&cwd)?,
    };
    let selection = if linters.is_empty() {
        prompt_selection()?
    } else {
        Selection::new(linters)?
    };
    debug!(root = %target.root().display(), linters = selection.len(), "starting setup");

    let runner = SystemRunner {
        output_limit_bytes: cfg.output_limit_bytes,
        echo: if quiet { Echo::Quiet } else { Echo::Terminal },
    };
    let mut out: Box<dyn Write> = if quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };
    run_setup(&target, &selection, &cfg, &runner, &mut out)?;
    writeln!(out, "Pre-commit configuration complete.").context("write progress")?;
    Ok(())
}

fn read_config(explicit: Option<&Path>) -> Result<ToolConfig> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                bail!("config file {} not found", path.display());
            }
            load_config(path)
        }
        None => load_config(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn cmd_linters() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for linter in all_linters() {
        writeln!(
            stdout,
            "{:<12} {:<9} {}",
            linter.key, linter.ecosystem, linter.name
        )
        .context("write linter list")?;
    }
    Ok(())
}
