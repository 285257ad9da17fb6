//! Orchestration for `precommitter config`.
//!
//! Stages run strictly in order: dependency installs (one ecosystem at a
//! time), template copies, then hooks. The first fatal failure stops the run
//! and nothing already written is rolled back.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::plan::{DependencyPlan, plan};
use crate::core::types::{CopyReport, Selection};
use crate::io::command::CommandRunner;
use crate::io::config::ToolConfig;
use crate::io::hooks::install_hooks;
use crate::io::install::install;
use crate::io::materialize::{copied, materialize};
use crate::io::target::RepoTarget;

/// What a successful setup did.
#[derive(Debug, Clone)]
pub struct SetupOutcome {
    pub plan: DependencyPlan,
    pub copies: Vec<CopyReport>,
    /// Hook scripts written, as absolute paths.
    pub hooks: Vec<PathBuf>,
}

impl SetupOutcome {
    pub fn copied(&self) -> impl Iterator<Item = &CopyReport> + '_ {
        copied(&self.copies)
    }
}

/// Run the full setup against a validated repository.
///
/// Progress lines for the operator go to `out`. Install and hook failures
/// surface as [`crate::error::SetupError`] inside the returned error.
#[instrument(skip_all, fields(root = %target.root().display(), linters = selection.len()))]
pub fn run_setup<R: CommandRunner, W: Write>(
    target: &RepoTarget,
    selection: &Selection,
    cfg: &ToolConfig,
    runner: &R,
    out: &mut W,
) -> Result<SetupOutcome> {
    let plan = plan(selection);
    info!(ecosystems = plan.ecosystems().count(), "dependency plan ready");

    for (ecosystem, deps) in plan.iter() {
        progress(out, format_args!("Installing {ecosystem} dependencies..."))?;
        install(runner, cfg.commands_for(ecosystem), ecosystem, deps, target)?;
        progress(out, format_args!("✔ {ecosystem} dependencies installed."))?;
    }

    let copies = materialize(selection, cfg.templates(), target)?;
    for report in copied(&copies) {
        let name = display_name(&report.operation.destination);
        progress(out, format_args!("✔ Copied {name} to repo root."))?;
    }

    progress(out, format_args!("Setting up git hooks..."))?;
    let hooks = install_hooks(runner, &cfg.hooks, target)?;
    progress(
        out,
        format_args!("✔ Hooks written to {}.", cfg.hooks.dir.display()),
    )?;

    Ok(SetupOutcome {
        plan,
        copies,
        hooks,
    })
}

fn progress<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<()> {
    writeln!(out, "{line}").context("write progress")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
