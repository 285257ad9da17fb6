//! Package-manager installs, one invocation per ecosystem.

use tracing::{info, instrument, warn};

use crate::core::types::Ecosystem;
use crate::error::{SetupError, SetupResult};
use crate::io::command::{CommandRunner, CommandSpec};
use crate::io::config::EcosystemCommands;
use crate::io::target::RepoTarget;

/// Install `deps` for one ecosystem inside the repository.
///
/// Runs the ecosystem's preparation commands, then a single install command
/// with the whole dependency list appended. Any spawn failure or non-zero exit
/// is an [`SetupError::Install`]; nothing is retried.
#[instrument(skip_all, fields(ecosystem = %ecosystem, deps = deps.len()))]
pub fn install<R: CommandRunner>(
    runner: &R,
    commands: &EcosystemCommands,
    ecosystem: Ecosystem,
    deps: &[String],
    target: &RepoTarget,
) -> SetupResult<()> {
    let fail = |message: String| SetupError::Install { ecosystem, message };

    for prepare in &commands.prepare {
        let spec = CommandSpec::from_argv::<&str>(prepare, &[], target.root())
            .map_err(|e| fail(format!("{e:#}")))?;
        run_checked(runner, &spec).map_err(fail)?;
    }

    let spec = CommandSpec::from_argv(&commands.install, deps, target.root())
        .map_err(|e| fail(format!("{e:#}")))?;
    run_checked(runner, &spec).map_err(fail)?;
    info!("dependencies installed");
    Ok(())
}

fn run_checked<R: CommandRunner>(runner: &R, spec: &CommandSpec) -> Result<(), String> {
    let result = runner.run(spec).map_err(|e| {
        warn!(command = %spec, err = %e, "command could not be started");
        format!("could not run `{spec}`: {e:#}")
    })?;
    if !result.success() {
        warn!(command = %spec, code = ?result.code, "command failed");
        return Err(result.failure_message(spec));
    }
    Ok(())
}
