//! Hook manager initialization and hook script generation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::core::types::{HOOK_SCRIPTS, HookScript};
use crate::error::{SetupError, SetupResult};
use crate::io::command::{CommandRunner, CommandSpec};
use crate::io::config::HooksConfig;
use crate::io::target::RepoTarget;

/// Initialize the hook manager and write the fixed hook scripts.
///
/// Linear: the init command must exit 0 before any script is written, and the
/// first failure ends the call. Existing scripts are overwritten.
#[instrument(skip_all, fields(root = %target.root().display()))]
pub fn install_hooks<R: CommandRunner>(
    runner: &R,
    config: &HooksConfig,
    target: &RepoTarget,
) -> SetupResult<Vec<PathBuf>> {
    let fail = |message: String| SetupError::Hook { message };

    let spec = CommandSpec::from_argv::<&str>(&config.init, &[], target.root())
        .map_err(|e| fail(format!("{e:#}")))?;
    let result = runner
        .run(&spec)
        .map_err(|e| fail(format!("could not run `{spec}`: {e:#}")))?;
    if !result.success() {
        warn!(command = %spec, code = ?result.code, "hook manager init failed");
        return Err(fail(result.failure_message(&spec)));
    }

    let hooks_dir = target.root().join(&config.dir);
    let mut written = Vec::with_capacity(HOOK_SCRIPTS.len());
    for script in &HOOK_SCRIPTS {
        let path = write_hook(&hooks_dir, script).map_err(|e| fail(format!("{e:#}")))?;
        written.push(path);
    }
    info!(count = written.len(), "hook scripts written");
    Ok(written)
}

fn write_hook(hooks_dir: &Path, script: &HookScript) -> Result<PathBuf> {
    fs::create_dir_all(hooks_dir)
        .with_context(|| format!("create hook directory {}", hooks_dir.display()))?;
    let path = hooks_dir.join(script.name);
    fs::write(&path, script.body).with_context(|| format!("write hook {}", path.display()))?;
    make_executable(&path)?;
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perm = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    perm.set_mode(0o755);
    fs::set_permissions(path, perm).with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedRunner, TestRepo};

    #[test]
    fn writes_fixed_hook_bodies_after_init() {
        let repo = TestRepo::new().expect("repo");
        let runner = ScriptedRunner::new();

        let written =
            install_hooks(&runner, &HooksConfig::default(), &repo.target()).expect("hooks");

        assert_eq!(written.len(), 2);
        assert_eq!(
            repo.read(".husky/pre-commit").expect("read"),
            "npx validate-branch-name\nnpx lint-staged\n"
        );
        assert_eq!(
            repo.read(".husky/prepare-commit-msg").expect("read"),
            "npx jira-prepare-commit-msg\n"
        );
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to_string(), "npx husky init");
    }

    #[test]
    fn overwrites_existing_hook_content() {
        let repo = TestRepo::new().expect("repo");
        fs::create_dir_all(repo.root().join(".husky")).expect("mkdir");
        fs::write(repo.root().join(".husky/pre-commit"), "npm test\n").expect("seed");

        install_hooks(&ScriptedRunner::new(), &HooksConfig::default(), &repo.target())
            .expect("hooks");

        assert_eq!(
            repo.read(".husky/pre-commit").expect("read"),
            "npx validate-branch-name\nnpx lint-staged\n"
        );
    }

    #[test]
    fn init_failure_is_hook_error_and_writes_nothing() {
        let repo = TestRepo::new().expect("repo");
        let runner = ScriptedRunner::new().fail_when("npx husky init", 1, "not found");

        let err = install_hooks(&runner, &HooksConfig::default(), &repo.target()).unwrap_err();

        assert!(matches!(err, SetupError::Hook { ref message } if message.contains("not found")));
        assert!(!repo.root().join(".husky").exists());
    }

    #[cfg(unix)]
    #[test]
    fn hook_scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let repo = TestRepo::new().expect("repo");
        install_hooks(&ScriptedRunner::new(), &HooksConfig::default(), &repo.target())
            .expect("hooks");

        let mode = fs::metadata(repo.root().join(".husky/prepare-commit-msg"))
            .expect("stat")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
