//! External command abstraction.
//!
//! The [`CommandRunner`] trait decouples the installers from actual process
//! spawning. Tests use scripted runners that record invocations and return
//! predetermined exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Result, anyhow};
use tracing::{info, instrument};

use crate::io::process::{Echo, run_command};

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the child process.
    pub workdir: PathBuf,
}

impl CommandSpec {
    /// Build a spec from an argv (`argv[0]` is the program) plus trailing arguments.
    pub fn from_argv<S: AsRef<str>>(
        argv: &[String],
        extra_args: &[S],
        workdir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow!("command must not be empty"))?;
        let mut args = args.to_vec();
        args.extend(extra_args.iter().map(|arg| arg.as_ref().to_string()));
        Ok(Self {
            program: program.clone(),
            args,
            workdir: workdir.into(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit information for a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub code: Option<i32>,
    /// Tail of captured stderr, for error messages.
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// One-line description of a failed run.
    pub fn failure_message(&self, spec: &CommandSpec) -> String {
        let status = match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("`{spec}` failed ({status})")
        } else {
            format!("`{spec}` failed ({status}): {stderr}")
        }
    }
}

/// Runs external commands synchronously.
pub trait CommandRunner {
    /// Run `spec` to completion. `Err` means the process could not be started.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    pub output_limit_bytes: usize,
    pub echo: Echo,
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(program = %spec.program))]
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        info!(command = %spec, workdir = %spec.workdir.display(), "running command");
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).current_dir(&spec.workdir);
        let output = run_command(cmd, self.output_limit_bytes, self.echo)?;
        Ok(CommandResult {
            code: output.status.code(),
            stderr: stderr_tail(&output.stderr, STDERR_TAIL_LINES),
        })
    }
}

const STDERR_TAIL_LINES: usize = 20;

fn stderr_tail(stderr: &[u8], max_lines: usize) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_argv_appends_extra_args() {
        let argv = vec!["npm".to_string(), "install".to_string(), "--save-dev".to_string()];
        let spec = CommandSpec::from_argv(&argv, &["husky", "lint-staged"], "/srv/site")
            .expect("spec");
        assert_eq!(spec.program, "npm");
        assert_eq!(spec.args, vec!["install", "--save-dev", "husky", "lint-staged"]);
        assert_eq!(spec.to_string(), "npm install --save-dev husky lint-staged");
    }

    #[test]
    fn from_argv_rejects_empty_command() {
        let err = CommandSpec::from_argv::<&str>(&[], &[], "/srv/site").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn failure_message_includes_status_and_stderr() {
        let spec = CommandSpec::from_argv(&["npm".to_string()], &["install"], "/srv").expect("spec");
        let result = CommandResult {
            code: Some(1),
            stderr: "ERR! 404\n".to_string(),
        };
        assert!(!result.success());
        assert_eq!(
            result.failure_message(&spec),
            "`npm install` failed (exit code 1): ERR! 404"
        );
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let tail = stderr_tail(b"a\nb\nc\nd\n", 2);
        assert_eq!(tail, "c\nd");
    }
}
