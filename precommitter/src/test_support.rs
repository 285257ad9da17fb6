//! Test-only helpers: a throwaway repository and a scripted command runner.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::command::{CommandResult, CommandRunner, CommandSpec};
use crate::io::target::{RepoTarget, validate_repo_target};

/// Temporary workspace with a `repo/` (carrying `.git`) and a sibling
/// `templates/` directory.
pub struct TestRepo {
    _temp: TempDir,
    root: PathBuf,
    templates: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = temp.path().join("repo");
        let templates = temp.path().join("templates");
        fs::create_dir_all(root.join(".git")).context("create .git")?;
        fs::create_dir_all(&templates).context("create templates dir")?;
        Ok(Self {
            _temp: temp,
            root,
            templates,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn target(&self) -> RepoTarget {
        validate_repo_target(&self.root).unwrap_or_else(|err| panic!("test repo invalid: {err}"))
    }

    pub fn template_dir(&self) -> PathBuf {
        self.templates.clone()
    }

    /// Write a template file named `name` with `contents`.
    pub fn add_template(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.templates.join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Read a file relative to the repository root.
    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.root.join(rel);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    /// Write a tool config TOML next to the repository and return its path.
    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self
            .templates
            .parent()
            .ok_or_else(|| anyhow!("templates dir has no parent"))?
            .join("precommitter.toml");
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

#[derive(Debug, Clone)]
struct Failure {
    needle: String,
    code: i32,
    stderr: String,
}

/// Runner that records every invocation and succeeds unless told otherwise.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    calls: RefCell<Vec<CommandSpec>>,
    failures: Vec<Failure>,
    unspawnable: Vec<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` for any command whose rendered form contains `needle`.
    pub fn fail_when(mut self, needle: &str, code: i32, stderr: &str) -> Self {
        self.failures.push(Failure {
            needle: needle.to_string(),
            code,
            stderr: stderr.to_string(),
        });
        self
    }

    /// Fail to start any command whose program is `program`.
    pub fn unspawnable(mut self, program: &str) -> Self {
        self.unspawnable.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines, in invocation order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());
        if self.unspawnable.iter().any(|p| *p == spec.program) {
            return Err(anyhow!("No such file or directory (os error 2)"));
        }
        let rendered = spec.to_string();
        let result = match self.failures.iter().find(|f| rendered.contains(&f.needle)) {
            Some(failure) => CommandResult {
                code: Some(failure.code),
                stderr: failure.stderr.clone(),
            },
            None => CommandResult {
                code: Some(0),
                stderr: String::new(),
            },
        };
        Ok(result)
    }
}
