//! Repository target validation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::path::resolve;
use crate::error::{SetupError, SetupResult};

/// Version-control marker expected at the repository root.
pub const VCS_MARKER: &str = ".git";

/// A repository root that passed validation.
///
/// Checked once per run; later stages trust it without re-validating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    root: PathBuf,
}

impl RepoTarget {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Check that `path` exists, is a directory and carries a `.git` entry.
///
/// `.git` may be a directory or a file (worktrees and submodules).
pub fn validate_repo_target(path: &Path) -> SetupResult<RepoTarget> {
    if !path.exists() {
        return Err(invalid(path, "path does not exist"));
    }
    if !path.is_dir() {
        return Err(invalid(path, "path is not a directory"));
    }
    if !path.join(VCS_MARKER).exists() {
        return Err(invalid(path, "not a git repository (no .git found)"));
    }
    debug!(root = %path.display(), "repository target validated");
    Ok(RepoTarget {
        root: path.to_path_buf(),
    })
}

/// Resolve operator input against `cwd`, then validate it.
pub fn resolve_repo_target(cwd: &Path, input: &str) -> SetupResult<RepoTarget> {
    let input = input.trim();
    if input.is_empty() {
        return Err(invalid(cwd, "no path given"));
    }
    validate_repo_target(&resolve(cwd, input))
}

fn invalid(path: &Path, reason: &str) -> SetupError {
    SetupError::InvalidTarget {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn accepts_directory_with_git_marker() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join(".git")).expect("mkdir .git");

        let target = validate_repo_target(temp.path()).expect("valid");
        assert_eq!(target.root(), temp.path());
    }

    #[test]
    fn accepts_git_file_marker() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(".git"), "gitdir: ../main/.git/worktrees/x\n")
            .expect("write .git");

        assert!(validate_repo_target(temp.path()).is_ok());
    }

    #[test]
    fn rejects_missing_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = validate_repo_target(&temp.path().join("nope")).unwrap_err();
        assert!(
            matches!(err, SetupError::InvalidTarget { ref reason, .. } if reason.contains("does not exist"))
        );
    }

    #[test]
    fn rejects_directory_without_marker() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = validate_repo_target(temp.path()).unwrap_err();
        assert!(err.to_string().contains("not a git repository"));
    }

    #[test]
    fn rejects_file_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("README.md");
        fs::write(&file, "hi").expect("write file");
        let err = validate_repo_target(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn resolves_relative_input_against_cwd() {
        let temp = tempfile::tempdir().expect("tempdir");
        let repo = temp.path().join("site");
        fs::create_dir_all(repo.join(".git")).expect("mkdir");

        let target = resolve_repo_target(temp.path(), " ./site/ ").expect("valid");
        assert_eq!(target.root(), repo.as_path());
        assert!(resolve_repo_target(temp.path(), "").is_err());
    }
}
