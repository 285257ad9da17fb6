//! Interactive operator prompts.
//!
//! Both prompts re-ask until the answer is acceptable: the path must name a
//! git repository and at least one linter must be picked.

use std::fmt;
use std::path::{Path, PathBuf};

use inquire::list_option::ListOption;
use inquire::validator::Validation;
use inquire::{InquireError, MultiSelect, Text};

use crate::core::registry::all_linters;
use crate::core::types::{LinterDescriptor, Selection};
use crate::error::SetupError;
use crate::io::target::{RepoTarget, resolve_repo_target};

/// Prompt failure that is not a validation problem.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("cancelled by operator")]
    Cancelled,
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("prompt failed: {0}")]
    Terminal(InquireError),
}

impl From<InquireError> for PromptError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Cancelled
            }
            other => PromptError::Terminal(other),
        }
    }
}

/// Ask for the repository path, resolving relative input against `cwd`.
pub fn prompt_repo_target(cwd: &Path) -> Result<RepoTarget, PromptError> {
    let base: PathBuf = cwd.to_path_buf();
    let validator_base = base.clone();
    let answer = Text::new("Enter the path to the root of your repo (absolute or relative):")
        .with_validator(move |input: &str| Ok(check_repo_input(&validator_base, input)))
        .prompt()?;
    Ok(resolve_repo_target(&base, &answer)?)
}

/// Accept `input` only if it resolves to a git repository.
fn check_repo_input(cwd: &Path, input: &str) -> Validation {
    match resolve_repo_target(cwd, input) {
        Ok(_) => Validation::Valid,
        Err(err) => Validation::Invalid(err.to_string().into()),
    }
}

/// Accept a pick of at least one linter.
fn check_picked(count: usize) -> Validation {
    if count == 0 {
        Validation::Invalid(SetupError::EmptySelection.to_string().into())
    } else {
        Validation::Valid
    }
}

#[derive(Clone, Copy)]
struct Choice(&'static LinterDescriptor);

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

/// Ask which linters to enable.
pub fn prompt_selection() -> Result<Selection, PromptError> {
    let choices: Vec<Choice> = all_linters().iter().map(Choice).collect();
    let picked = MultiSelect::new("Select linters to enable (use space to select):", choices)
        .with_validator(|picked: &[ListOption<&Choice>]| Ok(check_picked(picked.len())))
        .prompt()?;
    Ok(Selection::new(picked.iter().map(|choice| choice.0.key))?)
}
