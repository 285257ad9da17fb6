//! Pre-commit scaffolding for web repositories.
//!
//! Given a git repository and a set of linters, installs their packages
//! through npm and composer, copies config and ignore templates to the
//! repository root, and wires husky hooks for branch-name validation,
//! lint-staged and commit-message tagging.
//!
//! - **[`core`]**: Pure, deterministic logic (registry, dependency and copy
//!   planning, path guards). No I/O.
//! - **[`io`]**: Side effects (processes, file copies, hooks, prompts),
//!   isolated behind small seams so tests can script them.
//!
//! [`setup`] sequences the stages for the `config` command.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod setup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
