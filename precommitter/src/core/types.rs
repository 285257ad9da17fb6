//! Shared deterministic types for the setup engine.
//!
//! These types define the contracts between the registry, the planners and the
//! I/O layer. They hold no handles to external state.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::core::registry;
use crate::error::SetupError;

/// Package ecosystem a linter installs into.
///
/// Declaration order is install order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ecosystem {
    Npm,
    Composer,
}

impl Ecosystem {
    /// Every ecosystem, in install order.
    pub const ALL: [Ecosystem; 2] = [Ecosystem::Npm, Ecosystem::Composer];

    /// The ecosystem that receives the always-installed tooling.
    pub const PRIMARY: Ecosystem = Ecosystem::Npm;

    pub fn as_str(self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Composer => "composer",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry of the linter registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinterDescriptor {
    /// Stable identifier used on the command line and in selections.
    pub key: &'static str,
    /// Human-readable label shown in the picker.
    pub name: &'static str,
    pub ecosystem: Ecosystem,
    /// Package names passed to the ecosystem installer, in declaration order.
    pub dependencies: &'static [&'static str],
    /// Config template filename inside the template directory.
    pub config: Option<&'static str>,
    /// Ignore template filename inside the template directory.
    pub ignore: Option<&'static str>,
}

impl fmt::Display for LinterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Template copied on every run regardless of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraFile {
    pub source: &'static str,
    pub destination: &'static str,
}

/// Non-empty set of registry keys chosen for one run.
///
/// Iteration follows registry order, so two selections built from the same
/// keys in different orders behave identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    keys: BTreeSet<&'static str>,
}

impl Selection {
    /// Build a selection from operator-supplied keys.
    ///
    /// Fails on an empty input or on a key the registry does not know.
    pub fn new<I, S>(keys: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = BTreeSet::new();
        for key in keys {
            let key = key.as_ref().trim();
            let linter = registry::find(key).ok_or_else(|| SetupError::UnknownLinter {
                key: key.to_string(),
            })?;
            resolved.insert(linter.key);
        }
        if resolved.is_empty() {
            return Err(SetupError::EmptySelection);
        }
        Ok(Self { keys: resolved })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selected descriptors in registry order.
    pub fn linters(&self) -> impl Iterator<Item = &'static LinterDescriptor> + '_ {
        registry::all_linters()
            .iter()
            .filter(|linter| self.keys.contains(linter.key))
    }

    /// Union of two selections.
    pub fn union(&self, other: &Selection) -> Selection {
        Selection {
            keys: self.keys.union(&other.keys).copied().collect(),
        }
    }
}

/// Which template a planned copy comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOrigin {
    Config { linter: &'static str },
    Ignore { linter: &'static str },
    Extra,
}

/// A single template copy into the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOperation {
    pub origin: CopyOrigin,
    /// Template filename as declared (before destination renaming).
    pub template: &'static str,
    pub destination: PathBuf,
}

/// Outcome of one attempted copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    /// Bytes were copied, replacing any previous file.
    Copied,
    /// The template does not exist; nothing was written.
    MissingSource,
    /// The path guard refused the operation; nothing was written.
    Rejected,
}

/// A copy operation paired with what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub operation: CopyOperation,
    pub status: CopyStatus,
}

/// Fixed-content script written into the hook manager's directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookScript {
    pub name: &'static str,
    pub body: &'static str,
}

/// Hook scripts written on every run.
pub const HOOK_SCRIPTS: [HookScript; 2] = [
    HookScript {
        name: "pre-commit",
        body: "npx validate-branch-name\nnpx lint-staged\n",
    },
    HookScript {
        name: "prepare-commit-msg",
        body: "npx jira-prepare-commit-msg\n",
    },
];
