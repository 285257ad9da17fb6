//! Dependency aggregation: selection -> per-ecosystem install lists.

use std::collections::{BTreeMap, HashSet};

use crate::core::registry::EXTRA_DEPENDENCIES;
use crate::core::types::{Ecosystem, Selection};

/// Deduplicated dependency lists keyed by ecosystem.
///
/// Ecosystems with nothing to install are absent. Iteration follows
/// [`Ecosystem`] order, which is also install order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyPlan {
    entries: BTreeMap<Ecosystem, Vec<String>>,
}

impl DependencyPlan {
    pub fn get(&self, ecosystem: Ecosystem) -> Option<&[String]> {
        self.entries.get(&ecosystem).map(Vec::as_slice)
    }

    pub fn ecosystems(&self) -> impl Iterator<Item = Ecosystem> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ecosystem, &[String])> + '_ {
        self.entries
            .iter()
            .map(|(ecosystem, deps)| (*ecosystem, deps.as_slice()))
    }
}

/// Compute the install plan for `selection`.
///
/// Per ecosystem: dependencies of the selected linters in registry order, first
/// occurrence wins. The primary ecosystem also receives [`EXTRA_DEPENDENCIES`].
pub fn plan(selection: &Selection) -> DependencyPlan {
    let mut entries = BTreeMap::new();
    for ecosystem in Ecosystem::ALL {
        let declared = selection
            .linters()
            .filter(|linter| linter.ecosystem == ecosystem)
            .flat_map(|linter| linter.dependencies.iter().copied());
        let extras: &[&str] = if ecosystem == Ecosystem::PRIMARY {
            &EXTRA_DEPENDENCIES[..]
        } else {
            &[]
        };
        let deps = dedup_in_order(declared.chain(extras.iter().copied()));
        if !deps.is_empty() {
            entries.insert(ecosystem, deps);
        }
    }
    DependencyPlan { entries }
}

fn dedup_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}
