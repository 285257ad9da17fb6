//! Deterministic list of template copies for a selection.

use std::path::Path;

use crate::core::path::config_destination_name;
use crate::core::registry::EXTRA_FILES;
use crate::core::types::{CopyOperation, CopyOrigin, Selection};

/// Build every copy a run will attempt, in execution order.
///
/// Selected linters come first in registry order (config, then ignore),
/// followed by the fixed extras. Config destinations are hidden-prefixed;
/// ignore and extra destinations are used as declared.
pub fn plan_copies(selection: &Selection, repo_root: &Path) -> Vec<CopyOperation> {
    let mut ops = Vec::new();
    for linter in selection.linters() {
        if let Some(config) = linter.config {
            ops.push(CopyOperation {
                origin: CopyOrigin::Config { linter: linter.key },
                template: config,
                destination: repo_root.join(config_destination_name(config)),
            });
        }
        if let Some(ignore) = linter.ignore {
            ops.push(CopyOperation {
                origin: CopyOrigin::Ignore { linter: linter.key },
                template: ignore,
                destination: repo_root.join(ignore),
            });
        }
    }
    for extra in &EXTRA_FILES {
        ops.push(CopyOperation {
            origin: CopyOrigin::Extra,
            template: extra.source,
            destination: repo_root.join(extra.destination),
        });
    }
    ops
}
