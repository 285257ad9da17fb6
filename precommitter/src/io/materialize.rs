//! Copies config, ignore and extra templates into the repository root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::core::bundled::bundled_template;
use crate::core::copy_plan::plan_copies;
use crate::core::path::{guard_copy, is_within};
use crate::core::types::{CopyOperation, CopyReport, CopyStatus, Selection};
use crate::io::target::RepoTarget;

/// Where template contents come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource<'a> {
    /// The template set compiled into the binary.
    Bundled,
    /// A directory on disk that replaces the bundled set.
    Dir(&'a Path),
}

/// Copy every template the selection calls for.
///
/// Guard rejections and missing templates are skipped and reported, never
/// fatal. Existing destination files are overwritten. A template directory
/// that does not exist fails the call before anything is written, as does an
/// I/O error while copying a template that exists.
pub fn materialize(
    selection: &Selection,
    templates: TemplateSource<'_>,
    target: &RepoTarget,
) -> Result<Vec<CopyReport>> {
    if let TemplateSource::Dir(dir) = templates
        && !dir.is_dir()
    {
        bail!("template directory {} does not exist", dir.display());
    }
    plan_copies(selection, target.root())
        .into_iter()
        .map(|operation| {
            let status = apply(&operation, templates, target.root())?;
            Ok(CopyReport { operation, status })
        })
        .collect()
}

/// Reports whose template was actually written.
pub fn copied(reports: &[CopyReport]) -> impl Iterator<Item = &CopyReport> + '_ {
    reports
        .iter()
        .filter(|report| report.status == CopyStatus::Copied)
}

fn apply(
    op: &CopyOperation,
    templates: TemplateSource<'_>,
    repo_root: &Path,
) -> Result<CopyStatus> {
    match templates {
        TemplateSource::Bundled => {
            if !is_within(repo_root, &op.destination) {
                return Ok(reject(op));
            }
            let Some(contents) = bundled_template(op.template) else {
                warn!(template = op.template, "no bundled template; skipping");
                return Ok(CopyStatus::MissingSource);
            };
            fs::write(&op.destination, contents)
                .with_context(|| format!("write {}", op.destination.display()))?;
        }
        TemplateSource::Dir(dir) => {
            let source = dir.join(op.template);
            if !guard_copy(dir, &source, repo_root, &op.destination) {
                return Ok(reject(op));
            }
            if !source.is_file() {
                warn!(source = %source.display(), "template not present; skipping");
                return Ok(CopyStatus::MissingSource);
            }
            fs::copy(&source, &op.destination).with_context(|| {
                format!(
                    "copy {} to {}",
                    source.display(),
                    op.destination.display()
                )
            })?;
        }
    }
    debug!(destination = %op.destination.display(), "template copied");
    Ok(CopyStatus::Copied)
}

fn reject(op: &CopyOperation) -> CopyStatus {
    warn!(
        template = op.template,
        destination = %op.destination.display(),
        "template path escapes its root; skipping"
    );
    CopyStatus::Rejected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CopyOrigin;
    use crate::test_support::TestRepo;

    fn status_of<'a>(reports: &'a [CopyReport], destination: &str) -> Option<&'a CopyStatus> {
        reports
            .iter()
            .find(|r| r.operation.destination.file_name().is_some_and(|n| n == destination))
            .map(|r| &r.status)
    }

    #[test]
    fn copies_selected_templates_with_destination_names() {
        let repo = TestRepo::new().expect("repo");
        repo.add_template("prettierrc.js", "module.exports = {};\n")
            .expect("template");
        repo.add_template(".prettierignore", "vendor/\n").expect("template");
        let selection = Selection::new(["prettier"]).expect("selection");
        let dir = repo.template_dir();

        let reports =
            materialize(&selection, TemplateSource::Dir(&dir), &repo.target()).expect("copy");

        assert_eq!(
            status_of(&reports, ".prettierrc.js"),
            Some(&CopyStatus::Copied)
        );
        assert_eq!(
            repo.read(".prettierrc.js").expect("read"),
            "module.exports = {};\n"
        );
        assert_eq!(repo.read(".prettierignore").expect("read"), "vendor/\n");
        assert!(!repo.root().join("prettierrc.js").exists());
    }

    #[test]
    fn missing_templates_are_skipped_without_error() {
        let repo = TestRepo::new().expect("repo");
        let selection = Selection::new(["stylelint"]).expect("selection");
        let dir = repo.template_dir();

        let reports =
            materialize(&selection, TemplateSource::Dir(&dir), &repo.target()).expect("copy");

        assert!(!reports.is_empty());
        assert!(
            reports
                .iter()
                .all(|r| r.status == CopyStatus::MissingSource)
        );
        assert!(!repo.root().join(".stylelint.config.js").exists());
    }

    #[test]
    fn missing_template_directory_fails_before_writing() {
        let repo = TestRepo::new().expect("repo");
        let gone = repo.template_dir().join("removed");

        let err = materialize(
            &Selection::new(["eslint"]).expect("selection"),
            TemplateSource::Dir(&gone),
            &repo.target(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("does not exist"), "{err}");
        assert!(!repo.root().join(".lintstagedrc.js").exists());
    }

    #[test]
    fn bundled_templates_need_no_directory() {
        let repo = TestRepo::new().expect("repo");
        let selection = Selection::new(["eslint", "secretlint"]).expect("selection");

        let reports =
            materialize(&selection, TemplateSource::Bundled, &repo.target()).expect("copy");

        assert_eq!(copied(&reports).count(), reports.len());
        assert_eq!(reports.len(), 7);
        assert_eq!(
            repo.read(".eslint.config.js").expect("read"),
            bundled_template("eslint.config.js").expect("bundled")
        );
        assert!(repo.root().join(".validate-branch-namerc.js").is_file());
    }

    #[test]
    fn overwrites_existing_destination() {
        let repo = TestRepo::new().expect("repo");
        repo.add_template(".lintstagedrc.js", "new\n").expect("template");
        std::fs::write(repo.root().join(".lintstagedrc.js"), "old\n").expect("seed");
        let selection = Selection::new(["twigcs"]).expect("selection");
        let dir = repo.template_dir();

        let reports =
            materialize(&selection, TemplateSource::Dir(&dir), &repo.target()).expect("copy");

        assert_eq!(
            status_of(&reports, ".lintstagedrc.js"),
            Some(&CopyStatus::Copied)
        );
        assert_eq!(repo.read(".lintstagedrc.js").expect("read"), "new\n");
    }

    #[test]
    fn extras_copy_even_for_composer_only_selection() {
        let repo = TestRepo::new().expect("repo");
        repo.add_template("validate-branch-namerc.js", "x\n")
            .expect("template");
        let selection = Selection::new(["phpcs"]).expect("selection");
        let dir = repo.template_dir();

        let reports =
            materialize(&selection, TemplateSource::Dir(&dir), &repo.target()).expect("copy");

        assert!(reports.iter().all(|r| r.operation.origin == CopyOrigin::Extra));
        assert_eq!(repo.read(".validate-branch-namerc.js").expect("read"), "x\n");
    }

    #[test]
    fn rejected_operation_writes_nothing() {
        let repo = TestRepo::new().expect("repo");
        let dir = repo.template_dir();
        std::fs::write(dir.join("../outside.js"), "secret\n").expect("seed");
        let op = CopyOperation {
            origin: CopyOrigin::Extra,
            template: "../outside.js",
            destination: repo.root().join("leaked.js"),
        };

        let status = apply(&op, TemplateSource::Dir(&dir), repo.root()).expect("apply");

        assert_eq!(status, CopyStatus::Rejected);
        assert!(!repo.root().join("leaked.js").exists());
    }

    #[test]
    fn bundled_destination_outside_repo_is_rejected() {
        let repo = TestRepo::new().expect("repo");
        let op = CopyOperation {
            origin: CopyOrigin::Extra,
            template: ".lintstagedrc.js",
            destination: repo.root().join("../escaped.js"),
        };

        let status = apply(&op, TemplateSource::Bundled, repo.root()).expect("apply");

        assert_eq!(status, CopyStatus::Rejected);
        assert!(!repo.root().join("../escaped.js").exists());
    }
}
