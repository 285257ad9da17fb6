//! Lexical path resolution and containment checks.
//!
//! Nothing here touches the filesystem: templates may be absent and symlinks
//! are not followed, so normalization is purely component-based.

use std::path::{Component, Path, PathBuf};

/// Resolve `input` against `cwd` and normalize the result.
///
/// Absolute inputs ignore `cwd`. Never fails.
pub fn resolve(cwd: &Path, input: impl AsRef<Path>) -> PathBuf {
    normalize(&cwd.join(input.as_ref()))
}

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// `..` never climbs above the root; leading `..` of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// True if `path` equals or descends from `root` after normalization.
///
/// Comparison is per component, so `templates-extra` is not inside `templates`.
pub fn is_within(root: &Path, path: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}

/// Containment check applied before every template copy.
///
/// The source must stay inside the template directory and the destination
/// inside the repository root.
pub fn guard_copy(source_root: &Path, source: &Path, dest_root: &Path, dest: &Path) -> bool {
    is_within(source_root, source) && is_within(dest_root, dest)
}

/// Destination name for a config template: hidden-prefixed unless it already is.
pub fn config_destination_name(template: &str) -> String {
    if template.starts_with('.') {
        template.to_string()
    } else {
        format!(".{template}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_relative_input() {
        let cwd = Path::new("/work/projects");
        assert_eq!(resolve(cwd, "site"), PathBuf::from("/work/projects/site"));
        assert_eq!(resolve(cwd, "./site/."), PathBuf::from("/work/projects/site"));
        assert_eq!(resolve(cwd, "../other"), PathBuf::from("/work/other"));
    }

    #[test]
    fn resolve_keeps_absolute_input() {
        let cwd = Path::new("/work/projects");
        assert_eq!(resolve(cwd, "/srv/site/"), PathBuf::from("/srv/site"));
    }

    #[test]
    fn normalize_does_not_climb_above_root() {
        assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
    }

    #[test]
    fn relative_escape_is_not_within_relative_root() {
        assert!(!is_within(Path::new("templates"), Path::new("../templates/x.js")));
        assert!(is_within(Path::new("templates"), Path::new("templates/x.js")));
    }

    #[test]
    fn guard_accepts_literal_descendants() {
        let templates = Path::new("/opt/tool/templates");
        let repo = Path::new("/srv/site");
        for name in ["prettierrc.js", ".secretlintignore", "nested/file.json", "./a.js"] {
            assert!(
                guard_copy(
                    templates,
                    &templates.join(name),
                    repo,
                    &repo.join(".prettierrc.js")
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn guard_rejects_traversal_out_of_template_root() {
        let templates = Path::new("/opt/tool/templates");
        let repo = Path::new("/srv/site");
        let dest = repo.join(".eslintrc");
        for name in [
            "../secret.txt",
            "../../etc/passwd",
            "nested/../../escape.js",
            "/etc/passwd",
            "../templates-evil/x.js",
        ] {
            assert!(
                !guard_copy(templates, &templates.join(name), repo, &dest),
                "{name}"
            );
        }
    }

    #[test]
    fn guard_rejects_destination_outside_repo() {
        let templates = Path::new("/opt/tool/templates");
        let repo = Path::new("/srv/site");
        let source = templates.join("prettierrc.js");
        assert!(!guard_copy(templates, &source, repo, &repo.join("../x.js")));
        assert!(!guard_copy(templates, &source, repo, Path::new("/tmp/x.js")));
    }

    #[test]
    fn guard_accepts_root_itself() {
        let templates = Path::new("/opt/tool/templates");
        assert!(is_within(templates, templates));
        assert!(is_within(templates, Path::new("/opt/tool/templates/")));
    }

    #[test]
    fn config_names_get_hidden_prefix_once() {
        assert_eq!(config_destination_name("prettierrc.js"), ".prettierrc.js");
        assert_eq!(config_destination_name("eslint.config.js"), ".eslint.config.js");
        assert_eq!(config_destination_name(".stylelintrc"), ".stylelintrc");
    }
}
