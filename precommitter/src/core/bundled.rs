//! Template set compiled into the binary.
//!
//! Used whenever no `template_dir` is configured, so an installed binary
//! needs nothing from the build tree.

static BUNDLED: [(&str, &str); 11] = [
    (
        "secretlintrc.json",
        include_str!("../../templates/secretlintrc.json"),
    ),
    (
        ".secretlintignore",
        include_str!("../../templates/.secretlintignore"),
    ),
    ("prettierrc.js", include_str!("../../templates/prettierrc.js")),
    (
        ".prettierignore",
        include_str!("../../templates/.prettierignore"),
    ),
    (
        "eslint.config.js",
        include_str!("../../templates/eslint.config.js"),
    ),
    (".eslintignore", include_str!("../../templates/.eslintignore")),
    (
        "stylelint.config.js",
        include_str!("../../templates/stylelint.config.js"),
    ),
    (
        ".stylelintignore",
        include_str!("../../templates/.stylelintignore"),
    ),
    (
        ".lintstagedrc.js",
        include_str!("../../templates/.lintstagedrc.js"),
    ),
    (
        "jira-prepare-commit-msg.config.js",
        include_str!("../../templates/jira-prepare-commit-msg.config.js"),
    ),
    (
        "validate-branch-namerc.js",
        include_str!("../../templates/validate-branch-namerc.js"),
    ),
];

/// Contents of the bundled template `name`, if there is one.
pub fn bundled_template(name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(template, _)| *template == name)
        .map(|(_, contents)| *contents)
}
