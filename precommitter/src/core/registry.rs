//! Closed table of supported linters and the files/packages every run adds.

use crate::core::types::{Ecosystem, ExtraFile, LinterDescriptor};

static LINTERS: [LinterDescriptor; 7] = [
    LinterDescriptor {
        key: "secretlint",
        name: "Secretlint",
        ecosystem: Ecosystem::Npm,
        dependencies: &["secretlint", "@secretlint/secretlint-rule-preset-recommend"],
        config: Some("secretlintrc.json"),
        ignore: Some(".secretlintignore"),
    },
    LinterDescriptor {
        key: "prettier",
        name: "Prettier",
        ecosystem: Ecosystem::Npm,
        dependencies: &["prettier", "prettier-eslint"],
        config: Some("prettierrc.js"),
        ignore: Some(".prettierignore"),
    },
    LinterDescriptor {
        key: "eslint",
        name: "ESLint (JavaScript/TypeScript)",
        ecosystem: Ecosystem::Npm,
        dependencies: &[
            "eslint",
            "eslint-config-airbnb-base",
            "eslint-config-airbnb",
            "eslint-config-jquery",
            "eslint-plugin-import",
            "eslint-plugin-jquery",
            "eslint-plugin-yml",
        ],
        config: Some("eslint.config.js"),
        ignore: Some(".eslintignore"),
    },
    LinterDescriptor {
        key: "stylelint",
        name: "Stylelint (CSS/SCSS/Drupal)",
        ecosystem: Ecosystem::Npm,
        dependencies: &[
            "stylelint",
            "stylelint-config-standard",
            "stylelint-config-recommended-scss",
            "stylelint-scss",
        ],
        config: Some("stylelint.config.js"),
        ignore: Some(".stylelintignore"),
    },
    LinterDescriptor {
        key: "phpcs",
        name: "PHPCS (PHP_CodeSniffer)",
        ecosystem: Ecosystem::Composer,
        dependencies: &[
            "dealerdirect/phpcodesniffer-composer-installer",
            "drupal/coder",
        ],
        config: None,
        ignore: None,
    },
    LinterDescriptor {
        key: "phpcbf",
        name: "PHPCBF (PHP Code Beautifier and Fixer)",
        ecosystem: Ecosystem::Composer,
        dependencies: &[
            "dealerdirect/phpcodesniffer-composer-installer",
            "drupal/coder",
        ],
        config: None,
        ignore: None,
    },
    LinterDescriptor {
        key: "twigcs",
        name: "Twig CS Fixer",
        ecosystem: Ecosystem::Composer,
        dependencies: &["vincentlanglet/twig-cs-fixer"],
        config: None,
        ignore: None,
    },
];

/// Tooling installed into [`Ecosystem::PRIMARY`] on every run: hook manager,
/// staged-file runner, commit-message templating and branch-name validation.
pub static EXTRA_DEPENDENCIES: [&str; 4] = [
    "husky",
    "lint-staged",
    "jira-prepare-commit-msg",
    "validate-branch-name",
];

/// Templates copied on every run, independent of the selection.
pub static EXTRA_FILES: [ExtraFile; 3] = [
    ExtraFile {
        source: ".lintstagedrc.js",
        destination: ".lintstagedrc.js",
    },
    ExtraFile {
        source: "jira-prepare-commit-msg.config.js",
        destination: "jira-prepare-commit-msg.config.js",
    },
    ExtraFile {
        source: "validate-branch-namerc.js",
        destination: ".validate-branch-namerc.js",
    },
];

/// All registered linters in presentation order.
pub fn all_linters() -> &'static [LinterDescriptor] {
    &LINTERS
}

/// Look up a linter by key.
pub fn find(key: &str) -> Option<&'static LinterDescriptor> {
    LINTERS.iter().find(|linter| linter.key == key)
}
