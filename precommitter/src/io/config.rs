//! Tool configuration read from `precommitter.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::types::Ecosystem;
use crate::io::materialize::TemplateSource;

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "precommitter.toml";

/// Tool configuration (TOML).
///
/// Every field is optional in the file; missing fields take the defaults that
/// reproduce the stock npm/composer/husky setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    /// Directory holding config/ignore templates, replacing the set built
    /// into the binary. Relative paths resolve against the directory
    /// containing the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Keep at most this many bytes of each child stream in memory.
    pub output_limit_bytes: usize,

    pub npm: EcosystemCommands,
    pub composer: EcosystemCommands,
    pub hooks: HooksConfig,
}

/// Commands used to install one ecosystem's dependencies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EcosystemCommands {
    /// Commands run before the install, each as an argv.
    pub prepare: Vec<Vec<String>>,
    /// Install argv; the dependency list is appended.
    pub install: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HooksConfig {
    /// Hook manager directory, relative to the repository root.
    pub dir: PathBuf,
    /// Hook manager initialization argv.
    pub init: Vec<String>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".husky"),
            init: argv(&["npx", "husky", "init"]),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            output_limit_bytes: 100_000,
            npm: EcosystemCommands {
                prepare: Vec::new(),
                install: argv(&["npm", "install", "--save-dev"]),
            },
            composer: EcosystemCommands {
                prepare: vec![argv(&[
                    "composer",
                    "config",
                    "allow-plugins.dealerdirect/phpcodesniffer-composer-installer",
                    "true",
                ])],
                install: argv(&["composer", "require", "--dev", "--no-interaction"]),
            },
            hooks: HooksConfig::default(),
        }
    }
}

impl ToolConfig {
    pub fn commands_for(&self, ecosystem: Ecosystem) -> &EcosystemCommands {
        match ecosystem {
            Ecosystem::Npm => &self.npm,
            Ecosystem::Composer => &self.composer,
        }
    }

    /// Where templates are read from for this run.
    pub fn templates(&self) -> TemplateSource<'_> {
        match &self.template_dir {
            Some(dir) => TemplateSource::Dir(dir),
            None => TemplateSource::Bundled,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.template_dir
            && !dir.is_dir()
        {
            return Err(anyhow!(
                "template_dir {} is not a directory",
                dir.display()
            ));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        for ecosystem in Ecosystem::ALL {
            let commands = self.commands_for(ecosystem);
            if !is_valid_argv(&commands.install) {
                return Err(anyhow!("{ecosystem}.install must be a non-empty array"));
            }
            if commands.prepare.iter().any(|cmd| !is_valid_argv(cmd)) {
                return Err(anyhow!(
                    "{ecosystem}.prepare entries must be non-empty arrays"
                ));
            }
        }
        if !is_valid_argv(&self.hooks.init) {
            return Err(anyhow!("hooks.init must be a non-empty array"));
        }
        if self.hooks.dir.as_os_str().is_empty() || self.hooks.dir.is_absolute() {
            return Err(anyhow!("hooks.dir must be a relative path"));
        }
        if self
            .hooks
            .dir
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(anyhow!("hooks.dir must stay inside the repository"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ToolConfig::default()`.
pub fn load_config(path: &Path) -> Result<ToolConfig> {
    if !path.exists() {
        let cfg = ToolConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg: ToolConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    if let Some(dir) = cfg.template_dir.as_mut()
        && dir.is_relative()
        && let Some(base) = path.parent()
    {
        *dir = base.join(&*dir);
    }
    cfg.validate()?;
    Ok(cfg)
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

fn is_valid_argv(cmd: &[String]) -> bool {
    cmd.first().is_some_and(|program| !program.trim().is_empty())
}
