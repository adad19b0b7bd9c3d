//! Project configuration read from `.claude/devhub.toml`.
//!
//! Every key is optional. A missing file yields the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DevhubError, Result};

pub const CONFIG_FILE: &str = ".claude/devhub.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub hook: HookConfig,
    pub hub: HubConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HookConfig {
    /// Lowercase extensions, without the dot
    pub extensions: Vec<String>,
    /// Formatter binary relative to the project root
    pub local_formatter: String,
    /// Program and leading args used when the local binary is absent
    pub fallback_formatter: Vec<String>,
    pub formatter_args: Vec<String>,
}

impl Default for HookConfig {
    fn default() -> Self {
        HookConfig {
            extensions: ["js", "jsx", "ts", "tsx", "json", "css", "md"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            local_formatter: "node_modules/.bin/prettier".to_string(),
            fallback_formatter: vec!["npx".to_string(), "prettier".to_string()],
            formatter_args: vec!["--write".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HubConfig {
    /// Hub file relative to the project root
    pub path: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        HubConfig {
            path: ".claude/context-hub.md".to_string(),
        }
    }
}

impl Config {
    /// Load the config for a project root, falling back to defaults when the file is absent
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&raw).map_err(|source| DevhubError::Config { path, source })
    }

    pub fn hub_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.hub.path)
    }
}
