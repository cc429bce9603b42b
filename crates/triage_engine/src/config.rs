//! Triage configuration.
//!
//! Configuration lives in a TOML file looked up in this order:
//! 1. explicit path from the caller
//! 2. $TRIAGE_CONFIG
//! 3. $XDG_CONFIG_HOME/triage/config.toml
//! 4. ~/.config/triage/config.toml
//!
//! A missing file means defaults. A malformed file is an error.
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [rules]
//! path = "rules.toml"   # relative to this file
//! ```

use crate::error::Result;
use crate::rules::RuleTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const CONFIG_ENV: &str = "TRIAGE_CONFIG";
const CONFIG_DIR: &str = "triage";
const CONFIG_FILE: &str = "config.toml";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Rule table source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rule table file; the built-in table is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    /// File this config was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl TriageConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a specific file. Missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the first discovered location
    pub fn load() -> Result<Self> {
        match discover_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Rule file path, resolved against the config file's directory
    pub fn rules_path(&self) -> Option<PathBuf> {
        let path = self.rules.path.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        match self.source.as_ref().and_then(|s| s.parent()) {
            Some(dir) => Some(dir.join(path)),
            None => Some(path.clone()),
        }
    }

    /// Active rule table: the configured file, else the built-in table
    pub fn rule_table(&self) -> Result<Arc<RuleTable>> {
        match self.rules_path() {
            Some(path) => Ok(Arc::new(RuleTable::load(&path)?)),
            None => Ok(RuleTable::builtin()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Config file location from the process environment
pub fn discover_path() -> Option<PathBuf> {
    discover_path_with(|key| std::env::var(key).ok())
}

/// Config file location using an arbitrary variable lookup
pub fn discover_path_with<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(path) = non_empty(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join(CONFIG_DIR).join(CONFIG_FILE));
    }

    non_empty("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    })
}
