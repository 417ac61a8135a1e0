//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dsb/dsb.toml`
//! 3. Local config: `<dir>/.dsb.toml`
//! 4. Environment variables: `DSB_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_PURPOSE;
use crate::util::path::expand_env_vars;

const APP_NAME: &str = "dsb";
const LOCAL_CONFIG_FILE: &str = ".dsb.toml";
const ENV_PREFIX: &str = "DSB";

/// Remote API (PER) settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PerSettings {
    /// Locator of the first objective index page
    pub index_locator: String,
}

impl Default for PerSettings {
    fn default() -> Self {
        Self {
            index_locator: "objectifs".into(),
        }
    }
}

/// Raw PER config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPerSettings {
    pub index_locator: Option<String>,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub fallback_languages: Option<Vec<String>>,
    pub definitions_dir: Option<PathBuf>,
    pub default_purpose: Option<String>,
    pub per: RawPerSettings,
}

/// Unified configuration for dsb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Language order for resolving localized names
    pub fallback_languages: Vec<String>,
    /// Directory holding curriculum definition payloads (default: ~/.dsb/curricula)
    pub definitions_dir: PathBuf,
    /// Purpose used for taxonomy path reconstruction
    pub default_purpose: String,
    pub per: PerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fallback_languages: ["de", "fr", "it", "rm", "en"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            definitions_dir: default_definitions_dir(),
            default_purpose: DEFAULT_PURPOSE.into(),
            per: PerSettings::default(),
        }
    }
}

fn default_definitions_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".dsb").join("curricula"))
        .unwrap_or_else(|| PathBuf::from("~/.dsb/curricula"))
}

/// Get the XDG config directory for dsb.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{APP_NAME}.toml")))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.definitions_dir.to_string_lossy().as_ref());
        self.definitions_dir = PathBuf::from(expanded);
    }

    /// Overlay wins for every field it specifies; lists are replaced.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            fallback_languages: overlay
                .fallback_languages
                .clone()
                .unwrap_or_else(|| self.fallback_languages.clone()),
            definitions_dir: overlay
                .definitions_dir
                .clone()
                .unwrap_or_else(|| self.definitions_dir.clone()),
            default_purpose: overlay
                .default_purpose
                .clone()
                .unwrap_or_else(|| self.default_purpose.clone()),
            per: PerSettings {
                index_locator: overlay
                    .per
                    .index_locator
                    .clone()
                    .unwrap_or_else(|| self.per.index_locator.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `dir` - Optional directory holding a local `.dsb.toml`
    pub fn load(dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply DSB_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("fallback_languages")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("fallback_languages") {
            settings.fallback_languages = val;
        }
        if let Ok(val) = config.get_string("definitions_dir") {
            settings.definitions_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("default_purpose") {
            settings.default_purpose = val;
        }
        if let Ok(val) = config.get_string("per.index_locator") {
            settings.per.index_locator = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dsb configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dsb/dsb.toml
#   Local:  <dir>/.dsb.toml
#   Env:    DSB_* environment variables (DSB_PER__INDEX_LOCATOR, ...)
#
# Lists replace the inherited value.

# Language order for localized names
# fallback_languages = ["de", "fr", "it", "rm", "en"]

# Directory with curriculum definition payloads
# definitions_dir = "~/.dsb/curricula"

# Purpose used when rebuilding trees from taxonomy paths
# default_purpose = "discipline"

[per]
# First page of the objective index, relative to definitions_dir
# index_locator = "objectifs"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
