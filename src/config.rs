//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/selectree/selectree.toml`
//! 3. Local config: `<dir>/.selectree.toml`
//! 4. Environment variables: `SELECTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::counter::DEFAULT_COUNTER_PATTERN;
use crate::application::ApplicationError;
use crate::domain::DEFAULT_DATA_PREFIX;

/// Unified configuration for selectree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// `data-bind` value and `data-<prefix>-*` attribute prefix (default: select-tree)
    pub data_prefix: String,
    /// Regex locating the number inside a counter's text (default: `-?\d+`)
    pub counter_pattern: String,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_prefix: DEFAULT_DATA_PREFIX.to_string(),
            counter_pattern: DEFAULT_COUNTER_PATTERN.to_string(),
            color: true,
        }
    }
}

/// Get the XDG config directory for selectree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "selectree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("selectree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".selectree.toml")
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.selectree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        let local = local_dir
            .map(local_config_path)
            .filter(|path| path.exists());
        Self::load_from(global.as_deref(), local.as_deref(), true)
    }

    /// Load from explicit files; `with_env` controls the `SELECTREE_*` layer.
    pub fn load_from(
        global: Option<&Path>,
        local: Option<&Path>,
        with_env: bool,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("data_prefix", defaults.data_prefix)
            .map_err(config_err)?
            .set_default("counter_pattern", defaults.counter_pattern)
            .map_err(config_err)?
            .set_default("color", defaults.color)
            .map_err(config_err)?;

        for path in [global, local].into_iter().flatten() {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        if with_env {
            builder = builder.add_source(Environment::with_prefix("SELECTREE").separator("__"));
        }

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.data_prefix.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "data_prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# selectree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/selectree/selectree.toml
#   Local:  <dir>/.selectree.toml
#   Env:    SELECTREE_* environment variables

# Value of data-bind and prefix of the data-<prefix>-* attributes
# data_prefix = "select-tree"

# Regex for the number inside a counter's text
# counter_pattern = '-?\d+'

# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
