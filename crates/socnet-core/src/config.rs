//! Configuration for socnet hosts.
//!
//! Provides the [`SocnetConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit config path argument
//! 2. `SOCNET_CONFIG` environment variable
//! 3. XDG default: `~/.config/socnet/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::traits::ConfigProvider;
use crate::{Error, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SOCNET_CONFIG";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for socnet hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocnetConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Flat graph file configuration.
    pub graph: GraphFileConfig,
}

/// Flat graph file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFileConfig {
    /// Path of the graph file. Relative paths resolve against the
    /// working directory.
    pub path: String,

    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: char,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for SocnetConfig {
    fn default() -> Self {
        Self {
            project_name: "socnet".to_string(),
            graph: GraphFileConfig::default(),
        }
    }
}

impl Default for GraphFileConfig {
    fn default() -> Self {
        Self {
            path: "graph.csv".to_string(),
            delimiter: ',',
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl SocnetConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is ignored and the remaining
    /// sources are used.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("SOCNET");
        env_opts.add_section("graph");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file path from explicit argument, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(explicit, std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// Resolution logic of [`resolve_config_path`](Self::resolve_config_path)
    /// with the environment value supplied by the caller.
    pub fn resolve_config_path_with(
        explicit: Option<&str>,
        env_value: Option<String>,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Some(path) = env_value {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("socnet").join("config.toml"))
    }

    /// Check values that serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if !self.graph.delimiter.is_ascii() {
            return Err(Error::config(format!(
                "graph.delimiter must be a single ASCII character, got {:?}",
                self.graph.delimiter
            )));
        }
        if self.graph.path.trim().is_empty() {
            return Err(Error::config("graph.path must not be empty"));
        }
        Ok(())
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for SocnetConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn graph_path(&self) -> Result<PathBuf> {
        let path = PathBuf::from(&self.graph.path);
        if path.is_absolute() {
            return Ok(path);
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .map_err(|e| Error::config(format!("Could not determine working directory: {e}")))
    }

    /// The configured delimiter as a byte.
    ///
    /// A non-ASCII delimiter (only possible on a config that skipped
    /// [`validate`](SocnetConfig::validate)) falls back to `,` with a warning.
    fn delimiter(&self) -> u8 {
        match self.graph.delimiter {
            c if c.is_ascii() => c as u8,
            other => {
                log::warn!("graph.delimiter {other:?} is not ASCII; using ','");
                b','
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
