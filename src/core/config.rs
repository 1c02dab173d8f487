//! Configuration management for the file manager.
//!
//! This module provides a centralized configuration structure persisted as a
//! TOML file, with environment variable overrides. On first run, when no
//! configuration file exists yet, a default one is written so the next
//! session starts from the same workspace.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Main configuration structure for the file manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace (sandbox root) configuration.
    pub workspace: WorkspaceConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Configuration for the workspace directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory all operations are confined to. Created on startup if it
    /// does not exist yet.
    pub directory: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./filebox_workspace"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, writing a default file first if
    /// none exists.
    ///
    /// Environment variables take precedence over file values:
    /// `FILEBOX_WORKSPACE` overrides the workspace directory and
    /// `FILEBOX_LOG_LEVEL` the log level. A `.env` file is honored through
    /// `dotenvy`.
    ///
    /// Loading runs before the logging subscriber exists, so this function
    /// never logs; the caller reports first-run creation to the user.
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)?;
            toml::from_str(&raw)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        } else {
            let config = Self::default();
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| Error::config(e.to_string()))?;
            fs::write(path, rendered)?;
            config
        };

        if let Ok(dir) = std::env::var("FILEBOX_WORKSPACE") {
            config.workspace.directory = PathBuf::from(dir);
        }

        if let Ok(level) = std::env::var("FILEBOX_LOG_LEVEL") {
            config.logging.level = level;
        }

        if config.workspace.directory.as_os_str().is_empty() {
            return Err(Error::config("workspace directory must not be empty"));
        }

        Ok(config)
    }
}

impl WorkspaceConfig {
    /// Create the workspace directory if absent and return its canonical
    /// path.
    pub fn prepare(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        self.directory.canonicalize()
    }
}
