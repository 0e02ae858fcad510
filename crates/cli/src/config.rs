// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local configuration in `<config dir>/config.toml`.
//!
//! ```toml
//! api_url = "https://sessync.dev"
//! token = "..."
//! machine_id = "6f1c..."
//! encryption_enabled = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{env, fsio};

/// Default remote service
pub const DEFAULT_API_URL: &str = "https://sessync.dev";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory; set SESSYNC_CONFIG_DIR")]
    HomeNotFound,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Files under the sessync config directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `SESSYNC_CONFIG_DIR`, else `~/.sessync`.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Some(dir) = env::config_dir() {
            return Ok(Self::new(dir));
        }
        env::home()
            .map(|home| Self::new(home.join(".sessync")))
            .ok_or(ConfigError::HomeNotFound)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn key_path(&self) -> PathBuf {
        self.root.join("encryption.key")
    }

    pub fn hook_log_path(&self) -> PathBuf {
        self.root.join("hooks.log")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote service base URL; [`DEFAULT_API_URL`] when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Bearer token from the device login flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Stable identifier for this machine, assigned on first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,

    #[serde(default)]
    pub encryption_enabled: bool,
}

impl Config {
    /// Load from `path`; a missing file is the default configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to `path` with owner-only permissions, assigning a machine id if
    /// there is none yet.
    pub fn save(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.machine_id();
        let content = toml::to_string_pretty(self)?;
        fsio::write_private(path, content.as_bytes()).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Effective API URL: `SESSYNC_API_URL`, then the config file, then the default.
    pub fn api_url(&self) -> String {
        env::api_url()
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// The machine id, generating one on first use.
    pub fn machine_id(&mut self) -> String {
        self.machine_id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
