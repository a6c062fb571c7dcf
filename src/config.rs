// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::catalog::SortKey;
use crate::error::{OficinaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON dataset replacing the bundled one
    pub dataset: Option<PathBuf>,
    /// ID of the user the CLI acts as
    pub user_id: String,
    /// Sort order used when none is given
    pub default_sort: SortKey,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            user_id: "user1".to_string(),
            default_sort: SortKey::Rating,
            log_level: "info".to_string(),
        }
    }
}

/// Per-user config file location, if the platform has one
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "oficina")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Parse configuration from TOML text
pub fn parse(content: &str, origin: &Path) -> Result<Config> {
    toml::from_str(content).map_err(|source| OficinaError::Config {
        path: origin.to_path_buf(),
        source,
    })
}

/// Load configuration from disk or use defaults
///
/// An explicit path must exist. Without one, the per-user file is read when
/// present; otherwise defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let content = fs::read_to_string(&path).map_err(|source| OficinaError::Read {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "Loaded config");
    parse(&content, &path)
}
