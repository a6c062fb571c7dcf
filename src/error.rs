// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading data or configuration
#[derive(Debug, Error)]
pub enum OficinaError {
    /// A file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The dataset JSON is malformed
    #[error("failed to parse dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    /// The config TOML is malformed
    #[error("failed to parse config {path}: {source}")]
    Config {
        /// Offending file
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A lookup by identifier found nothing
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "shop"
        kind: &'static str,
        /// Requested identifier
        id: String,
    },
}

/// Result alias for library operations that can fail
pub type Result<T> = std::result::Result<T, OficinaError>;
