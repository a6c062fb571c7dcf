// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod appointments;
pub mod communities;
pub mod completions;
pub mod groups;
pub mod profile;
pub mod referral;
pub mod shops;
pub mod validate;

use crate::config::Config;
use crate::provider::DataProvider;
use crate::types::AppointmentStatus;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Everything a command needs: configuration, data and output options
pub struct Session {
    /// Loaded configuration
    pub config: Config,
    /// Dataset the command reads
    pub provider: DataProvider,
    /// Emit JSON instead of text
    pub json: bool,
    /// Terminal styling
    pub style: Style,
}

impl Session {
    /// Open a session, loading the dataset named by `dataset` or the config
    pub fn open(config: Config, dataset: Option<PathBuf>, json: bool, color: bool) -> Result<Self> {
        let provider = match dataset.or_else(|| config.dataset.clone()) {
            Some(path) => {
                debug!(path = %path.display(), "Loading dataset");
                DataProvider::load(&path)
                    .with_context(|| format!("Failed to load dataset from {}", path.display()))?
            }
            None => DataProvider::builtin().context("Failed to load bundled dataset")?,
        };
        Ok(Self {
            config,
            provider,
            json,
            style: Style { color },
        })
    }

    /// The user a command acts as
    #[must_use]
    pub fn user(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.config.user_id.clone())
    }
}

/// Print a value as pretty JSON on stdout
pub fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Optional ANSI styling for text output
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Headline text
    #[must_use]
    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Prices and discounts
    #[must_use]
    pub fn money(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Secondary detail
    #[must_use]
    pub fn muted(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Appointment status badge
    #[must_use]
    pub fn status(&self, status: AppointmentStatus) -> String {
        let badge = format!("{} {}", status.marker(), status.label());
        if !self.color {
            return badge;
        }
        match status {
            AppointmentStatus::Pending => badge.yellow().to_string(),
            AppointmentStatus::Confirmed | AppointmentStatus::Completed => badge.green().to_string(),
            AppointmentStatus::InProgress => badge.blue().to_string(),
            AppointmentStatus::Cancelled => badge.red().to_string(),
        }
    }
}
