// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Validate command - check a form field the way the app does

use crate::format::{format_phone, format_plate};
use crate::validation::{is_valid_email, is_valid_phone, is_valid_plate};
use anyhow::Result;
use clap::ValueEnum;

/// Field kinds that can be validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    /// E-mail address
    Email,
    /// Brazilian mobile phone
    Phone,
    /// Licence plate
    Plate,
}

/// Validate `value`; invalid input is reported as an error
pub fn run(field: Field, value: &str) -> Result<()> {
    let (valid, formatted) = match field {
        Field::Email => (is_valid_email(value), value.to_string()),
        Field::Phone => (is_valid_phone(value), format_phone(value)),
        Field::Plate => (is_valid_plate(value), format_plate(&value.replacen('-', "", 1))),
    };

    if !valid {
        anyhow::bail!("Invalid {field:?}: {value}");
    }

    println!("válido: {formatted}");
    Ok(())
}
