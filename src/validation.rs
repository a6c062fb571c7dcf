// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Input validation for e-mails, phones and plates

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PLATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}[0-9]{4}$").expect("valid regex"));

/// `local@domain.tld`, with no whitespace and a single `@`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Exactly 11 digits once everything else is stripped
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() == 11
}

/// Three uppercase letters and four digits, written `ABC-1234` or `ABC1234`
#[must_use]
pub fn is_valid_plate(plate: &str) -> bool {
    match plate.chars().count() {
        8 => PLATE_RE.is_match(&plate.replacen('-', "", 1)),
        7 => PLATE_RE.is_match(plate),
        _ => false,
    }
}
