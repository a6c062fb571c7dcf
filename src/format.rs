// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! pt-BR formatting helpers for money, phones, plates, dates and durations
//!
//! Every helper is total. Irregular input produces a best-effort string
//! rather than an error.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Render an amount as Brazilian Real: `450.99` becomes `R$ 450,99`
///
/// Cents are rounded half away from zero, so `0.125` renders as `R$ 0,13`.
/// Amounts whose binary value sits just below a tie still round down.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    format!("R$ {cents:.2}").replace('.', ",")
}

/// Characters `start..end` of `s`, clamped to its length
fn char_slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Render raw phone digits as `(DD) DDDDD-DDDD`
///
/// Non-digits are dropped first. Short input leaves trailing groups empty,
/// e.g. `"119"` becomes `"(11) 9-"`.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    format!(
        "({}) {}-{}",
        char_slice(&digits, 0, 2),
        char_slice(&digits, 2, 7),
        char_slice(&digits, 7, usize::MAX)
    )
}

/// Render a plate as its first three characters, a hyphen, then the rest
#[must_use]
pub fn format_plate(plate: &str) -> String {
    format!("{}-{}", char_slice(plate, 0, 3), char_slice(plate, 3, usize::MAX))
}

/// Render minutes as `Nmin`, `Nh` or `Nh Nmin`
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes}min");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {mins}min")
    }
}

/// Render a date as `dd/mm/yyyy`
#[must_use]
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Render a date and a `HH:mm` time as `dd/mm/yyyy às HH:mm`
#[must_use]
pub fn format_date_time(date: NaiveDate, time: &str) -> String {
    format!("{} às {time}", format_date_br(date))
}

/// Time left until `target`, seen from `now`
///
/// Past targets render as `Passou`. Otherwise whole days and leftover hours
/// render as `Nd Nh`, or just `Nh` when less than a day remains.
#[must_use]
pub fn time_remaining(target: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = target - now;
    if diff < chrono::Duration::zero() {
        return "Passou".to_string();
    }
    let days = diff.num_days();
    let hours = (diff - chrono::Duration::days(days)).num_hours();
    if days > 0 {
        format!("{days}d {hours}h")
    } else {
        format!("{hours}h")
    }
}

/// [`time_remaining`] against the local clock
#[must_use]
pub fn time_remaining_from_now(target: NaiveDateTime) -> String {
    time_remaining(target, Local::now().naive_local())
}

/// Whether `target` falls on the calendar day `today`
#[must_use]
pub fn is_same_day(target: NaiveDateTime, today: NaiveDate) -> bool {
    target.date() == today
}

/// Whether `target` falls on the calendar day after `today`
#[must_use]
pub fn is_next_day(target: NaiveDateTime, today: NaiveDate) -> bool {
    today.succ_opt() == Some(target.date())
}

/// Whether `target` is today in the local timezone
#[must_use]
pub fn is_today(target: NaiveDateTime) -> bool {
    is_same_day(target, Local::now().date_naive())
}

/// Whether `target` is tomorrow in the local timezone
#[must_use]
pub fn is_tomorrow(target: NaiveDateTime) -> bool {
    is_next_day(target, Local::now().date_naive())
}
