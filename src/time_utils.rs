// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::fmt::Write;

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
///
/// Matches the shape of JavaScript's `Date.prototype.toJSON`, which earlier
/// releases used for `createdAt`.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render a calendar date as the stored display string.
///
/// Returns `None` if `format` does not parse or names fields a date does
/// not have (e.g. `%H`).
pub fn format_display_date(date: NaiveDate, format: &str) -> Option<String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Whether `format` can render every calendar date.
pub fn is_valid_date_format(format: &str) -> bool {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .is_some_and(|d| format_display_date(d, format).is_some())
}
