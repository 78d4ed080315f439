// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar index derived from a workout log.
//!
//! Nothing here is stored: the index is recomputed from `list_entries`
//! whenever the calendar is shown.

use crate::models::WorkoutEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Marker for a day that has at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct DayMarker {
    pub marked: bool,
    #[serde(rename = "dotColor")]
    pub dot_color: String,
}

/// Which entry's category color marks a day with several entries.
///
/// Entries are visited in log order (newest first), so `LastEntry` picks
/// the oldest entry of that day and `FirstEntry` the newest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DotColorRule {
    #[default]
    LastEntry,
    FirstEntry,
}

impl FromStr for DotColorRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last" => Ok(DotColorRule::LastEntry),
            "first" => Ok(DotColorRule::FirstEntry),
            other => Err(format!("unknown dot color rule '{}'", other)),
        }
    }
}

/// Normalize a stored display date to an ISO `YYYY-MM-DD` key.
///
/// Accepts `DD.MM.YYYY`, `DD/MM/YYYY` and `YYYY-MM-DD`, with one- or
/// two-digit day and month. Anything else is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();

    let parts = ['.', '/']
        .into_iter()
        .find_map(|sep| split_three(trimmed, sep).map(|(d, m, y)| (y, m, d)))
        .or_else(|| split_three(trimmed, '-'));

    match parts {
        Some((year, month, day))
            if is_year(year) && is_day_or_month(month) && is_day_or_month(day) =>
        {
            format!("{}-{:0>2}-{:0>2}", year, month, day)
        }
        _ => raw.to_string(),
    }
}

fn split_three(s: &str, sep: char) -> Option<(&str, &str, &str)> {
    let mut it = s.split(sep);
    let parts = (it.next()?, it.next()?, it.next()?);
    it.next().is_none().then_some(parts)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && is_digits(s)
}

fn is_day_or_month(s: &str) -> bool {
    s.len() <= 2 && is_digits(s)
}

/// One marker per distinct date, colored per `rule`.
pub fn build_day_index(
    entries: &[WorkoutEntry],
    rule: DotColorRule,
) -> BTreeMap<String, DayMarker> {
    let mut index = BTreeMap::new();

    for entry in entries {
        let key = normalize_date(&entry.date);
        if rule == DotColorRule::FirstEntry && index.contains_key(&key) {
            continue;
        }
        index.insert(
            key,
            DayMarker {
                marked: true,
                dot_color: entry.category.color.clone(),
            },
        );
    }

    index
}

/// Entries whose date normalizes to `iso_date`, in log order.
pub fn entries_for_date<'a>(
    entries: &'a [WorkoutEntry],
    iso_date: &str,
) -> Vec<&'a WorkoutEntry> {
    entries
        .iter()
        .filter(|e| normalize_date(&e.date) == iso_date)
        .collect()
}

/// Entries grouped by ISO date, each group in log order.
pub fn group_by_date(entries: &[WorkoutEntry]) -> BTreeMap<String, Vec<&WorkoutEntry>> {
    let mut groups: BTreeMap<String, Vec<&WorkoutEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(normalize_date(&entry.date)).or_default().push(entry);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category;

    fn entry(id: &str, date: &str, category_id: &str) -> WorkoutEntry {
        WorkoutEntry {
            id: id.to_string(),
            name: format!("Entry {}", id),
            date: date.to_string(),
            category: category::find_category(category_id).unwrap().snapshot(),
            units: vec![],
        }
    }

    #[test]
    fn test_normalize_dotted_date() {
        assert_eq!(normalize_date("05.03.2024"), "2024-03-05");
        assert_eq!(normalize_date("5.3.2024"), "2024-03-05");
    }

    #[test]
    fn test_normalize_slashed_date() {
        assert_eq!(normalize_date("05/03/2024"), "2024-03-05");
        assert_eq!(normalize_date("15/11/2023"), "2023-11-15");
    }

    #[test]
    fn test_normalize_iso_is_idempotent() {
        assert_eq!(normalize_date("2024-03-05"), "2024-03-05");
        assert_eq!(normalize_date(&normalize_date("05.03.2024")), "2024-03-05");
        assert_eq!(normalize_date("2024-3-5"), "2024-03-05");
    }

    #[test]
    fn test_normalize_unknown_format_unchanged() {
        assert_eq!(normalize_date("March 5, 2024"), "March 5, 2024");
        assert_eq!(normalize_date("3/5/24"), "3/5/24");
        assert_eq!(normalize_date("05.03.2024.1"), "05.03.2024.1");
        assert_eq!(normalize_date("ab.cd.efgh"), "ab.cd.efgh");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_day_index_one_marker_per_date() {
        let entries = vec![
            entry("3", "06.03.2024", "cardio"),
            entry("2", "05.03.2024", "yoga"),
            entry("1", "5.3.2024", "power"),
        ];

        let index = build_day_index(&entries, DotColorRule::LastEntry);
        assert_eq!(index.len(), 2);
        assert_eq!(index["2024-03-06"].dot_color, "#FF2D55");
        assert!(index["2024-03-05"].marked);
    }

    #[test]
    fn test_day_index_tie_break_rules() {
        let entries = vec![
            entry("2", "05.03.2024", "yoga"),
            entry("1", "05.03.2024", "power"),
        ];

        let last = build_day_index(&entries, DotColorRule::LastEntry);
        assert_eq!(last["2024-03-05"].dot_color, "#FF9500");

        let first = build_day_index(&entries, DotColorRule::FirstEntry);
        assert_eq!(first["2024-03-05"].dot_color, "#5856D6");
    }

    #[test]
    fn test_day_marker_json() {
        let json = serde_json::to_string(&DayMarker {
            marked: true,
            dot_color: "#34C759".to_string(),
        })
        .unwrap();
        assert_eq!(json, r##"{"marked":true,"dotColor":"#34C759"}"##);
    }

    #[test]
    fn test_entries_for_date_matches_mixed_formats() {
        let entries = vec![
            entry("3", "2024-03-05", "study"),
            entry("2", "06.03.2024", "yoga"),
            entry("1", "5/3/2024", "power"),
        ];

        let ids: Vec<&str> = entries_for_date(&entries, "2024-03-05")
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert!(entries_for_date(&entries, "2024-03-07").is_empty());
    }

    #[test]
    fn test_group_by_date() {
        let entries = vec![
            entry("3", "06.03.2024", "cardio"),
            entry("2", "05.03.2024", "yoga"),
            entry("1", "05.03.2024", "power"),
        ];

        let groups = group_by_date(&entries);
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["2024-03-05", "2024-03-06"]);
        assert_eq!(groups["2024-03-05"].len(), 2);
        assert_eq!(groups["2024-03-05"][0].id, "2");
    }

    #[test]
    fn test_dot_color_rule_from_str() {
        assert_eq!("last".parse::<DotColorRule>(), Ok(DotColorRule::LastEntry));
        assert_eq!("first".parse::<DotColorRule>(), Ok(DotColorRule::FirstEntry));
        assert!("middle".parse::<DotColorRule>().is_err());
    }
}
