// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Category and unit registry for the entry form.
//!
//! This is static configuration. Entries store an owned [`Category`]
//! snapshot, so editing this table never changes history.

use crate::models::workout::{Category, Unit};

/// A quantitative attribute that can be attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDef {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub icon: &'static str,
}

/// A workout category as offered by the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub default_units: &'static [&'static str],
}

pub static UNITS: [UnitDef; 6] = [
    UnitDef {
        id: "weight",
        label: "Вес (кг)",
        kind: "number",
        icon: "fitness",
    },
    UnitDef {
        id: "sets",
        label: "Подходы",
        kind: "number",
        icon: "repeat",
    },
    UnitDef {
        id: "reps",
        label: "Повторы",
        kind: "number",
        icon: "refresh",
    },
    UnitDef {
        id: "time",
        label: "Время (мин)",
        kind: "number",
        icon: "time",
    },
    UnitDef {
        id: "distance",
        label: "Расст. (км)",
        kind: "number",
        icon: "walk",
    },
    UnitDef {
        id: "pages",
        label: "Страницы",
        kind: "number",
        icon: "document-text",
    },
];

pub static CATEGORIES: [CategoryDef; 6] = [
    CategoryDef {
        id: "power",
        label: "Силовая",
        icon: "barbell",
        color: "#FF9500",
        default_units: &["weight", "sets", "reps"],
    },
    CategoryDef {
        id: "cardio",
        label: "Кардио",
        icon: "heart",
        color: "#FF2D55",
        default_units: &["time", "distance"],
    },
    CategoryDef {
        id: "yoga",
        label: "Йога",
        icon: "body",
        color: "#5856D6",
        default_units: &["time"],
    },
    CategoryDef {
        id: "study",
        label: "Учеба",
        icon: "book",
        color: "#007AFF",
        default_units: &["time", "pages"],
    },
    CategoryDef {
        id: "meditation",
        label: "Медитация",
        icon: "leaf",
        color: "#34C759",
        default_units: &["time"],
    },
    CategoryDef {
        id: "other",
        label: "Другое",
        icon: "ellipsis-horizontal",
        color: "#8E8E93",
        default_units: &["time"],
    },
];

/// Id of the category used when nothing else applies.
pub const FALLBACK_CATEGORY_ID: &str = "other";

/// Every category, in form order.
pub fn categories() -> &'static [CategoryDef] {
    &CATEGORIES
}

/// Category preselected by the entry form.
pub fn default_category() -> &'static CategoryDef {
    &CATEGORIES[0]
}

pub fn find_category(id: &str) -> Option<&'static CategoryDef> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn find_unit(id: &str) -> Option<&'static UnitDef> {
    UNITS.iter().find(|u| u.id == id)
}

/// Blank unit for the add-parameter action.
pub fn unit_template(id: &str) -> Option<Unit> {
    find_unit(id).map(UnitDef::blank)
}

impl UnitDef {
    /// Unit with no value entered yet.
    pub fn blank(&self) -> Unit {
        Unit {
            id: self.id.to_string(),
            label: self.label.to_string(),
            kind: self.kind.to_string(),
            icon: self.icon.to_string(),
            value: String::new(),
        }
    }
}

impl CategoryDef {
    /// Owned copy embedded in an entry at creation time.
    pub fn snapshot(&self) -> Category {
        Category {
            id: self.id.to_string(),
            label: self.label.to_string(),
            icon: self.icon.to_string(),
            color: self.color.to_string(),
            default_units: self.default_units.iter().map(|u| u.to_string()).collect(),
        }
    }

    /// Blank units that seed the form when this category is picked.
    pub fn default_units(&self) -> Vec<Unit> {
        self.default_units
            .iter()
            .filter_map(|id| unit_template(id))
            .collect()
    }
}
