//! Entry ordering.
//!
//! Directories come first in every mode except date ordering, where files
//! and directories interleave by timestamp. Sorting is stable, so equal
//! sizes or dates keep the listing's order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::entry::Entry;

/// Column an entry list is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Date,
    Size,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Date => "Modified",
            Self::Size => "Size",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Per-directory sort choice. Defaults to name ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPreference {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortPreference {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Preference after the user picks `field`.
    ///
    /// Picking the active field flips the direction; another field starts
    /// ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }

    /// Compare two entries under this preference.
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        if self.field != SortField::Date {
            // directories first, independent of direction
            match (a.is_dir, b.is_dir) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
        let ordering = match self.field {
            SortField::Name => compare_names(&a.name, &b.name),
            SortField::Date => a.modified_at.cmp(&b.modified_at),
            SortField::Size => a.size_bytes.cmp(&b.size_bytes),
        };
        self.direction.apply(ordering)
    }
}

/// Locale-style name comparison.
///
/// Compares case- and accent-insensitively first (`é` sorts with `e`,
/// `B` with `b`), then falls back to the raw strings so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Return `entries` ordered by `preference`.
pub fn sort(entries: &[Entry], preference: SortPreference) -> Vec<Entry> {
    sorted_refs(entries, preference).into_iter().cloned().collect()
}

/// Borrowing variant of [`sort`], used by the render composer.
pub fn sorted_refs(entries: &[Entry], preference: SortPreference) -> Vec<&Entry> {
    let mut refs: Vec<&Entry> = entries.iter().collect();
    refs.sort_by(|a, b| preference.compare(a, b));
    refs
}
