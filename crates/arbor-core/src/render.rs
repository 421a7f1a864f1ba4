//! Render composer: flattens the sorted tree into display rows.

use crate::entry::Entry;
use crate::platform::Platform;
use crate::snapshot::SnapshotCache;
use crate::sort::{SortPreference, sorted_refs};
use crate::tree::TreeState;

/// One rendered line of the file list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub entry: Entry,
    /// Nesting level; top-level entries are 0.
    pub depth: usize,
    pub expandable: bool,
    pub expanded: bool,
    /// Children of this (expanded) directory are being fetched.
    pub loading: bool,
    /// The last fetch of this directory's children failed.
    pub failed: bool,
    pub selected: bool,
    /// Source of a pending cut.
    pub cut: bool,
    /// Being renamed inline.
    pub editing: bool,
}

impl Row {
    pub fn path(&self) -> &str {
        &self.entry.path
    }
}

/// Inputs the composer reads. Nothing here is mutated.
pub struct Composer<'a> {
    pub cache: &'a SnapshotCache,
    pub tree: &'a TreeState,
    pub preference: SortPreference,
    pub platform: Platform,
}

impl Composer<'_> {
    /// Sort `top` and splice in the sorted children of every expanded
    /// directory, depth-first.
    pub fn compose(&self, top: &[Entry]) -> Vec<Row> {
        let mut rows = Vec::with_capacity(top.len());
        self.push_level(top, 0, &mut rows);
        rows
    }

    fn push_level(&self, entries: &[Entry], depth: usize, rows: &mut Vec<Row>) {
        for entry in sorted_refs(entries, self.preference) {
            let expandable = entry.is_expandable(self.platform);
            let expanded = expandable && self.tree.is_expanded(&entry.path);
            let snapshot = self.cache.get(&entry.path);
            rows.push(Row {
                entry: entry.clone(),
                depth,
                expandable,
                expanded,
                loading: expanded && snapshot.is_some_and(|s| s.is_loading()),
                failed: expanded && snapshot.is_some_and(|s| s.error().is_some()),
                selected: false,
                cut: false,
                editing: false,
            });
            if expanded && let Some(children) = self.cache.entries(&entry.path) {
                self.push_level(children, depth + 1, rows);
            }
        }
    }
}

/// Flat rows without tree structure (trash view).
pub fn flat_rows(entries: &[Entry], preference: SortPreference) -> Vec<Row> {
    sorted_refs(entries, preference)
        .into_iter()
        .map(|entry| Row {
            entry: entry.clone(),
            depth: 0,
            expandable: false,
            expanded: false,
            loading: false,
            failed: false,
            selected: false,
            cut: false,
            editing: false,
        })
        .collect()
}

/// Paths in render order, the index space of the selection engine.
pub fn render_order(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|row| row.entry.path.clone()).collect()
}
