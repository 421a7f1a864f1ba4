//! Tree expansion state.
//!
//! Tracks which directories are expanded. Children are never stored here;
//! they live in the [`SnapshotCache`] under the directory's own path, so a
//! collapsed node keeps its children cached for the next expand.

use std::collections::BTreeMap;

use crate::entry::{Entry, is_within};
use crate::platform::Platform;
use crate::snapshot::{FetchMode, FetchTicket, SnapshotCache};

/// Result of [`TreeState::toggle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Now expanded; carries the fetch to issue when children were missing.
    Expanded(Option<FetchTicket>),
    Collapsed,
    /// Not a directory, or an opaque bundle.
    Ignored,
}

/// Persisted expansion map (path -> expanded).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeState {
    expanded: BTreeMap<String, bool>,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from the persisted map. `false` entries are dropped.
    pub fn from_map(map: BTreeMap<String, bool>) -> Self {
        Self {
            expanded: map.into_iter().filter(|(_, v)| *v).collect(),
        }
    }

    /// Add expanded paths from a persisted map loaded after the user already
    /// started expanding.
    pub fn merge(&mut self, map: BTreeMap<String, bool>) {
        for (path, expanded) in map {
            if expanded {
                self.expanded.entry(path).or_insert(true);
            }
        }
    }

    /// Map to persist.
    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.expanded.clone()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.get(path).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Flip the expansion of `entry`.
    pub fn toggle(
        &mut self,
        entry: &Entry,
        platform: Platform,
        cache: &mut SnapshotCache,
    ) -> Toggle {
        if !entry.is_expandable(platform) {
            return Toggle::Ignored;
        }
        if self.is_expanded(&entry.path) {
            self.collapse(&entry.path);
            Toggle::Collapsed
        } else {
            Toggle::Expanded(self.expand(entry, platform, cache).flatten())
        }
    }

    /// Expand `entry`, fetching its children only when nothing usable is
    /// cached and no fetch is pending.
    ///
    /// Returns `None` when the entry cannot be expanded.
    pub fn expand(
        &mut self,
        entry: &Entry,
        platform: Platform,
        cache: &mut SnapshotCache,
    ) -> Option<Option<FetchTicket>> {
        if !entry.is_expandable(platform) {
            return None;
        }
        self.expanded.insert(entry.path.clone(), true);
        Some(cache.begin(&entry.path, FetchMode::IfMissing))
    }

    /// Collapse `path`. Returns whether it was expanded.
    pub fn collapse(&mut self, path: &str) -> bool {
        self.expanded.remove(path).is_some()
    }

    /// Forget `path` and everything below it (after a delete or rename).
    pub fn forget_subtree(&mut self, path: &str) -> bool {
        let before = self.expanded.len();
        self.expanded.retain(|p, _| !is_within(p, path));
        before != self.expanded.len()
    }

    /// Expanded directories currently reachable from `top`, depth-first.
    ///
    /// Walks the cached children of each expanded directory; a directory
    /// whose children are not loaded yet is listed but not descended into.
    pub fn visible_expanded(
        &self,
        top: &[Entry],
        cache: &SnapshotCache,
        platform: Platform,
    ) -> Vec<String> {
        let mut found = Vec::new();
        self.walk(top, cache, platform, &mut found);
        found
    }

    fn walk(
        &self,
        entries: &[Entry],
        cache: &SnapshotCache,
        platform: Platform,
        found: &mut Vec<String>,
    ) {
        for entry in entries {
            if !entry.is_expandable(platform) || !self.is_expanded(&entry.path) {
                continue;
            }
            found.push(entry.path.clone());
            if let Some(children) = cache.entries(&entry.path) {
                self.walk(children, cache, platform, found);
            }
        }
    }

    /// Begin fetches for every expanded directory reachable from `top`.
    pub fn propagate(
        &self,
        top: &[Entry],
        cache: &mut SnapshotCache,
        platform: Platform,
        mode: FetchMode,
    ) -> Vec<FetchTicket> {
        self.visible_expanded(top, cache, platform)
            .into_iter()
            .filter_map(|path| cache.begin(&path, mode))
            .collect()
    }
}
