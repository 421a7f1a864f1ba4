//! Directory snapshot cache.
//!
//! Holds the last listing fetched for each directory path. Every fetch is
//! tagged with a [`FetchTicket`]; a completion is only applied when its
//! ticket is still the pending one for that path, so out-of-order responses
//! never overwrite newer data.

use std::collections::HashMap;

use crate::entry::Entry;
use crate::error::BackendError;

/// Identifies one in-flight listing request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub path: String,
    pub generation: u64,
}

/// When a fetch should actually be issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    /// Only if nothing usable is cached and nothing is in flight.
    IfMissing,
    /// Unless a fetch is already in flight.
    IfIdle,
    /// Always; supersedes any in-flight fetch.
    Always,
}

/// Cached listing for one directory.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    entries: Vec<Entry>,
    loaded: bool,
    stale: bool,
    pending: Option<u64>,
    error: Option<BackendError>,
}

impl Snapshot {
    /// Entries in listing order (unsorted).
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Error of the last completed fetch, if it failed.
    pub fn error(&self) -> Option<&BackendError> {
        self.error.as_ref()
    }
}

/// Outcome of applying a completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// New entries stored.
    Fresh,
    /// The fetch failed; the snapshot is now empty with an error.
    Failed(BackendError),
    /// A newer fetch is pending or the path was dropped; nothing changed.
    Stale,
}

/// Snapshot store keyed by directory path.
#[derive(Clone, Debug, Default)]
pub struct SnapshotCache {
    snapshots: HashMap<String, Snapshot>,
    next_generation: u64,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Snapshot> {
        self.snapshots.get(path)
    }

    /// Entries of a loaded snapshot.
    pub fn entries(&self, path: &str) -> Option<&[Entry]> {
        self.snapshots
            .get(path)
            .filter(|s| s.loaded)
            .map(|s| s.entries.as_slice())
    }

    pub fn is_loading(&self, path: &str) -> bool {
        self.snapshots.get(path).is_some_and(Snapshot::is_loading)
    }

    /// Whether a usable (loaded, not stale) snapshot exists.
    pub fn is_fresh(&self, path: &str) -> bool {
        self.snapshots
            .get(path)
            .is_some_and(|s| s.loaded && !s.stale)
    }

    /// Start a fetch for `path` if `mode` allows it.
    ///
    /// Returns the ticket to attach to the request, or `None` when no request
    /// should be sent.
    pub fn begin(&mut self, path: &str, mode: FetchMode) -> Option<FetchTicket> {
        let snapshot = self.snapshots.entry(path.to_string()).or_default();
        let issue = match mode {
            FetchMode::IfMissing => {
                snapshot.pending.is_none() && (!snapshot.loaded || snapshot.stale)
            }
            FetchMode::IfIdle => snapshot.pending.is_none(),
            FetchMode::Always => true,
        };
        if !issue {
            return None;
        }

        self.next_generation += 1;
        snapshot.pending = Some(self.next_generation);
        Some(FetchTicket {
            path: path.to_string(),
            generation: self.next_generation,
        })
    }

    /// Apply the result of the fetch identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Entry>, BackendError>,
    ) -> Applied {
        let Some(snapshot) = self.snapshots.get_mut(&ticket.path) else {
            return Applied::Stale;
        };
        if snapshot.pending != Some(ticket.generation) {
            return Applied::Stale;
        }

        snapshot.pending = None;
        snapshot.loaded = true;
        snapshot.stale = false;
        match result {
            Ok(entries) => {
                snapshot.entries = entries;
                snapshot.error = None;
                Applied::Fresh
            }
            Err(err) => {
                snapshot.entries.clear();
                snapshot.error = Some(err.clone());
                Applied::Failed(err)
            }
        }
    }

    /// Mark one snapshot as stale; it is refetched on next use.
    pub fn invalidate(&mut self, path: &str) {
        if let Some(snapshot) = self.snapshots.get_mut(path) {
            snapshot.stale = true;
        }
    }

    /// Mark every snapshot as stale (e.g. after the hidden-file toggle).
    pub fn invalidate_all(&mut self) {
        for snapshot in self.snapshots.values_mut() {
            snapshot.stale = true;
        }
    }

    /// Drop a snapshot; an in-flight response for it becomes stale.
    pub fn remove(&mut self, path: &str) {
        self.snapshots.remove(path);
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> Vec<Entry> {
        names
            .iter()
            .map(|n| Entry::file("/d", n, 1, "2024-01-01 00:00:00"))
            .collect()
    }

    #[test]
    fn test_if_missing_is_idempotent_while_loading() {
        let mut cache = SnapshotCache::new();
        let ticket = cache.begin("/d", FetchMode::IfMissing).unwrap();
        assert!(cache.begin("/d", FetchMode::IfMissing).is_none());
        assert!(cache.is_loading("/d"));

        assert_eq!(cache.complete(&ticket, Ok(listing(&["a"]))), Applied::Fresh);
        assert!(cache.begin("/d", FetchMode::IfMissing).is_none());
        assert_eq!(cache.entries("/d").unwrap().len(), 1);
    }

    #[test]
    fn test_out_of_order_completion_is_discarded() {
        let mut cache = SnapshotCache::new();
        let old = cache.begin("/d", FetchMode::Always).unwrap();
        let new = cache.begin("/d", FetchMode::Always).unwrap();

        assert_eq!(cache.complete(&new, Ok(listing(&["new"]))), Applied::Fresh);
        assert_eq!(cache.complete(&old, Ok(listing(&["old"]))), Applied::Stale);
        assert_eq!(cache.entries("/d").unwrap()[0].name, "new");
    }

    #[test]
    fn test_stale_snapshot_refetched_if_missing() {
        let mut cache = SnapshotCache::new();
        let ticket = cache.begin("/d", FetchMode::IfMissing).unwrap();
        cache.complete(&ticket, Ok(listing(&["a"])));

        cache.invalidate_all();
        assert!(!cache.is_fresh("/d"));
        // stale data stays visible until the refetch lands
        assert_eq!(cache.entries("/d").unwrap().len(), 1);
        assert!(cache.begin("/d", FetchMode::IfMissing).is_some());
    }

    #[test]
    fn test_failure_leaves_empty_loaded_snapshot() {
        let mut cache = SnapshotCache::new();
        let ticket = cache.begin("/d", FetchMode::IfIdle).unwrap();
        let err = BackendError::Access("/d".to_string());
        assert_eq!(cache.complete(&ticket, Err(err.clone())), Applied::Failed(err));

        let snapshot = cache.get("/d").unwrap();
        assert!(snapshot.is_loaded());
        assert!(snapshot.entries().is_empty());
        assert!(snapshot.error().is_some());
    }

    #[test]
    fn test_removed_path_discards_response() {
        let mut cache = SnapshotCache::new();
        let ticket = cache.begin("/d", FetchMode::IfIdle).unwrap();
        cache.remove("/d");
        assert_eq!(cache.complete(&ticket, Ok(listing(&["a"]))), Applied::Stale);
    }
}
