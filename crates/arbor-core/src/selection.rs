//! Multi-selection state.
//!
//! Selected paths are kept in selection order. All index-based operations
//! take the current render order (the sorted, tree-flattened list of paths)
//! so the anchor always refers to what is on screen.

use indexmap::IndexSet;

/// Ordered set of selected paths plus the range anchor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    paths: IndexSet<String>,
    anchor: Option<usize>,
}

fn position(order: &[String], path: &str) -> Option<usize> {
    order.iter().position(|p| p == path)
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with `path`.
    ///
    /// No-op if `path` is not in the render order.
    pub fn select_single(&mut self, path: &str, order: &[String]) -> bool {
        let Some(index) = position(order, path) else {
            return false;
        };
        self.paths.clear();
        self.paths.insert(path.to_string());
        self.anchor = Some(index);
        true
    }

    /// Add the span between the anchor and `path` (inclusive).
    ///
    /// Paths outside the span stay selected and the anchor does not move, so
    /// repeated shift-clicks only grow the selection. Without an anchor this
    /// behaves like [`select_single`](Self::select_single).
    pub fn select_range(&mut self, path: &str, order: &[String]) -> bool {
        let Some(index) = position(order, path) else {
            return false;
        };
        let Some(anchor) = self.anchor.filter(|a| *a < order.len()) else {
            return self.select_single(path, order);
        };
        let (start, end) = if anchor <= index {
            (anchor, index)
        } else {
            (index, anchor)
        };
        for p in &order[start..=end] {
            self.paths.insert(p.clone());
        }
        true
    }

    /// Flip membership of `path` and move the anchor to it.
    pub fn toggle(&mut self, path: &str, order: &[String]) -> bool {
        let Some(index) = position(order, path) else {
            return false;
        };
        if !self.paths.shift_remove(path) {
            self.paths.insert(path.to_string());
        }
        self.anchor = Some(index);
        true
    }

    pub fn select_all(&mut self, order: &[String]) {
        self.paths = order.iter().cloned().collect();
        if self.anchor.is_none_or(|a| a >= order.len()) {
            self.anchor = if order.is_empty() { None } else { Some(0) };
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.anchor = None;
    }

    /// Replace the selection with `paths` without touching the anchor.
    pub fn replace(&mut self, paths: IndexSet<String>) {
        self.paths = paths;
    }

    /// Drop paths that are no longer rendered.
    ///
    /// The anchor is kept on the same path when it survived, otherwise reset.
    pub fn prune(&mut self, old_order: &[String], order: &[String]) {
        self.paths.retain(|p| order.contains(p));
        self.anchor = self
            .anchor
            .and_then(|a| old_order.get(a))
            .and_then(|p| position(order, p));
    }

    /// Remove a single path (e.g. after it was deleted).
    pub fn remove(&mut self, path: &str) {
        self.paths.shift_remove(path);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Selected paths in selection order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.paths.iter().cloned().collect()
    }

    /// The selected path when exactly one is selected.
    pub fn single(&self) -> Option<&str> {
        if self.paths.len() == 1 {
            self.paths.first().map(String::as_str)
        } else {
            None
        }
    }

    pub(crate) fn as_set(&self) -> &IndexSet<String> {
        &self.paths
    }
}
