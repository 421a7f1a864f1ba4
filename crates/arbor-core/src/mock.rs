//! In-memory host for tests and the `mock` feature.
//!
//! [`MockBackend`] keeps a flat map of paths to entries plus a trash list.
//! Every call is recorded under the host's command name so tests can assert
//! on what was (or was not) requested.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::backend::{Backend, BackendResult, SettingsStore};
use crate::clipboard::ClipboardMode;
use crate::entry::{Entry, basename, is_within, join_path, parent_dir};
use crate::error::{BackendError, SettingsError};

const MODIFIED: &str = "2024-01-01 12:00:00";
const TRASH_DIR: &str = "/.Trash";

#[derive(Clone, Debug)]
struct Trashed {
    entry: Entry,
    original: String,
    /// The item and everything below it, at their original paths.
    subtree: Vec<Entry>,
}

#[derive(Debug, Default)]
struct MockFs {
    entries: BTreeMap<String, Entry>,
    trash: Vec<Trashed>,
    failing: HashSet<String>,
    calls: Vec<String>,
    opened: Vec<String>,
}

impl MockFs {
    fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.path.clone(), entry);
    }

    fn exists(&self, path: &str) -> bool {
        self.entries.contains_key(path) || self.is_root_dir(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.entries.get(path).is_some_and(|e| e.is_dir) || self.is_root_dir(path)
    }

    fn is_root_dir(&self, path: &str) -> bool {
        path == "/"
    }

    fn take_subtree(&mut self, path: &str) -> Vec<Entry> {
        let paths: Vec<String> = self
            .entries
            .keys()
            .filter(|p| is_within(p, path))
            .cloned()
            .collect();
        paths
            .into_iter()
            .filter_map(|p| self.entries.remove(&p))
            .collect()
    }

    /// Copy of the subtree at `from`, re-rooted at `to`.
    fn relocated(&self, from: &str, to: &str) -> Vec<Entry> {
        self.entries
            .values()
            .filter(|e| is_within(&e.path, from))
            .map(|e| relocate(e, from, to))
            .collect()
    }

    fn check(&mut self, call: &str, path: &str) -> BackendResult<()> {
        self.calls.push(format!("{} {}", call, path));
        if self.failing.contains(path) {
            return Err(BackendError::Access(format!("Permission denied: {}", path)));
        }
        Ok(())
    }
}

fn relocate(entry: &Entry, from: &str, to: &str) -> Entry {
    let rest = entry.path.strip_prefix(from).unwrap_or_default();
    let path = format!("{}{}", to, rest);
    let mut moved = entry.clone();
    moved.name = basename(&path).to_string();
    moved.path = path;
    moved
}

/// Filesystem backend kept in memory.
#[derive(Debug)]
pub struct MockBackend {
    home: String,
    platform: String,
    fs: RefCell<MockFs>,
}

impl MockBackend {
    /// Empty filesystem containing only the home directory.
    pub fn new(home: &str) -> Self {
        let backend = Self {
            home: home.to_string(),
            platform: "linux".to_string(),
            fs: RefCell::new(MockFs::default()),
        };
        backend.add_dirs(home);
        backend
    }

    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = platform.to_string();
        self
    }

    /// Add a directory and any missing ancestors.
    pub fn with_dir(self, path: &str) -> Self {
        self.add_dirs(path);
        self
    }

    /// Add a file (and its ancestors).
    pub fn with_file(self, path: &str, size: u64) -> Self {
        if let Some(parent) = parent_dir(path) {
            self.add_dirs(parent);
            self.fs
                .borrow_mut()
                .insert(Entry::file(parent, basename(path), size, MODIFIED));
        }
        self
    }

    /// Make every call on `path` fail with an access error.
    pub fn fail_on(&self, path: &str) {
        self.fs.borrow_mut().failing.insert(path.to_string());
    }

    pub fn clear_failures(&self) {
        self.fs.borrow_mut().failing.clear();
    }

    pub fn exists(&self, path: &str) -> bool {
        self.fs.borrow().exists(path)
    }

    /// Recorded calls, as `"<command> <path>"`.
    pub fn calls(&self) -> Vec<String> {
        self.fs.borrow().calls.clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.fs
            .borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn clear_calls(&self) {
        self.fs.borrow_mut().calls.clear();
    }

    /// Paths handed to the default application.
    pub fn opened(&self) -> Vec<String> {
        self.fs.borrow().opened.clone()
    }

    fn add_dirs(&self, path: &str) {
        let mut fs = self.fs.borrow_mut();
        let mut current = Some(path);
        while let Some(dir) = current {
            if fs.exists(dir) {
                break;
            }
            let Some(parent) = parent_dir(dir) else {
                break;
            };
            fs.insert(Entry::directory(parent, basename(dir), MODIFIED));
            current = Some(parent);
        }
    }
}

impl Backend for MockBackend {
    async fn list_directory(&self, path: &str, show_hidden: bool) -> BackendResult<Vec<Entry>> {
        let mut fs = self.fs.borrow_mut();
        fs.check("read_directory", path)?;
        if !fs.is_dir(path) {
            return Err(BackendError::NotFound(format!("Path does not exist: {}", path)));
        }
        Ok(fs
            .entries
            .values()
            .filter(|e| parent_dir(&e.path) == Some(path))
            .filter(|e| show_hidden || !e.is_hidden)
            .cloned()
            .collect())
    }

    async fn home_directory(&self) -> BackendResult<String> {
        self.fs.borrow_mut().calls.push("get_home_directory".to_string());
        Ok(self.home.clone())
    }

    async fn parent_directory(&self, path: &str) -> BackendResult<String> {
        self.fs.borrow_mut().check("get_parent_directory", path)?;
        Ok(parent_dir(path).unwrap_or(path).to_string())
    }

    async fn list_drives(&self) -> BackendResult<Vec<String>> {
        Ok(vec!["/".to_string()])
    }

    async fn is_within_home(&self, path: &str) -> BackendResult<bool> {
        Ok(is_within(path, &self.home))
    }

    async fn create_directory(&self, parent: &str, name: &str) -> BackendResult<()> {
        let mut fs = self.fs.borrow_mut();
        fs.check("create_directory", parent)?;
        let path = join_path(parent, name);
        if fs.exists(&path) {
            return Err(BackendError::Failed(format!("File exists: {}", path)));
        }
        fs.insert(Entry::directory(parent, name, MODIFIED));
        Ok(())
    }

    async fn create_file(&self, parent: &str, name: &str) -> BackendResult<()> {
        let mut fs = self.fs.borrow_mut();
        fs.check("create_file", parent)?;
        let path = join_path(parent, name);
        if fs.exists(&path) {
            return Err(BackendError::Failed(format!("File exists: {}", path)));
        }
        fs.insert(Entry::file(parent, name, 0, MODIFIED));
        Ok(())
    }

    async fn rename_item(&self, path: &str, new_name: &str) -> BackendResult<String> {
        let mut fs = self.fs.borrow_mut();
        fs.check("rename_item", path)?;
        if !fs.exists(path) {
            return Err(BackendError::NotFound(format!("Path does not exist: {}", path)));
        }
        let parent = parent_dir(path).unwrap_or(path).to_string();
        let target = join_path(&parent, new_name);
        if fs.exists(&target) {
            return Err(BackendError::Failed(format!("File exists: {}", target)));
        }
        let moved = fs.relocated(path, &target);
        fs.take_subtree(path);
        for entry in moved {
            fs.insert(entry);
        }
        Ok(target)
    }

    async fn move_to_trash(&self, path: &str) -> BackendResult<()> {
        let mut fs = self.fs.borrow_mut();
        fs.check("move_to_trash", path)?;
        let Some(entry) = fs.entries.get(path).cloned() else {
            return Err(BackendError::NotFound(format!("Path does not exist: {}", path)));
        };
        let subtree = fs.take_subtree(path);
        let trashed = relocate(&entry, path, &join_path(TRASH_DIR, &entry.name));
        fs.trash.push(Trashed {
            entry: trashed,
            original: path.to_string(),
            subtree,
        });
        Ok(())
    }

    async fn delete_item(&self, path: &str) -> BackendResult<()> {
        let mut fs = self.fs.borrow_mut();
        fs.check("delete_item", path)?;
        if let Some(index) = fs.trash.iter().position(|t| t.entry.path == path) {
            fs.trash.remove(index);
            return Ok(());
        }
        if fs.take_subtree(path).is_empty() {
            return Err(BackendError::NotFound(format!("Path does not exist: {}", path)));
        }
        Ok(())
    }

    async fn restore_from_trash(&self, path: &str) -> BackendResult<()> {
        let mut fs = self.fs.borrow_mut();
        fs.check("restore_from_trash", path)?;
        let Some(index) = fs.trash.iter().position(|t| t.entry.path == path) else {
            return Err(BackendError::NotFound(format!("Not in trash: {}", path)));
        };
        let trashed = fs.trash.remove(index);
        if fs.exists(&trashed.original) {
            let original = trashed.original.clone();
            fs.trash.insert(index, trashed);
            return Err(BackendError::Failed(format!("File exists: {}", original)));
        }
        for entry in trashed.subtree {
            fs.insert(entry);
        }
        Ok(())
    }

    async fn list_trash_items(&self) -> BackendResult<Vec<Entry>> {
        let mut fs = self.fs.borrow_mut();
        fs.calls.push("get_trash_items".to_string());
        Ok(fs.trash.iter().map(|t| t.entry.clone()).collect())
    }

    async fn file_operation(
        &self,
        source: &str,
        destination: &str,
        mode: ClipboardMode,
    ) -> BackendResult<()> {
        let mut fs = self.fs.borrow_mut();
        fs.check("file_operation", source)?;
        if !fs.exists(source) {
            return Err(BackendError::NotFound(format!("Path does not exist: {}", source)));
        }
        if fs.exists(destination) {
            return Err(BackendError::Failed(format!(
                "Destination already exists: {}",
                destination
            )));
        }
        let copied = fs.relocated(source, destination);
        if mode == ClipboardMode::Cut {
            fs.take_subtree(source);
        }
        for entry in copied {
            fs.insert(entry);
        }
        Ok(())
    }

    async fn open_path(&self, path: &str) -> BackendResult<()> {
        let mut fs = self.fs.borrow_mut();
        fs.check("open_path", path)?;
        fs.opened.push(path.to_string());
        Ok(())
    }

    async fn platform(&self) -> BackendResult<String> {
        Ok(self.platform.clone())
    }
}

/// Settings store kept in memory.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RefCell<BTreeMap<String, Value>>,
    fail_writes: Cell<bool>,
    saves: Cell<usize>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored value.
    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.values.borrow_mut().insert(key.to_string(), value);
        self
    }

    /// Make `set` and `save` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        if self.fail_writes.get() {
            return Err(SettingsError::WriteFailed(format!("cannot write {}", key)));
        }
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    async fn save(&self) -> Result<(), SettingsError> {
        if self.fail_writes.get() {
            return Err(SettingsError::WriteFailed("cannot save".to_string()));
        }
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
