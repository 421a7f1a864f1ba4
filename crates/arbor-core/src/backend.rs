//! Host collaborators.
//!
//! The filesystem backend and the settings store are implemented by the
//! host process. Both are single-threaded (the UI event loop), so the
//! futures are not required to be `Send`.

use serde_json::Value;

use crate::clipboard::ClipboardMode;
use crate::entry::Entry;
use crate::error::{BackendError, SettingsError};

pub type BackendResult<T> = Result<T, BackendError>;

/// Filesystem and OS operations, keyed by path.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn list_directory(&self, path: &str, show_hidden: bool) -> BackendResult<Vec<Entry>>;
    async fn home_directory(&self) -> BackendResult<String>;
    async fn parent_directory(&self, path: &str) -> BackendResult<String>;
    async fn list_drives(&self) -> BackendResult<Vec<String>>;
    async fn is_within_home(&self, path: &str) -> BackendResult<bool>;

    async fn create_directory(&self, parent: &str, name: &str) -> BackendResult<()>;
    async fn create_file(&self, parent: &str, name: &str) -> BackendResult<()>;
    /// Returns the renamed item's new path.
    async fn rename_item(&self, path: &str, new_name: &str) -> BackendResult<String>;
    async fn move_to_trash(&self, path: &str) -> BackendResult<()>;
    /// Permanent delete.
    async fn delete_item(&self, path: &str) -> BackendResult<()>;
    async fn restore_from_trash(&self, path: &str) -> BackendResult<()>;
    async fn list_trash_items(&self) -> BackendResult<Vec<Entry>>;
    async fn file_operation(
        &self,
        source: &str,
        destination: &str,
        mode: ClipboardMode,
    ) -> BackendResult<()>;

    /// Open with the OS default application.
    async fn open_path(&self, path: &str) -> BackendResult<()>;
    /// Platform family identifier (`"macos"`, `"windows"`, ...).
    async fn platform(&self) -> BackendResult<String>;
}

/// Key-value settings persistence.
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), SettingsError>;
    /// Flush pending writes.
    async fn save(&self) -> Result<(), SettingsError>;
}
