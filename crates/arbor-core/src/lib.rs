//! Headless interaction core of the arbor file browser.
//!
//! This crate provides:
//! - [`FileList`], the controller owning selection, tree expansion, sort,
//!   clipboard, history, inline rename, context menu and trash view
//! - [`Request`] / [`Completion`], the protocol between the controller and
//!   the host that performs I/O
//! - [`Backend`] and [`SettingsStore`], the host collaborators, and
//!   [`driver`] to run requests against them
//! - pure helpers: [`sort`], [`format`], [`command::route`], [`menu::menu_items`]

pub mod backend;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod drag;
pub mod driver;
pub mod entry;
pub mod error;
pub mod format;
pub mod history;
pub mod list;
pub mod menu;
pub mod platform;
pub mod render;
pub mod request;
pub mod selection;
pub mod settings;
pub mod snapshot;
pub mod sort;
pub mod tree;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use backend::{Backend, BackendResult, SettingsStore};
pub use clipboard::{Clipboard, ClipboardMode};
pub use command::{Command, Key, KeyInput, Modifiers};
pub use entry::Entry;
pub use error::{BackendError, FileListError, SettingsError, ValidationError};
pub use list::{FileList, InlineEdit, KeyOutcome, View};
pub use platform::Platform;
pub use render::Row;
pub use request::{Completion, Mutation, NavToken, Request};
pub use settings::{SettingKey, SettingValue};
pub use sort::{SortDirection, SortField, SortPreference};
