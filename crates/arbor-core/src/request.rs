//! Requests the controller hands to the host, and their completions.
//!
//! The controller never performs I/O. Operations return [`Request`]s; the
//! host runs them (in any order, possibly concurrently) and feeds each
//! [`Completion`] back into [`FileList::complete`](crate::FileList::complete).

use crate::clipboard::{ClipboardMode, Transfer};
use crate::entry::{Entry, join_path, parent_dir};
use crate::error::{BackendError, MutationOp, SettingsError};
use crate::settings::{SettingKey, SettingValue};
use crate::snapshot::FetchTicket;

/// Navigation sequence number. Every navigation issues a new one; responses
/// tagged with an older token are discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavToken(pub u64);

impl NavToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Why a directory is being listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOrigin {
    /// The current directory.
    TopLevel(NavToken),
    /// Children of an expanded tree node.
    Child,
}

/// A filesystem change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    CreateFile { parent: String, name: String },
    CreateDirectory { parent: String, name: String },
    Rename { path: String, new_name: String },
    MoveToTrash { path: String },
    DeletePermanently { path: String },
    RestoreFromTrash { path: String },
    Transfer(Transfer),
}

impl Mutation {
    pub fn op(&self) -> MutationOp {
        match self {
            Self::CreateFile { .. } => MutationOp::CreateFile,
            Self::CreateDirectory { .. } => MutationOp::CreateDirectory,
            Self::Rename { .. } => MutationOp::Rename,
            Self::MoveToTrash { .. } => MutationOp::Trash,
            Self::DeletePermanently { .. } => MutationOp::DeletePermanently,
            Self::RestoreFromTrash { .. } => MutationOp::Restore,
            Self::Transfer(t) => match t.mode {
                ClipboardMode::Copy => MutationOp::Copy,
                ClipboardMode::Cut => MutationOp::Move,
            },
        }
    }

    /// Path the operation acts on, used in error messages.
    pub fn subject(&self) -> String {
        match self {
            Self::CreateFile { parent, name } | Self::CreateDirectory { parent, name } => {
                join_path(parent, name)
            }
            Self::Rename { path, .. }
            | Self::MoveToTrash { path }
            | Self::DeletePermanently { path }
            | Self::RestoreFromTrash { path } => path.clone(),
            Self::Transfer(t) => t.source.clone(),
        }
    }

    /// Directories whose listings may change.
    pub fn affected_dirs(&self) -> Vec<String> {
        let parent_of = |path: &str| parent_dir(path).map(str::to_string);
        match self {
            Self::CreateFile { parent, .. } | Self::CreateDirectory { parent, .. } => {
                vec![parent.clone()]
            }
            Self::Rename { path, .. }
            | Self::MoveToTrash { path }
            | Self::DeletePermanently { path } => parent_of(path).into_iter().collect(),
            // the restore target is only known to the host
            Self::RestoreFromTrash { .. } => Vec::new(),
            Self::Transfer(t) => {
                let mut dirs: Vec<String> = parent_of(&t.destination).into_iter().collect();
                if t.mode == ClipboardMode::Cut
                    && let Some(source_dir) = parent_of(&t.source)
                    && !dirs.contains(&source_dir)
                {
                    dirs.push(source_dir);
                }
                dirs
            }
        }
    }

    /// Whether the mutation affects the trash listing.
    pub fn touches_trash(&self) -> bool {
        matches!(
            self,
            Self::MoveToTrash { .. } | Self::DeletePermanently { .. } | Self::RestoreFromTrash { .. }
        )
    }
}

/// Work for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    ListDirectory {
        ticket: FetchTicket,
        show_hidden: bool,
        origin: ListOrigin,
    },
    ListTrash {
        generation: u64,
    },
    HomeDirectory,
    ParentDirectory {
        of: String,
        nav: NavToken,
    },
    ListDrives,
    CheckWithinHome {
        path: String,
        nav: NavToken,
    },
    Platform,
    Mutate(Mutation),
    Open {
        path: String,
    },
    LoadSetting {
        key: SettingKey,
        nav: NavToken,
    },
    StoreSetting {
        key: SettingKey,
        value: SettingValue,
    },
}

impl Request {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ListDirectory { .. } => "read_directory",
            Self::ListTrash { .. } => "get_trash_items",
            Self::HomeDirectory => "get_home_directory",
            Self::ParentDirectory { .. } => "get_parent_directory",
            Self::ListDrives => "get_drives",
            Self::CheckWithinHome { .. } => "is_within_home_directory",
            Self::Platform => "platform",
            Self::Mutate(_) => "mutate",
            Self::Open { .. } => "open_path",
            Self::LoadSetting { .. } => "settings_get",
            Self::StoreSetting { .. } => "settings_set",
        }
    }
}

/// Result of a [`Request`], carrying back its tags.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Listed {
        ticket: FetchTicket,
        origin: ListOrigin,
        result: Result<Vec<Entry>, BackendError>,
    },
    TrashListed {
        generation: u64,
        result: Result<Vec<Entry>, BackendError>,
    },
    Home(Result<String, BackendError>),
    Parent {
        nav: NavToken,
        result: Result<String, BackendError>,
    },
    Drives(Result<Vec<String>, BackendError>),
    WithinHome {
        path: String,
        nav: NavToken,
        result: Result<bool, BackendError>,
    },
    Platform(Result<String, BackendError>),
    /// `Ok` carries the resulting path (created item, new name, destination).
    Mutated {
        mutation: Mutation,
        result: Result<String, BackendError>,
    },
    Opened {
        path: String,
        result: Result<(), BackendError>,
    },
    SettingLoaded {
        key: SettingKey,
        nav: NavToken,
        result: Result<Option<SettingValue>, SettingsError>,
    },
    SettingStored {
        key: SettingKey,
        result: Result<(), SettingsError>,
    },
}
