//! Error types for the file list core.
//!
//! - [`BackendError`] - failures reported by the host filesystem bridge
//! - [`SettingsError`] - failures of the key-value settings store
//! - [`ValidationError`] - input rejected before any backend call
//! - [`FileListError`] - what the view shows to the user (one at a time)

use thiserror::Error;

/// Failure reported by the host process for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Permission denied for the path.
    #[error("access denied: {0}")]
    Access(String),
    /// Path does not exist (anymore).
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other failure with the host's message.
    #[error("{0}")]
    Failed(String),
    /// The bridge itself failed (serialization, missing host).
    #[error("bridge error: {0}")]
    Bridge(String),
}

impl BackendError {
    /// Classify a raw host message.
    ///
    /// The host reports errors as plain strings, so the classification is
    /// based on the wording it uses.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("permission denied") || lower.contains("access is denied") {
            Self::Access(message)
        } else if lower.contains("does not exist") || lower.contains("not found") {
            Self::NotFound(message)
        } else {
            Self::Failed(message)
        }
    }
}

/// Settings store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The store is not available in this host.
    #[error("settings store unavailable")]
    Unavailable,
    /// Failed to encode or decode a value.
    #[error("invalid setting value: {0}")]
    Serialization(String),
    /// The store rejected a write or save.
    #[error("failed to write settings: {0}")]
    WriteFailed(String),
}

/// Input rejected locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming.
    #[error("name cannot be empty")]
    EmptyName,
    /// Name contains a path separator or is a relative component.
    #[error("invalid name: {0}")]
    InvalidName(String),
}

/// Mutating operation kinds, used to label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    CreateFile,
    CreateDirectory,
    Rename,
    Trash,
    DeletePermanently,
    Restore,
    Copy,
    Move,
}

impl MutationOp {
    pub fn verb(self) -> &'static str {
        match self {
            Self::CreateFile => "create file",
            Self::CreateDirectory => "create folder",
            Self::Rename => "rename",
            Self::Trash => "move to trash",
            Self::DeletePermanently => "delete",
            Self::Restore => "restore",
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }
}

/// Error surfaced by the file list view.
///
/// Only the most recent error is kept; it never aborts an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileListError {
    /// A directory listing failed.
    #[error("could not read {path}: {source}")]
    Fetch { path: String, source: BackendError },
    /// A create/rename/delete/paste call failed.
    #[error("could not {} {path}: {source}", .op.verb())]
    Mutation {
        op: MutationOp,
        path: String,
        source: BackendError,
    },
    /// Opening with the default application failed.
    #[error("could not open {path}: {source}")]
    Open { path: String, source: BackendError },
    /// Name rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Preference could not be persisted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Validate a file or folder name typed by the user.
///
/// Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
        return Err(ValidationError::InvalidName(trimmed.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message_classifies() {
        assert!(matches!(
            BackendError::from_message("Path does not exist: /x"),
            BackendError::NotFound(_)
        ));
        assert!(matches!(
            BackendError::from_message("Permission denied (os error 13)"),
            BackendError::Access(_)
        ));
        assert!(matches!(
            BackendError::from_message("disk full"),
            BackendError::Failed(_)
        ));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  notes.txt "), Ok("notes.txt"));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert!(matches!(
            validate_name("a/b"),
            Err(ValidationError::InvalidName(_))
        ));
        assert!(matches!(
            validate_name(".."),
            Err(ValidationError::InvalidName(_))
        ));
    }

    #[test]
    fn test_mutation_error_message() {
        let err = FileListError::Mutation {
            op: MutationOp::Rename,
            path: "/a/b.txt".to_string(),
            source: BackendError::Failed("busy".to_string()),
        };
        assert_eq!(err.to_string(), "could not rename /a/b.txt: busy");
    }
}
