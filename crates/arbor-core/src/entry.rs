//! Filesystem entries as known to the UI, plus path helpers.
//!
//! Paths are opaque strings owned by the host. The helpers here only split
//! and join on separators; they never touch the disk or normalize.

use serde::{Deserialize, Serialize};

use crate::config::MACOS_BUNDLE_SUFFIXES;
use crate::platform::Platform;

/// One file or directory returned by a listing.
///
/// Field names on the wire follow the host's `FileEntry` record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    /// Absolute path, unique within a listing.
    pub path: String,
    pub is_dir: bool,
    /// Size in bytes, meaningless for directories.
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// Local time formatted as `YYYY-MM-DD HH:MM:SS`, so it orders lexically.
    #[serde(rename = "modified")]
    pub modified_at: String,
    /// Extension classifier (`"txt"`, `"directory"`, `"file"`).
    #[serde(rename = "file_type")]
    pub kind: String,
    pub is_hidden: bool,
}

impl Entry {
    /// Build a file entry inside `parent`.
    pub fn file(parent: &str, name: &str, size_bytes: u64, modified_at: &str) -> Self {
        let kind = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
            _ => "file".to_string(),
        };
        Self {
            name: name.to_string(),
            path: join_path(parent, name),
            is_dir: false,
            size_bytes,
            modified_at: modified_at.to_string(),
            kind,
            is_hidden: is_hidden_name(name),
        }
    }

    /// Build a directory entry inside `parent`.
    pub fn directory(parent: &str, name: &str, modified_at: &str) -> Self {
        Self {
            name: name.to_string(),
            path: join_path(parent, name),
            is_dir: true,
            size_bytes: 0,
            modified_at: modified_at.to_string(),
            kind: "directory".to_string(),
            is_hidden: is_hidden_name(name),
        }
    }

    /// Directory the UI treats as a single openable item (e.g. `Foo.app`).
    pub fn is_opaque_bundle(&self, platform: Platform) -> bool {
        self.is_dir
            && platform == Platform::MacOs
            && MACOS_BUNDLE_SUFFIXES
                .iter()
                .any(|suffix| self.name.ends_with(suffix))
    }

    /// Whether the tree view may expand this entry.
    pub fn is_expandable(&self, platform: Platform) -> bool {
        self.is_dir && !self.is_opaque_bundle(platform)
    }

    /// Name shown in the list; bundles drop their suffix on macOS.
    pub fn display_name(&self, platform: Platform) -> &str {
        if self.is_opaque_bundle(platform) {
            for suffix in MACOS_BUNDLE_SUFFIXES {
                if let Some(stem) = self.name.strip_suffix(suffix) {
                    return stem;
                }
            }
        }
        &self.name
    }
}

/// Hidden by naming convention (dotfiles).
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Last component of a path, accepting both separators.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(trimmed)
}

/// Directory containing `path`, or `None` for a root.
pub fn parent_dir(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches(['/', '\\']);
    let idx = trimmed.rfind(['/', '\\'])?;
    if idx == 0 {
        Some(&trimmed[..1])
    } else {
        Some(&trimmed[..idx])
    }
}

/// Join a directory and a child name with `/`.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.ends_with('/') || dir.ends_with('\\') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Whether `path` is `dir` itself or lies below it.
pub fn is_within(path: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches(['/', '\\']);
    if path == dir {
        return true;
    }
    path.strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with(['/', '\\']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        let file = Entry::file("/A", "b.txt", 10, "2024-01-01 10:00:00");
        assert_eq!(file.path, "/A/b.txt");
        assert_eq!(file.kind, "txt");
        assert!(!file.is_hidden);

        let hidden = Entry::file("/A", ".env", 1, "2024-01-01 10:00:00");
        assert!(hidden.is_hidden);
        assert_eq!(hidden.kind, "file");

        let dir = Entry::directory("/A/", "C", "2024-01-01 10:00:00");
        assert_eq!(dir.path, "/A/C");
        assert!(dir.is_dir);
    }

    #[test]
    fn test_opaque_bundle_only_on_macos() {
        let app = Entry::directory("/Applications", "Safari.app", "2024-01-01 10:00:00");
        assert!(app.is_opaque_bundle(Platform::MacOs));
        assert!(!app.is_expandable(Platform::MacOs));
        assert_eq!(app.display_name(Platform::MacOs), "Safari");

        assert!(!app.is_opaque_bundle(Platform::Linux));
        assert!(app.is_expandable(Platform::Linux));
        assert_eq!(app.display_name(Platform::Linux), "Safari.app");
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(basename("/a/b/c.txt"), "c.txt");
        assert_eq!(basename("C:\\Users\\me\\notes"), "notes");
        assert_eq!(basename("/a/b/"), "b");
        assert_eq!(parent_dir("/a/b/c.txt"), Some("/a/b"));
        assert_eq!(parent_dir("/a"), Some("/"));
        assert_eq!(parent_dir("a"), None);
        assert_eq!(join_path("/", "x"), "/x");
        assert_eq!(join_path("/a", "x"), "/a/x");
    }

    #[test]
    fn test_is_within() {
        assert!(is_within("/a/b", "/a"));
        assert!(is_within("/a", "/a"));
        assert!(is_within("/a/b", "/a/"));
        assert!(!is_within("/ab", "/a"));
        assert!(is_within("/x", "/"));
    }
}
