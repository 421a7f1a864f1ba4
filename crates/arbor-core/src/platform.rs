//! Host platform family.

use serde::{Deserialize, Serialize};

/// Operating system family reported by the host.
///
/// Decides the primary modifier key, the delete shortcut and which
/// directories are opaque bundles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(rename = "macos")]
    MacOs,
    Windows,
    #[default]
    Linux,
    Other,
}

impl Platform {
    /// Parse the identifier returned by the host (`"macos"`, `"windows"`, ...).
    pub fn from_identifier(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" | "ios" => Self::MacOs,
            "windows" => Self::Windows,
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "android" => Self::Linux,
            _ => Self::Other,
        }
    }

    /// Whether the primary modifier is Cmd (meta) rather than Ctrl.
    pub fn uses_command_key(self) -> bool {
        self == Self::MacOs
    }

    /// Label for the primary modifier in shortcut hints.
    pub fn primary_label(self) -> &'static str {
        if self.uses_command_key() {
            "⌘"
        } else {
            "Ctrl"
        }
    }

    /// Format a shortcut hint like `⌘+H` or `Ctrl+H`.
    pub fn shortcut(self, key: &str) -> String {
        format!("{}+{}", self.primary_label(), key)
    }
}
