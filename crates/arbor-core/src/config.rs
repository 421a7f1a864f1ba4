//! Core configuration.
//!
//! Centralizes the constants the interaction core depends on. Presentation
//! constants (row metrics, icon theme) live in the renderer's own config.

// =============================================================================
// Zoom
// =============================================================================

/// Zoom level limits and step.
pub mod zoom {
    /// Smallest allowed zoom factor.
    pub const MIN: f64 = 0.5;
    /// Largest allowed zoom factor.
    pub const MAX: f64 = 2.0;
    /// Increment applied by zoom in/out.
    pub const STEP: f64 = 0.1;
    /// Zoom factor restored by zoom reset.
    pub const DEFAULT: f64 = 1.0;
}

// =============================================================================
// Refresh
// =============================================================================

/// Interval of the background refresh of the current directory.
pub const REFRESH_INTERVAL_MS: u32 = 15_000;

// =============================================================================
// Drag Selection
// =============================================================================

/// Rubber-band selection auto-scroll tuning.
pub mod drag {
    /// Distance from the top/bottom edge that triggers auto-scroll (px).
    pub const EDGE_MARGIN: f64 = 40.0;
    /// Scroll distance applied per tick while in the edge zone (px).
    pub const SCROLL_SPEED: f64 = 12.0;
    /// Delay between auto-scroll ticks.
    pub const TICK_MS: u32 = 16;
}

// =============================================================================
// New Items
// =============================================================================

/// Suggested name for a file created from the UI.
pub const DEFAULT_FILE_NAME: &str = "New File.txt";

/// Suggested name for a folder created from the UI.
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

// =============================================================================
// Settings Keys
// =============================================================================

/// Keys used in the host's key-value settings store.
pub mod settings_keys {
    /// Zoom factor (f64).
    pub const ZOOM_LEVEL: &str = "zoomLevel";
    /// Expanded folders map (path -> bool).
    pub const EXPANDED_FOLDERS: &str = "expandedFolders";
    /// Prefix of the per-directory sort preference key.
    pub const SORT_PREFIX: &str = "sortPreference:";
}

// =============================================================================
// Platform
// =============================================================================

/// Directory suffixes treated as a single openable item on macOS.
pub const MACOS_BUNDLE_SUFFIXES: &[&str] = &[".app"];
