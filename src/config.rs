//! Application configuration.
//!
//! Centralizes the presentation constants of the web shell. Behavioral
//! constants (zoom limits, refresh interval, drag tuning) live in
//! `arbor_core::config`.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the sidebar.
pub const APP_NAME: &str = "arbor";

// =============================================================================
// Logging
// =============================================================================

/// Most verbose level forwarded to the browser console.
#[cfg(debug_assertions)]
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;

/// Most verbose level forwarded to the browser console.
#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

// =============================================================================
// Settings Storage
// =============================================================================

/// Prefix of every key arbor writes to localStorage.
pub const SETTINGS_PREFIX: &str = "arbor.";

// =============================================================================
// List Layout
// =============================================================================

/// File list row metrics at zoom 1.0 (px).
pub mod layout {
    /// Height of one row.
    pub const ROW_HEIGHT: f64 = 28.0;
    /// Height of the sticky column header above the first row.
    pub const HEADER_HEIGHT: f64 = 28.0;
    /// Horizontal indent per tree level.
    pub const INDENT: f64 = 18.0;
    /// Base font size.
    pub const FONT_SIZE: f64 = 13.0;
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
/// Change this value to switch icon styles globally.
pub const ICON_THEME: IconTheme = IconTheme::Lucide;
