//! UI components built with Leptos.
//!
//! - [`explorer`] - File browser: header, list, context menu
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`sidebar`] - Home, drives and trash shortcuts
//! - [`status`] - Status bar with counts, zoom and the error toast

pub mod explorer;
pub mod icons;
pub mod sidebar;
pub mod status;

pub use explorer::Explorer;
