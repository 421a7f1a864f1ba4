//! File explorer UI components.
//!
//! Components:
//! - [`Explorer`] - Main explorer view, owns the global listeners
//! - [`Header`] - Navigation, new-item and view menus
//! - [`FileList`] - Rows, inline rename and drag selection
//! - [`ContextMenu`] - Right-click menu overlay

mod context_menu;
#[allow(clippy::module_inception)]
mod explorer;
mod file_list;
mod header;

pub use context_menu::ContextMenu;
pub use explorer::Explorer;
pub use file_list::FileList;
pub use header::Header;
