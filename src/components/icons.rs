//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use arbor_core::{Entry, Platform};
use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowDown as SortDescending, LuArrowUp as SortAscending, LuChevronDown as ChevronDown,
        LuChevronLeft as ChevronLeft, LuChevronRight as ChevronRight,
        LuCornerLeftUp as ParentDir, LuEllipsisVertical as More, LuEye as Eye,
        LuEyeOff as EyeOff, LuFile as File, LuFileCode as FileCode, LuFileImage as FileImage,
        LuFileText as FileText, LuFolder as Folder, LuFolderOpen as FolderOpen,
        LuHardDrive as Drive, LuHouse as Home, LuPackage as Bundle, LuPlus as Plus,
        LuRefreshCw as Refresh, LuTrash2 as Trash, LuTriangleAlert as Warning,
        LuUndo2 as Restore, LuX as Close, LuZoomIn as ZoomIn, LuZoomOut as ZoomOut,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowCounterclockwise as Restore,
        BsArrowDown as SortDescending, BsArrowUp as SortAscending, BsArrowUpLeft as ParentDir,
        BsBox as Bundle, BsChevronDown as ChevronDown, BsChevronLeft as ChevronLeft,
        BsChevronRight as ChevronRight, BsExclamationTriangle as Warning, BsEye as Eye,
        BsEyeSlash as EyeOff, BsFileEarmark as File, BsFileEarmarkCode as FileCode,
        BsFileEarmarkImage as FileImage, BsFileEarmarkText as FileText,
        BsFolder2Open as FolderOpen, BsFolderFill as Folder, BsHdd as Drive,
        BsHouseFill as Home, BsPlusLg as Plus, BsThreeDotsVertical as More, BsTrash as Trash,
        BsXLg as Close, BsZoomIn as ZoomIn, BsZoomOut as ZoomOut,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(PARENT_DIR, ParentDir);
themed_icon!(HOME, Home);
themed_icon!(DRIVE, Drive);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(BUNDLE, Bundle);
themed_icon!(FILE, File);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(FILE_CODE, FileCode);
themed_icon!(PLUS, Plus);
themed_icon!(MORE, More);
themed_icon!(TRASH, Trash);
themed_icon!(RESTORE, Restore);
themed_icon!(EYE, Eye);
themed_icon!(EYE_OFF, EyeOff);
themed_icon!(ZOOM_IN, ZoomIn);
themed_icon!(ZOOM_OUT, ZoomOut);
themed_icon!(REFRESH, Refresh);
themed_icon!(SORT_ASCENDING, SortAscending);
themed_icon!(SORT_DESCENDING, SortDescending);
themed_icon!(WARNING, Warning);
themed_icon!(CLOSE, Close);

// =============================================================================
// Entry Icons
// =============================================================================

const TEXT_KINDS: &[&str] = &["txt", "md", "markdown", "rtf", "log", "csv", "pdf"];
const IMAGE_KINDS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico"];
const CODE_KINDS: &[&str] = &[
    "rs", "js", "ts", "tsx", "jsx", "py", "go", "c", "h", "cpp", "java", "json", "toml", "yaml",
    "yml", "html", "css", "sh",
];

/// Icon for a list row.
pub fn entry_icon(entry: &Entry, platform: Platform, expanded: bool) -> Icon {
    if entry.is_opaque_bundle(platform) {
        return BUNDLE;
    }
    if entry.is_dir {
        return if expanded { FOLDER_OPEN } else { FOLDER };
    }
    let kind = entry.kind.to_ascii_lowercase();
    if TEXT_KINDS.contains(&kind.as_str()) {
        FILE_TEXT
    } else if IMAGE_KINDS.contains(&kind.as_str()) {
        FILE_IMAGE
    } else if CODE_KINDS.contains(&kind.as_str()) {
        FILE_CODE
    } else {
        FILE
    }
}
