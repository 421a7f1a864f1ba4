//! The file list controller.
//!
//! [`FileList`] owns every piece of interaction state: the snapshot cache,
//! expansion, sort preference, selection, clipboard, history, inline edit,
//! context menu and trash view. It is constructed on mount and torn down on
//! unmount; nothing here is global.
//!
//! Operations that need the host return [`Request`]s. Results come back
//! through [`FileList::complete`].
//!
//! - `input` - selection, drag selection, keyboard routing, context menu
//! - `mutate` - clipboard, create/rename/delete, trash, tree, sort, zoom
//! - `complete` - applying completions

mod complete;
mod input;
mod mutate;

#[cfg(test)]
mod tests;

use crate::clipboard::Clipboard;
use crate::config::zoom;
use crate::drag::DragSelect;
use crate::entry::Entry;
use crate::error::FileListError;
use crate::history::History;
use crate::menu::ContextMenu;
use crate::platform::Platform;
use crate::render::{Composer, Row, flat_rows, render_order};
use crate::request::{ListOrigin, NavToken, Request};
use crate::selection::Selection;
use crate::settings::SettingKey;
use crate::snapshot::{FetchMode, FetchTicket, SnapshotCache};
use crate::sort::SortPreference;
use crate::tree::TreeState;

pub use input::KeyOutcome;

/// Which listing the list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Browse,
    Trash,
}

/// Inline rename in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineEdit {
    pub path: String,
    /// Name before editing.
    pub original: String,
    /// Current text of the field.
    pub value: String,
}

/// Path to select once it shows up in the render order.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Focus {
    path: String,
    /// Open the rename editor on it (newly created items).
    rename: bool,
}

/// Trash listing state.
#[derive(Clone, Debug, Default)]
struct TrashState {
    entries: Vec<Entry>,
    loaded: bool,
    generation: u64,
    pending: bool,
    /// Leave the trash view when the next listing comes back empty.
    exit_when_empty: bool,
}

/// File list controller.
#[derive(Debug)]
pub struct FileList {
    platform: Platform,
    home: Option<String>,
    drives: Vec<String>,

    current: Option<String>,
    nav: NavToken,
    history: History,
    outside_home: bool,

    cache: SnapshotCache,
    tree: TreeState,
    show_hidden: bool,
    sort: SortPreference,
    /// The user picked a sort since the last navigation.
    sort_touched: bool,

    selection: Selection,
    clipboard: Clipboard,
    drag: Option<DragSelect>,
    menu: Option<ContextMenu>,
    edit: Option<InlineEdit>,
    focus: Option<Focus>,
    reveal: Option<String>,

    view: View,
    trash: TrashState,
    zoom: f64,
    error: Option<FileListError>,
    torn_down: bool,
}

impl Default for FileList {
    fn default() -> Self {
        Self::new()
    }
}

impl FileList {
    pub fn new() -> Self {
        Self {
            platform: Platform::default(),
            home: None,
            drives: Vec::new(),
            current: None,
            nav: NavToken::default(),
            history: History::new(),
            outside_home: false,
            cache: SnapshotCache::new(),
            tree: TreeState::new(),
            show_hidden: false,
            sort: SortPreference::default(),
            sort_touched: false,
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            drag: None,
            menu: None,
            edit: None,
            focus: None,
            reveal: None,
            view: View::Browse,
            trash: TrashState::default(),
            zoom: zoom::DEFAULT,
            error: None,
            torn_down: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Initial requests: platform, home directory, drives, persisted zoom and
    /// expansion, and the trash count for the sidebar.
    pub fn mount(&mut self) -> Vec<Request> {
        self.torn_down = false;
        let mut requests = vec![
            Request::Platform,
            Request::HomeDirectory,
            Request::ListDrives,
            Request::LoadSetting {
                key: SettingKey::ZoomLevel,
                nav: self.nav,
            },
            Request::LoadSetting {
                key: SettingKey::ExpandedFolders,
                nav: self.nav,
            },
        ];
        requests.push(self.request_trash());
        requests
    }

    /// Stop background work. Later completions are still applied so the
    /// state stays consistent, but [`tick`](Self::tick) issues nothing.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.drag = None;
        self.menu = None;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to `path`, recording it in history.
    pub fn navigate(&mut self, path: &str) -> Vec<Request> {
        self.history.push(path);
        self.load_directory(path)
    }

    pub fn go_back(&mut self) -> Vec<Request> {
        match self.history.back().map(str::to_string) {
            Some(path) => self.load_directory(&path),
            None => Vec::new(),
        }
    }

    pub fn go_forward(&mut self) -> Vec<Request> {
        match self.history.forward().map(str::to_string) {
            Some(path) => self.load_directory(&path),
            None => Vec::new(),
        }
    }

    /// Ask the host for the parent of the current directory; navigation
    /// happens when it answers.
    pub fn navigate_up(&mut self) -> Vec<Request> {
        match &self.current {
            Some(path) => vec![Request::ParentDirectory {
                of: path.clone(),
                nav: self.nav,
            }],
            None => Vec::new(),
        }
    }

    pub fn navigate_home(&mut self) -> Vec<Request> {
        match self.home.clone() {
            Some(home) => self.navigate(&home),
            None => vec![Request::HomeDirectory],
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Switch the top-level view to `path` without touching history.
    fn load_directory(&mut self, path: &str) -> Vec<Request> {
        self.nav = self.nav.next();
        self.current = Some(path.to_string());
        self.view = View::Browse;
        self.selection.clear();
        self.sort = SortPreference::default();
        self.sort_touched = false;
        self.drag = None;
        self.menu = None;
        self.edit = None;
        self.focus = None;
        self.reveal = None;
        self.outside_home = false;
        log::debug!("navigate {} (nav {})", path, self.nav.0);

        let mut requests: Vec<Request> = self.request_top(FetchMode::Always).into_iter().collect();
        requests.push(Request::LoadSetting {
            key: SettingKey::SortPreference(path.to_string()),
            nav: self.nav,
        });
        requests.push(Request::CheckWithinHome {
            path: path.to_string(),
            nav: self.nav,
        });
        requests
    }

    /// Listing request for the current directory.
    fn request_top(&mut self, mode: FetchMode) -> Option<Request> {
        let path = self.current.clone()?;
        let ticket = self.cache.begin(&path, mode)?;
        Some(Request::ListDirectory {
            ticket,
            show_hidden: self.show_hidden,
            origin: ListOrigin::TopLevel(self.nav),
        })
    }

    /// Listing request for an expanded directory.
    fn child_request(&self, ticket: FetchTicket) -> Request {
        Request::ListDirectory {
            ticket,
            show_hidden: self.show_hidden,
            origin: ListOrigin::Child,
        }
    }

    fn request_trash(&mut self) -> Request {
        self.trash.generation += 1;
        self.trash.pending = true;
        Request::ListTrash {
            generation: self.trash.generation,
        }
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Periodic background refresh of the current directory.
    ///
    /// Suppressed after teardown, in the trash view, and while a drag
    /// selection or context menu is active.
    pub fn tick(&mut self) -> Vec<Request> {
        if self.torn_down || self.drag.is_some() || self.menu.is_some() || self.view == View::Trash
        {
            return Vec::new();
        }
        self.request_top(FetchMode::IfIdle).into_iter().collect()
    }

    /// User-initiated refresh of whatever is shown.
    pub fn refresh(&mut self) -> Vec<Request> {
        match self.view {
            View::Browse => self.request_top(FetchMode::Always).into_iter().collect(),
            View::Trash => vec![self.request_trash()],
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Rows to render, in render order.
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = self.base_rows();
        for row in &mut rows {
            row.selected = self.selection.contains(&row.entry.path);
            row.cut = self.clipboard.is_cut(&row.entry.path);
            row.editing = self
                .edit
                .as_ref()
                .is_some_and(|e| e.path == row.entry.path);
        }
        rows
    }

    fn base_rows(&self) -> Vec<Row> {
        match self.view {
            View::Trash => flat_rows(&self.trash.entries, self.sort),
            View::Browse => {
                let Some(top) = self.current.as_deref().and_then(|p| self.cache.entries(p)) else {
                    return Vec::new();
                };
                Composer {
                    cache: &self.cache,
                    tree: &self.tree,
                    preference: self.sort,
                    platform: self.platform,
                }
                .compose(top)
            }
        }
    }

    /// Paths in render order.
    pub fn render_order(&self) -> Vec<String> {
        render_order(&self.base_rows())
    }

    /// Rendered entry at `path`.
    pub fn entry(&self, path: &str) -> Option<Entry> {
        self.base_rows()
            .into_iter()
            .find(|row| row.entry.path == path)
            .map(|row| row.entry)
    }

    /// Path to scroll into view, once it is rendered. Cleared when taken.
    pub fn take_reveal(&mut self) -> Option<String> {
        let path = self.reveal.as_ref()?;
        if !self.render_order().contains(path) {
            return None;
        }
        self.reveal.take()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn home(&self) -> Option<&str> {
        self.home.as_deref()
    }

    pub fn drives(&self) -> &[String] {
        &self.drives
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn nav_token(&self) -> NavToken {
        self.nav
    }

    /// The current directory lies outside the home directory.
    pub fn is_outside_home(&self) -> bool {
        self.outside_home
    }

    /// The current directory's listing is being fetched.
    pub fn is_loading(&self) -> bool {
        match self.view {
            View::Browse => self
                .current
                .as_deref()
                .is_some_and(|p| self.cache.is_loading(p) && self.cache.entries(p).is_none()),
            View::Trash => self.trash.pending && !self.trash.loaded,
        }
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn sort_preference(&self) -> SortPreference {
        self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn can_paste(&self) -> bool {
        self.clipboard.can_paste()
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn tree(&self) -> &TreeState {
        &self.tree
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.tree.is_expanded(path)
    }

    pub fn edit(&self) -> Option<&InlineEdit> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn in_trash(&self) -> bool {
        self.view == View::Trash
    }

    pub fn trash_entries(&self) -> &[Entry] {
        &self.trash.entries
    }

    pub fn trash_count(&self) -> usize {
        self.trash.entries.len()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Most recent error, if not dismissed.
    pub fn error(&self) -> Option<&FileListError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Number of entries in the current directory (not counting children).
    pub fn item_count(&self) -> usize {
        match self.view {
            View::Trash => self.trash.entries.len(),
            View::Browse => self
                .current
                .as_deref()
                .and_then(|p| self.cache.entries(p))
                .map_or(0, <[Entry]>::len),
        }
    }

    fn report(&mut self, error: FileListError) {
        log::warn!("{}", error);
        self.error = Some(error);
    }
}
