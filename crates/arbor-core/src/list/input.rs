//! Pointer and keyboard input.

use indexmap::IndexSet;

use super::{FileList, View};
use crate::command::{Command, KeyInput, Modifiers, RouteContext, route};
use crate::drag::{DragSelect, Point, Rect, RowLayout};
use crate::menu::{self, ContextMenu, MenuAction, MenuContext, MenuItem, MenuTarget};
use crate::request::Request;

/// Result of a key press.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyOutcome {
    /// Call `preventDefault` on the event.
    pub prevent_default: bool,
    pub command: Option<Command>,
    pub requests: Vec<Request>,
}

impl FileList {
    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select_single(&mut self, path: &str) {
        let order = self.render_order();
        self.selection.select_single(path, &order);
    }

    pub fn select_range(&mut self, path: &str) {
        let order = self.render_order();
        self.selection.select_range(path, &order);
    }

    pub fn toggle_selected(&mut self, path: &str) {
        let order = self.render_order();
        self.selection.toggle(path, &order);
    }

    pub fn select_all(&mut self) {
        let order = self.render_order();
        self.selection.select_all(&order);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Click on a row: shift extends, the primary modifier toggles, a plain
    /// click selects only that row.
    pub fn click(&mut self, path: &str, modifiers: Modifiers) {
        self.menu = None;
        if modifiers.shift {
            self.select_range(path);
        } else if modifiers.additive(self.platform) {
            self.toggle_selected(path);
        } else {
            self.select_single(path);
        }
    }

    /// Plain click on empty list background.
    pub fn click_background(&mut self) {
        self.menu = None;
        self.selection.clear();
    }

    // =========================================================================
    // Drag Selection
    // =========================================================================

    /// Mousedown on empty background, at a content point.
    ///
    /// Ignored while a drag is already running.
    pub fn begin_drag(&mut self, origin: Point, additive: bool) {
        if self.drag.is_some() {
            return;
        }
        self.menu = None;
        let base = if additive {
            self.selection.as_set().clone()
        } else {
            IndexSet::new()
        };
        self.drag = Some(DragSelect::start(origin, base, additive));
    }

    /// Pointer moved (or the container auto-scrolled) to a content point.
    pub fn update_drag(&mut self, current: Point, layout: &RowLayout) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.update(current);
        let order = self.render_order();
        if let Some(drag) = &self.drag {
            self.selection.replace(drag.compute(&order, layout));
        }
    }

    /// Mouseup. Returns whether a drag was active.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Rectangle of the active drag, in content coordinates.
    pub fn drag_rect(&self) -> Option<Rect> {
        self.drag.as_ref().map(DragSelect::rect)
    }

    // =========================================================================
    // Context Menu
    // =========================================================================

    /// Right-click at viewport coordinates.
    ///
    /// On an unselected entry the selection moves to that entry; on a
    /// selected one the selection is kept so the menu acts on all of it.
    pub fn open_context_menu(&mut self, x: f64, y: f64, target: MenuTarget) {
        if self.drag.is_some() {
            return;
        }
        if let MenuTarget::Entry(path) = &target
            && !self.selection.contains(path)
        {
            let path = path.clone();
            self.select_single(&path);
        }
        self.menu = Some(ContextMenu { x, y, target });
    }

    /// Clamp the open menu to the viewport once its size is known.
    pub fn clamp_context_menu(&mut self, width: f64, height: f64, vw: f64, vh: f64) {
        if let Some(menu) = self.menu.as_mut() {
            menu.clamp(width, height, vw, vh);
        }
    }

    pub fn close_context_menu(&mut self) {
        self.menu = None;
    }

    /// Items of the open menu.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let Some(open) = &self.menu else {
            return Vec::new();
        };
        let target_entry = match &open.target {
            MenuTarget::Entry(path) => self.entry(path),
            MenuTarget::Background => None,
        };
        let ctx = MenuContext {
            platform: self.platform,
            can_paste: self.clipboard.can_paste(),
            show_hidden: self.show_hidden,
            in_trash: self.view == View::Trash,
            target_is_dir: target_entry.as_ref().is_some_and(|e| e.is_dir),
            target_is_bundle: target_entry
                .as_ref()
                .is_some_and(|e| e.is_opaque_bundle(self.platform)),
        };
        menu::menu_items(&open.target, &ctx)
    }

    /// Run a menu action and close the menu.
    pub fn menu_action(&mut self, action: MenuAction) -> Vec<Request> {
        self.menu = None;
        match action {
            MenuAction::Open => self.open_selected(false),
            MenuAction::ShowContents => self.open_selected(true),
            MenuAction::Copy => {
                self.copy();
                Vec::new()
            }
            MenuAction::Cut => {
                self.cut();
                Vec::new()
            }
            MenuAction::Rename => {
                self.begin_rename();
                Vec::new()
            }
            MenuAction::MoveToTrash | MenuAction::DeletePermanently => self.delete_selected(),
            MenuAction::NewFile => self.create_file(),
            MenuAction::NewFolder => self.create_folder(),
            MenuAction::Paste => self.paste(),
            MenuAction::ToggleHidden => self.toggle_hidden(),
            MenuAction::Refresh => self.refresh(),
            MenuAction::Restore => self.restore_selected(),
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// State the key router needs.
    pub fn route_context(&self) -> RouteContext {
        let single_directory = self
            .selection
            .single()
            .and_then(|path| self.entry(path))
            .filter(|entry| self.view == View::Browse && entry.is_expandable(self.platform))
            .map(|entry| self.tree.is_expanded(&entry.path));
        RouteContext {
            platform: self.platform,
            selected: self.selection.len(),
            single_directory,
            can_paste: self.clipboard.can_paste(),
            editing: self.edit.is_some(),
            in_trash: self.view == View::Trash,
        }
    }

    /// Route and run one key press from the global listener.
    pub fn handle_key(&mut self, input: KeyInput) -> KeyOutcome {
        let dispatch = route(input, &self.route_context());
        let requests = match dispatch.command {
            Some(command) => self.execute(command),
            None => Vec::new(),
        };
        KeyOutcome {
            prevent_default: dispatch.prevent_default,
            command: dispatch.command,
            requests,
        }
    }

    /// Run a routed command.
    pub fn execute(&mut self, command: Command) -> Vec<Request> {
        log::debug!("command {:?}", command);
        match command {
            Command::Open { reveal } => self.open_selected(reveal),
            Command::Copy => {
                self.copy();
                Vec::new()
            }
            Command::Cut => {
                self.cut();
                Vec::new()
            }
            Command::Paste => self.paste(),
            Command::BeginRename => {
                self.begin_rename();
                Vec::new()
            }
            Command::CreateFile => self.create_file(),
            Command::CreateFolder => self.create_folder(),
            Command::SelectAll => {
                self.select_all();
                Vec::new()
            }
            Command::Delete => self.delete_selected(),
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::ZoomReset => self.zoom_reset(),
            Command::Expand => self.expand_selected(),
            Command::Collapse => self.collapse_selected(),
            Command::ClearSelection => {
                self.menu = None;
                self.clear_selection();
                Vec::new()
            }
            Command::ToggleHidden => self.toggle_hidden(),
        }
    }
}
