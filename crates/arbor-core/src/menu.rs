//! Context menu model.

use crate::platform::Platform;

/// What was right-clicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuTarget {
    Entry(String),
    Background,
}

/// An open context menu at viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
    pub x: f64,
    pub y: f64,
    pub target: MenuTarget,
}

impl ContextMenu {
    /// Move the menu so a `width` x `height` box stays inside the viewport.
    pub fn clamp(&mut self, width: f64, height: f64, viewport_width: f64, viewport_height: f64) {
        self.x = clamp_axis(self.x, width, viewport_width);
        self.y = clamp_axis(self.y, height, viewport_height);
    }
}

fn clamp_axis(pos: f64, size: f64, limit: f64) -> f64 {
    if pos + size > limit {
        (limit - size).max(0.0)
    } else {
        pos.max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Open,
    /// Navigate into an opaque bundle.
    ShowContents,
    Copy,
    Cut,
    Rename,
    MoveToTrash,
    NewFile,
    NewFolder,
    Paste,
    ToggleHidden,
    Refresh,
    Restore,
    DeletePermanently,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Action {
        action: MenuAction,
        label: String,
        shortcut: Option<String>,
        danger: bool,
    },
    Separator,
}

impl MenuItem {
    fn action(action: MenuAction, label: &str, shortcut: Option<String>) -> Self {
        Self::Action {
            action,
            label: label.to_string(),
            shortcut,
            danger: matches!(action, MenuAction::MoveToTrash | MenuAction::DeletePermanently),
        }
    }
}

/// Facts about the clicked entry and the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuContext {
    pub platform: Platform,
    pub can_paste: bool,
    pub show_hidden: bool,
    pub in_trash: bool,
    /// The clicked entry is a directory.
    pub target_is_dir: bool,
    /// The clicked entry is an opaque bundle.
    pub target_is_bundle: bool,
}

/// Items for a menu opened on `target`.
pub fn menu_items(target: &MenuTarget, ctx: &MenuContext) -> Vec<MenuItem> {
    let key = |k: &str| Some(ctx.platform.shortcut(k));
    let mut items = Vec::new();

    if ctx.in_trash {
        if matches!(target, MenuTarget::Entry(_)) {
            items.push(MenuItem::action(MenuAction::Restore, "Restore", None));
            items.push(MenuItem::action(
                MenuAction::DeletePermanently,
                "Delete Permanently",
                None,
            ));
            items.push(MenuItem::Separator);
        }
        items.push(MenuItem::action(MenuAction::Refresh, "Refresh", None));
        return items;
    }

    if matches!(target, MenuTarget::Entry(_)) {
        let open_label = if ctx.target_is_dir && !ctx.target_is_bundle {
            "Open"
        } else {
            "Open with default app"
        };
        items.push(MenuItem::action(MenuAction::Open, open_label, key("O")));
        if ctx.target_is_bundle {
            items.push(MenuItem::action(
                MenuAction::ShowContents,
                "Show Package Contents",
                key("Shift+O"),
            ));
        }
        items.push(MenuItem::action(MenuAction::Copy, "Copy", key("C")));
        items.push(MenuItem::action(MenuAction::Cut, "Cut", key("X")));
        items.push(MenuItem::Separator);
        items.push(MenuItem::action(MenuAction::Rename, "Rename", key("R")));
        let delete_key = if ctx.platform.uses_command_key() {
            key("⌫")
        } else {
            Some("Del".to_string())
        };
        items.push(MenuItem::action(MenuAction::MoveToTrash, "Move to Trash", delete_key));
        items.push(MenuItem::Separator);
    }

    items.push(MenuItem::action(MenuAction::NewFile, "New File", key("N")));
    items.push(MenuItem::action(MenuAction::NewFolder, "New Folder", key("Shift+N")));
    if ctx.can_paste {
        items.push(MenuItem::Separator);
        items.push(MenuItem::action(MenuAction::Paste, "Paste", key("V")));
    }
    items.push(MenuItem::Separator);
    let hidden_label = if ctx.show_hidden {
        "Hide Hidden Files"
    } else {
        "Show Hidden Files"
    };
    items.push(MenuItem::action(MenuAction::ToggleHidden, hidden_label, key("H")));
    if *target == MenuTarget::Background {
        items.push(MenuItem::action(MenuAction::Refresh, "Refresh", None));
    }
    items
}
