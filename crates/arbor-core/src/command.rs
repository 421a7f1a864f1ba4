//! Keyboard command router.
//!
//! Maps a platform-aware key combination plus the current list state to a
//! [`Command`]. The primary modifier is Cmd (meta) on macOS and Ctrl
//! everywhere else.
//!
//! | Input                         | Condition                          | Command          |
//! |-------------------------------|------------------------------------|------------------|
//! | Primary+O (+Shift)            | one or more selected               | `Open`           |
//! | Primary+C / Primary+X         | selection non-empty                | `Copy` / `Cut`   |
//! | Primary+V                     | paste available                    | `Paste`          |
//! | Primary+R                     | exactly one selected               | `BeginRename`    |
//! | Primary+N (+Shift)            |                                    | `CreateFile` / `CreateFolder` |
//! | Primary+A                     |                                    | `SelectAll`      |
//! | Primary+Backspace (macOS), Delete (others) | selection non-empty   | `Delete`         |
//! | Primary+= / - / 0             |                                    | zoom in/out/reset |
//! | Primary+H                     |                                    | `ToggleHidden`   |
//! | ArrowRight / ArrowLeft        | one collapsed / expanded directory | `Expand` / `Collapse` |
//! | Escape                        |                                    | `ClearSelection` |

use crate::platform::Platform;

/// Key identity, normalized from DOM `KeyboardEvent.key`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable key, lowercased.
    Char(char),
    Backspace,
    Delete,
    Escape,
    Enter,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Other,
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c.to_ascii_lowercase()),
                    _ => Self::Other,
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Whether the platform's primary modifier is held.
    pub fn primary(&self, platform: Platform) -> bool {
        if platform.uses_command_key() {
            self.meta
        } else {
            self.ctrl
        }
    }

    /// Modifier that makes a click additive (toggle / additive drag).
    pub fn additive(&self, platform: Platform) -> bool {
        self.primary(platform)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `reveal` opens bundle contents instead of launching them.
    Open { reveal: bool },
    Copy,
    Cut,
    Paste,
    BeginRename,
    CreateFile,
    CreateFolder,
    SelectAll,
    Delete,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    Expand,
    Collapse,
    ClearSelection,
    ToggleHidden,
}

/// State the router consults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub platform: Platform,
    pub selected: usize,
    /// `Some(expanded)` when exactly one expandable directory is selected.
    pub single_directory: Option<bool>,
    pub can_paste: bool,
    /// An inline rename field owns the keyboard.
    pub editing: bool,
    pub in_trash: bool,
}

/// Routing outcome. `prevent_default` is set for every recognized
/// combination, even when its condition does not hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub command: Option<Command>,
    pub prevent_default: bool,
}

impl Dispatch {
    const IGNORED: Self = Self {
        command: None,
        prevent_default: false,
    };

    fn matched(command: Option<Command>) -> Self {
        Self {
            command,
            prevent_default: true,
        }
    }
}

/// Route one key press.
pub fn route(input: KeyInput, ctx: &RouteContext) -> Dispatch {
    if ctx.editing {
        return Dispatch::IGNORED;
    }
    let mods = input.modifiers;
    let primary = mods.primary(ctx.platform);
    let mac = ctx.platform.uses_command_key();
    let has_selection = ctx.selected > 0;
    let browsing = !ctx.in_trash;

    let when = |cond: bool, command: Command| Dispatch::matched(cond.then_some(command));

    if primary {
        return match input.key {
            Key::Char('o') => when(has_selection, Command::Open { reveal: mods.shift }),
            Key::Char('c') => when(has_selection && browsing, Command::Copy),
            Key::Char('x') => when(has_selection && browsing, Command::Cut),
            Key::Char('v') => when(ctx.can_paste && browsing, Command::Paste),
            Key::Char('r') => when(ctx.selected == 1 && browsing, Command::BeginRename),
            Key::Char('n') if mods.shift => when(browsing, Command::CreateFolder),
            Key::Char('n') => when(browsing, Command::CreateFile),
            Key::Char('a') => when(true, Command::SelectAll),
            Key::Char('h') => when(browsing, Command::ToggleHidden),
            Key::Char('=') | Key::Char('+') => when(true, Command::ZoomIn),
            Key::Char('-') => when(true, Command::ZoomOut),
            Key::Char('0') => when(true, Command::ZoomReset),
            Key::Backspace if mac => when(has_selection, Command::Delete),
            _ => Dispatch::IGNORED,
        };
    }

    if mods.ctrl || mods.meta || mods.alt {
        return Dispatch::IGNORED;
    }

    match input.key {
        Key::Delete if !mac => when(has_selection, Command::Delete),
        Key::ArrowRight => when(ctx.single_directory == Some(false), Command::Expand),
        Key::ArrowLeft => when(ctx.single_directory == Some(true), Command::Collapse),
        Key::Escape => when(true, Command::ClearSelection),
        _ => Dispatch::IGNORED,
    }
}
