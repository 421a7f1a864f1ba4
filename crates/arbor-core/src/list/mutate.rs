//! Operations that change files, the tree or persisted preferences.

use super::{FileList, Focus, InlineEdit, View};
use crate::config::{DEFAULT_FILE_NAME, DEFAULT_FOLDER_NAME, zoom};
use crate::error::{FileListError, validate_name};
use crate::request::{Mutation, Request};
use crate::settings::{SettingKey, SettingValue, clamp_zoom};
use crate::snapshot::FetchMode;
use crate::sort::SortField;
use crate::tree::Toggle;

/// First of `base`, `base 2`, `base 3`, ... not in `taken`. The counter goes
/// before the extension (`New File 2.txt`).
pub fn unique_name<'a>(base: &str, taken: impl Iterator<Item = &'a str> + Clone) -> String {
    let is_free = |name: &str| !taken.clone().any(|t| t == name);
    if is_free(base) {
        return base.to_string();
    }
    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    };
    (2..)
        .map(|n| match ext {
            Some(ext) => format!("{} {}.{}", stem, n, ext),
            None => format!("{} {}", stem, n),
        })
        .find(|candidate| is_free(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

impl FileList {
    // =========================================================================
    // Clipboard
    // =========================================================================

    /// Copy the selection.
    pub fn copy(&mut self) {
        let paths = self.selection.to_vec();
        self.clipboard.copy(paths);
    }

    /// Cut the selection.
    pub fn cut(&mut self) {
        let paths = self.selection.to_vec();
        self.clipboard.cut(paths);
    }

    /// One transfer per clipboard source into the current directory.
    pub fn paste(&mut self) -> Vec<Request> {
        if self.view != View::Browse {
            return Vec::new();
        }
        let Some(dir) = self.current.as_deref() else {
            return Vec::new();
        };
        self.clipboard
            .transfers(dir)
            .into_iter()
            .map(|t| Request::Mutate(Mutation::Transfer(t)))
            .collect()
    }

    // =========================================================================
    // Create / Rename
    // =========================================================================

    pub fn create_file(&mut self) -> Vec<Request> {
        self.create(DEFAULT_FILE_NAME, false)
    }

    pub fn create_folder(&mut self) -> Vec<Request> {
        self.create(DEFAULT_FOLDER_NAME, true)
    }

    /// Create an item with a free default name in the current directory. The
    /// rename editor opens on it once it is listed.
    fn create(&mut self, base: &str, directory: bool) -> Vec<Request> {
        if self.view != View::Browse {
            return Vec::new();
        }
        let Some(parent) = self.current.clone() else {
            return Vec::new();
        };
        let existing = self.cache.entries(&parent).unwrap_or_default();
        let name = unique_name(base, existing.iter().map(|e| e.name.as_str()));
        let mutation = if directory {
            Mutation::CreateDirectory { parent, name }
        } else {
            Mutation::CreateFile { parent, name }
        };
        vec![Request::Mutate(mutation)]
    }

    /// Open the rename editor on the single selected entry.
    pub fn begin_rename(&mut self) -> bool {
        match self.selection.single().map(str::to_string) {
            Some(path) => self.begin_rename_path(&path),
            None => false,
        }
    }

    /// Open the rename editor on `path`.
    pub fn begin_rename_path(&mut self, path: &str) -> bool {
        if self.view != View::Browse {
            return false;
        }
        let Some(entry) = self.entry(path) else {
            return false;
        };
        self.menu = None;
        self.edit = Some(InlineEdit {
            path: entry.path,
            original: entry.name.clone(),
            value: entry.name,
        });
        true
    }

    pub fn set_edit_value(&mut self, value: &str) {
        if let Some(edit) = self.edit.as_mut() {
            edit.value = value.to_string();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Commit the rename editor.
    ///
    /// The editor always closes. An empty or invalid name is reported and
    /// nothing is sent; an unchanged name is a no-op.
    pub fn commit_edit(&mut self) -> Vec<Request> {
        let Some(edit) = self.edit.take() else {
            return Vec::new();
        };
        let name = match validate_name(&edit.value) {
            Ok(name) => name,
            Err(err) => {
                self.report(FileListError::Validation(err));
                return Vec::new();
            }
        };
        if name == edit.original {
            return Vec::new();
        }
        vec![Request::Mutate(Mutation::Rename {
            path: edit.path,
            new_name: name.to_string(),
        })]
    }

    // =========================================================================
    // Delete / Trash
    // =========================================================================

    /// Delete the selection: move to trash while browsing, delete
    /// permanently in the trash view. One request per item.
    pub fn delete_selected(&mut self) -> Vec<Request> {
        let paths = self.selection.to_vec();
        match self.view {
            View::Browse => paths
                .into_iter()
                .map(|path| Request::Mutate(Mutation::MoveToTrash { path }))
                .collect(),
            View::Trash => paths
                .iter()
                .flat_map(|path| self.delete_permanently(path))
                .collect(),
        }
    }

    pub fn open_trash(&mut self) -> Vec<Request> {
        self.view = View::Trash;
        self.selection.clear();
        self.edit = None;
        self.menu = None;
        self.drag = None;
        self.trash.exit_when_empty = false;
        vec![self.request_trash()]
    }

    /// Return to the current directory, refreshing it.
    pub fn close_trash(&mut self) -> Vec<Request> {
        if self.view != View::Trash {
            return Vec::new();
        }
        self.view = View::Browse;
        self.selection.clear();
        self.menu = None;
        self.trash.exit_when_empty = false;
        self.request_top(FetchMode::IfIdle).into_iter().collect()
    }

    /// Restore one trashed item. Only valid in the trash view.
    pub fn restore(&mut self, path: &str) -> Vec<Request> {
        if self.view != View::Trash {
            return Vec::new();
        }
        vec![Request::Mutate(Mutation::RestoreFromTrash {
            path: path.to_string(),
        })]
    }

    pub fn restore_selected(&mut self) -> Vec<Request> {
        let paths = self.selection.to_vec();
        paths.iter().flat_map(|p| self.restore(p)).collect()
    }

    /// Permanently delete one trashed item. Only valid in the trash view.
    pub fn delete_permanently(&mut self, path: &str) -> Vec<Request> {
        if self.view != View::Trash {
            return Vec::new();
        }
        vec![Request::Mutate(Mutation::DeletePermanently {
            path: path.to_string(),
        })]
    }

    // =========================================================================
    // Open
    // =========================================================================

    /// Open one entry: directories are navigated into, files and bundles go
    /// to the default application. `reveal` navigates into a bundle instead.
    pub fn open(&mut self, path: &str, reveal: bool) -> Vec<Request> {
        if self.view != View::Browse {
            return Vec::new();
        }
        let Some(entry) = self.entry(path) else {
            return Vec::new();
        };
        let bundle = entry.is_opaque_bundle(self.platform);
        if entry.is_dir && (!bundle || reveal) {
            self.navigate(&entry.path)
        } else {
            vec![Request::Open { path: entry.path }]
        }
    }

    /// Open the selection. Files and bundles are all opened; the first
    /// directory, if any, is navigated into last.
    pub fn open_selected(&mut self, reveal: bool) -> Vec<Request> {
        if self.view != View::Browse {
            return Vec::new();
        }
        let mut requests = Vec::new();
        let mut directory = None;
        for path in self.selection.to_vec() {
            let Some(entry) = self.entry(&path) else {
                continue;
            };
            let navigable = entry.is_dir && (reveal || !entry.is_opaque_bundle(self.platform));
            if navigable {
                directory.get_or_insert(entry.path);
            } else {
                requests.push(Request::Open { path: entry.path });
            }
        }
        if let Some(dir) = directory {
            requests.extend(self.navigate(&dir));
        }
        requests
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Expand or collapse a rendered directory.
    pub fn toggle_expand(&mut self, path: &str) -> Vec<Request> {
        if self.view != View::Browse {
            return Vec::new();
        }
        let Some(entry) = self.entry(path) else {
            return Vec::new();
        };
        let old_order = self.render_order();
        let mut requests = Vec::new();
        match self.tree.toggle(&entry, self.platform, &mut self.cache) {
            Toggle::Ignored => return requests,
            Toggle::Expanded(ticket) => {
                requests.extend(ticket.map(|t| self.child_request(t)));
                // nested expanded directories whose children are not cached
                let children = self.cache.entries(&entry.path).map(<[_]>::to_vec);
                if let Some(children) = children {
                    let tickets = self.tree.propagate(
                        &children,
                        &mut self.cache,
                        self.platform,
                        FetchMode::IfMissing,
                    );
                    requests.extend(tickets.into_iter().map(|t| self.child_request(t)));
                }
            }
            Toggle::Collapsed => {}
        }
        // rows were inserted or removed above the anchor
        let order = self.render_order();
        self.selection.prune(&old_order, &order);
        requests.push(self.store_expanded());
        requests
    }

    pub fn expand_selected(&mut self) -> Vec<Request> {
        match self.selection.single().map(str::to_string) {
            Some(path) if !self.tree.is_expanded(&path) => self.toggle_expand(&path),
            _ => Vec::new(),
        }
    }

    pub fn collapse_selected(&mut self) -> Vec<Request> {
        match self.selection.single().map(str::to_string) {
            Some(path) if self.tree.is_expanded(&path) => self.toggle_expand(&path),
            _ => Vec::new(),
        }
    }

    pub(super) fn store_expanded(&self) -> Request {
        Request::StoreSetting {
            key: SettingKey::ExpandedFolders,
            value: SettingValue::Expanded(self.tree.to_map()),
        }
    }

    // =========================================================================
    // View Options
    // =========================================================================

    /// Flip hidden-file visibility and refetch the current directory and
    /// every visible expanded directory.
    pub fn toggle_hidden(&mut self) -> Vec<Request> {
        self.show_hidden = !self.show_hidden;
        self.cache.invalidate_all();
        let mut requests: Vec<Request> = self.request_top(FetchMode::Always).into_iter().collect();
        let top = self
            .current
            .as_deref()
            .and_then(|p| self.cache.entries(p))
            .map(<[_]>::to_vec)
            .unwrap_or_default();
        let tickets = self
            .tree
            .propagate(&top, &mut self.cache, self.platform, FetchMode::Always);
        requests.extend(tickets.into_iter().map(|t| self.child_request(t)));
        requests
    }

    /// Sort by `field`; picking the active field flips the direction.
    pub fn set_sort_field(&mut self, field: SortField) -> Vec<Request> {
        let old_order = self.render_order();
        self.sort = self.sort.toggled(field);
        self.sort_touched = true;
        let order = self.render_order();
        self.selection.prune(&old_order, &order);

        match (&self.current, self.view) {
            (Some(path), View::Browse) => vec![Request::StoreSetting {
                key: SettingKey::SortPreference(path.clone()),
                value: SettingValue::Sort(self.sort),
            }],
            _ => Vec::new(),
        }
    }

    pub fn zoom_in(&mut self) -> Vec<Request> {
        self.set_zoom(self.zoom + zoom::STEP)
    }

    pub fn zoom_out(&mut self) -> Vec<Request> {
        self.set_zoom(self.zoom - zoom::STEP)
    }

    pub fn zoom_reset(&mut self) -> Vec<Request> {
        self.set_zoom(zoom::DEFAULT)
    }

    /// Set the zoom factor, clamped and rounded to two decimals.
    pub fn set_zoom(&mut self, level: f64) -> Vec<Request> {
        let level = (clamp_zoom(level) * 100.0).round() / 100.0;
        if level == self.zoom {
            return Vec::new();
        }
        self.zoom = level;
        vec![Request::StoreSetting {
            key: SettingKey::ZoomLevel,
            value: SettingValue::Zoom(level),
        }]
    }

    pub(super) fn focus_on(&mut self, path: &str, rename: bool) {
        self.focus = Some(Focus {
            path: path.to_string(),
            rename,
        });
        self.reveal = Some(path.to_string());
    }
}
