//! Applying completions.
//!
//! Every handler first checks that the completion still matches what the
//! controller is waiting for (fetch ticket, navigation token, trash
//! generation) and drops it otherwise.

use super::{FileList, View};
use crate::clipboard::ClipboardMode;
use crate::entry::Entry;
use crate::error::{BackendError, FileListError, SettingsError};
use crate::platform::Platform;
use crate::request::{Completion, ListOrigin, Mutation, NavToken, Request};
use crate::settings::{SettingKey, SettingValue};
use crate::snapshot::{Applied, FetchMode, FetchTicket};

impl FileList {
    /// Apply one completion. Returns follow-up requests.
    pub fn complete(&mut self, completion: Completion) -> Vec<Request> {
        match completion {
            Completion::Listed {
                ticket,
                origin,
                result,
            } => self.on_listed(ticket, origin, result),
            Completion::TrashListed { generation, result } => {
                self.on_trash_listed(generation, result)
            }
            Completion::Home(result) => self.on_home(result),
            Completion::Parent { nav, result } => self.on_parent(nav, result),
            Completion::Drives(result) => {
                match result {
                    Ok(drives) => self.drives = drives,
                    Err(err) => log::warn!("could not list drives: {}", err),
                }
                Vec::new()
            }
            Completion::WithinHome { path, nav, result } => {
                if nav == self.nav && self.current.as_deref() == Some(path.as_str()) {
                    self.outside_home = match result {
                        Ok(within) => !within,
                        Err(err) => {
                            log::warn!("could not check home containment of {}: {}", path, err);
                            false
                        }
                    };
                }
                Vec::new()
            }
            Completion::Platform(result) => {
                match result {
                    Ok(id) => self.platform = Platform::from_identifier(&id),
                    Err(err) => log::warn!("could not detect platform: {}", err),
                }
                Vec::new()
            }
            Completion::Mutated { mutation, result } => self.on_mutated(mutation, result),
            Completion::Opened { path, result } => {
                if let Err(source) = result {
                    self.report(FileListError::Open { path, source });
                }
                Vec::new()
            }
            Completion::SettingLoaded { key, nav, result } => {
                self.on_setting_loaded(key, nav, result)
            }
            Completion::SettingStored { key, result } => {
                if let Err(err) = result {
                    // in-memory state stays authoritative
                    log::error!("could not persist {}: {}", key, err);
                    self.error = Some(FileListError::Settings(err));
                }
                Vec::new()
            }
        }
    }

    fn on_listed(
        &mut self,
        ticket: FetchTicket,
        origin: ListOrigin,
        result: Result<Vec<Entry>, BackendError>,
    ) -> Vec<Request> {
        let old_order = self.render_order();
        let path = ticket.path.clone();

        match self.cache.complete(&ticket, result) {
            Applied::Stale => {
                log::debug!("discarding stale listing of {} (gen {})", path, ticket.generation);
                return Vec::new();
            }
            Applied::Failed(source) => {
                self.report(FileListError::Fetch {
                    path: path.clone(),
                    source,
                });
            }
            Applied::Fresh => {}
        }

        let is_current = self.current.as_deref() == Some(path.as_str());
        let mode = match origin {
            ListOrigin::TopLevel(nav) if nav == self.nav && is_current => Some(FetchMode::IfIdle),
            ListOrigin::Child if self.tree.is_expanded(&path) => Some(FetchMode::IfMissing),
            _ => None,
        };

        let mut requests = Vec::new();
        if let Some(mode) = mode {
            let entries = self.cache.entries(&path).map(<[_]>::to_vec).unwrap_or_default();
            let tickets = self
                .tree
                .propagate(&entries, &mut self.cache, self.platform, mode);
            requests.extend(tickets.into_iter().map(|t| self.child_request(t)));
        }

        if self.view == View::Browse {
            let order = self.render_order();
            self.selection.prune(&old_order, &order);
            self.settle_focus(&order);
        }
        requests
    }

    fn on_trash_listed(
        &mut self,
        generation: u64,
        result: Result<Vec<Entry>, BackendError>,
    ) -> Vec<Request> {
        if generation != self.trash.generation {
            log::debug!("discarding stale trash listing (gen {})", generation);
            return Vec::new();
        }
        self.trash.pending = false;
        let exit_when_empty = std::mem::take(&mut self.trash.exit_when_empty);

        match result {
            Ok(entries) => {
                let old_order = self.render_order();
                self.trash.entries = entries;
                self.trash.loaded = true;
                if self.view == View::Trash {
                    let order = self.render_order();
                    self.selection.prune(&old_order, &order);
                }
            }
            Err(source) => {
                self.report(FileListError::Fetch {
                    path: "Trash".to_string(),
                    source,
                });
                return Vec::new();
            }
        }

        if self.view == View::Trash && exit_when_empty && self.trash.entries.is_empty() {
            log::debug!("trash emptied, leaving trash view");
            return self.close_trash();
        }
        Vec::new()
    }

    fn on_home(&mut self, result: Result<String, BackendError>) -> Vec<Request> {
        match result {
            Ok(home) => {
                self.home = Some(home.clone());
                if self.current.is_none() {
                    self.history.reset(&home);
                    return self.load_directory(&home);
                }
            }
            Err(source) => self.report(FileListError::Fetch {
                path: "~".to_string(),
                source,
            }),
        }
        Vec::new()
    }

    fn on_parent(&mut self, nav: NavToken, result: Result<String, BackendError>) -> Vec<Request> {
        if nav != self.nav {
            return Vec::new();
        }
        match result {
            Ok(parent) if self.current.as_deref() != Some(parent.as_str()) => {
                self.navigate(&parent)
            }
            Ok(_) => Vec::new(),
            Err(source) => {
                let path = self.current.clone().unwrap_or_default();
                self.report(FileListError::Fetch { path, source });
                Vec::new()
            }
        }
    }

    fn on_mutated(
        &mut self,
        mutation: Mutation,
        result: Result<String, BackendError>,
    ) -> Vec<Request> {
        let old_order = self.render_order();
        let mut requests = Vec::new();
        let mut tree_changed = false;

        match result {
            Ok(path) => {
                log::debug!("{} done: {}", mutation.op().verb(), path);
                match &mutation {
                    Mutation::CreateFile { .. } | Mutation::CreateDirectory { .. } => {
                        self.focus_on(&path, true);
                    }
                    Mutation::Rename { path: old, .. } => {
                        tree_changed |= self.tree.forget_subtree(old);
                        self.cache.remove(old);
                        self.selection.remove(old);
                        self.focus_on(&path, false);
                    }
                    Mutation::MoveToTrash { path: old }
                    | Mutation::DeletePermanently { path: old } => {
                        tree_changed |= self.tree.forget_subtree(old);
                        self.cache.remove(old);
                        self.selection.remove(old);
                    }
                    Mutation::RestoreFromTrash { path: old } => {
                        self.selection.remove(old);
                    }
                    Mutation::Transfer(transfer) => {
                        self.clipboard
                            .transfer_succeeded(transfer.mode, transfer.generation);
                        if transfer.mode == ClipboardMode::Cut {
                            tree_changed |= self.tree.forget_subtree(&transfer.source);
                            self.cache.remove(&transfer.source);
                            self.selection.remove(&transfer.source);
                        }
                        self.focus_on(&path, false);
                    }
                }
            }
            Err(source) => {
                self.report(FileListError::Mutation {
                    op: mutation.op(),
                    path: mutation.subject(),
                    source,
                });
            }
        }

        // refetch rather than patch, on success and failure alike
        for dir in mutation.affected_dirs() {
            if self.current.as_deref() == Some(dir.as_str()) {
                requests.extend(self.request_top(FetchMode::Always));
            } else if self.tree.is_expanded(&dir) {
                if let Some(ticket) = self.cache.begin(&dir, FetchMode::Always) {
                    requests.push(self.child_request(ticket));
                }
            } else {
                self.cache.invalidate(&dir);
            }
        }

        if mutation.touches_trash() {
            if matches!(
                mutation,
                Mutation::RestoreFromTrash { .. } | Mutation::DeletePermanently { .. }
            ) {
                self.trash.exit_when_empty = self.view == View::Trash;
            }
            if matches!(mutation, Mutation::RestoreFromTrash { .. }) {
                // the restore target is not known here
                self.cache.invalidate_all();
            }
            requests.push(self.request_trash());
        }

        if tree_changed {
            requests.push(self.store_expanded());
        }
        if self.view == View::Browse {
            let order = self.render_order();
            self.selection.prune(&old_order, &order);
        }
        requests
    }

    fn on_setting_loaded(
        &mut self,
        key: SettingKey,
        nav: NavToken,
        result: Result<Option<SettingValue>, SettingsError>,
    ) -> Vec<Request> {
        let value = match result {
            Ok(Some(value)) => value,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("could not load {}: {}", key, err);
                return Vec::new();
            }
        };

        match (key, value) {
            (SettingKey::ZoomLevel, SettingValue::Zoom(level)) => {
                self.zoom = level;
                Vec::new()
            }
            (SettingKey::ExpandedFolders, SettingValue::Expanded(map)) => {
                self.tree.merge(map);
                let top = self
                    .current
                    .as_deref()
                    .and_then(|p| self.cache.entries(p))
                    .map(<[_]>::to_vec)
                    .unwrap_or_default();
                let tickets =
                    self.tree
                        .propagate(&top, &mut self.cache, self.platform, FetchMode::IfMissing);
                tickets.into_iter().map(|t| self.child_request(t)).collect()
            }
            (SettingKey::SortPreference(path), SettingValue::Sort(preference)) => {
                let current = self.current.as_deref() == Some(path.as_str());
                if nav != self.nav || !current || self.sort_touched {
                    log::debug!("discarding sort preference of {} (nav {})", path, nav.0);
                    return Vec::new();
                }
                let old_order = self.render_order();
                self.sort = preference;
                let order = self.render_order();
                self.selection.prune(&old_order, &order);
                Vec::new()
            }
            (key, value) => {
                log::warn!("unexpected value for {}: {:?}", key, value);
                Vec::new()
            }
        }
    }

    /// Select (and maybe start renaming) the focus path once it is rendered.
    fn settle_focus(&mut self, order: &[String]) {
        let Some(focus) = self.focus.take_if(|f| order.contains(&f.path)) else {
            return;
        };
        self.selection.select_single(&focus.path, order);
        if focus.rename {
            self.begin_rename_path(&focus.path);
        }
    }
}
