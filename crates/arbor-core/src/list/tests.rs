use serde_json::json;

use super::{FileList, View};
use crate::backend::Backend;
use crate::command::{Command, Key, KeyInput, Modifiers};
use crate::drag::{Point, RowLayout};
use crate::driver::run_until_idle;
use crate::entry::Entry;
use crate::error::{FileListError, MutationOp, ValidationError};
use crate::menu::{MenuAction, MenuTarget};
use crate::mock::{MemorySettings, MockBackend};
use crate::platform::Platform;
use crate::request::{Completion, ListOrigin, Mutation, Request};
use crate::settings::{SettingKey, SettingValue};
use crate::snapshot::FetchTicket;
use crate::sort::{SortDirection, SortField, SortPreference};

const HOME: &str = "/home/me";
const T: &str = "2024-01-01 00:00:00";

async fn mounted(backend: &MockBackend, settings: &MemorySettings) -> FileList {
    let mut list = FileList::new();
    let requests = list.mount();
    run_until_idle(&mut list, backend, settings, requests).await;
    list
}

async fn run(list: &mut FileList, backend: &MockBackend, settings: &MemorySettings, requests: Vec<Request>) {
    run_until_idle(list, backend, settings, requests).await;
}

fn listing(requests: &[Request]) -> (FetchTicket, ListOrigin) {
    requests
        .iter()
        .find_map(|r| match r {
            Request::ListDirectory { ticket, origin, .. } => Some((ticket.clone(), *origin)),
            _ => None,
        })
        .expect("listing request")
}

fn listed(ticket: FetchTicket, origin: ListOrigin, entries: Vec<Entry>) -> Completion {
    Completion::Listed {
        ticket,
        origin,
        result: Ok(entries),
    }
}

fn key(name: &str, ctrl: bool, shift: bool) -> KeyInput {
    KeyInput::new(
        Key::from_dom(name),
        Modifiers {
            ctrl,
            shift,
            ..Default::default()
        },
    )
}

fn p(name: &str) -> String {
    format!("{}/{}", HOME, name)
}

// =============================================================================
// Mount / Navigation
// =============================================================================

#[tokio::test]
async fn test_mount_lists_home() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/b.txt", 2)
        .with_file("/home/me/a.txt", 1)
        .with_dir("/home/me/docs");
    let settings = MemorySettings::new();
    let list = mounted(&backend, &settings).await;

    assert_eq!(list.home(), Some(HOME));
    assert_eq!(list.current_path(), Some(HOME));
    assert_eq!(list.render_order(), vec![p("docs"), p("a.txt"), p("b.txt")]);
    assert_eq!(list.drives(), ["/".to_string()]);
    assert!(!list.is_loading());
    assert!(!list.is_outside_home());
    assert!(!list.can_go_back());
}

#[tokio::test]
async fn test_history_back_and_forward() {
    let backend = MockBackend::new(HOME).with_file("/home/me/docs/x.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.navigate(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.render_order(), vec![p("docs/x.txt")]);

    let requests = list.go_back();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.current_path(), Some(HOME));
    assert!(list.can_go_forward());

    let requests = list.go_forward();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.current_path(), Some(p("docs").as_str()));
    assert!(!list.can_go_forward());
}

#[tokio::test]
async fn test_navigate_up_and_outside_home() {
    let backend = MockBackend::new(HOME);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.navigate_up();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.current_path(), Some("/home"));
    assert!(list.is_outside_home());
    assert_eq!(list.render_order(), vec![HOME.to_string()]);

    let requests = list.navigate_home();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.current_path(), Some(HOME));
    assert!(!list.is_outside_home());
}

#[tokio::test]
async fn test_failed_listing_is_reported() {
    let backend = MockBackend::new(HOME).with_dir("/home/me/locked");
    backend.fail_on("/home/me/locked");
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.navigate(&p("locked"));
    run(&mut list, &backend, &settings, requests).await;
    assert!(matches!(list.error(), Some(FileListError::Fetch { path, .. }) if path == "/home/me/locked"));
    assert!(list.rows().is_empty());
    assert!(!list.is_loading());

    list.dismiss_error();
    assert!(list.error().is_none());
}

// =============================================================================
// Races
// =============================================================================

#[test]
fn test_out_of_order_listings_keep_newest() {
    let mut list = FileList::new();
    let (first, origin) = listing(&list.navigate("/a"));
    let (second, _) = listing(&list.refresh());

    list.complete(listed(second, origin, vec![Entry::file("/a", "new.txt", 1, T)]));
    list.complete(listed(first, origin, vec![Entry::file("/a", "old.txt", 1, T)]));
    assert_eq!(list.render_order(), vec!["/a/new.txt"]);
}

#[test]
fn test_listing_of_previous_directory_is_not_shown() {
    let mut list = FileList::new();
    let (a, a_origin) = listing(&list.navigate("/a"));
    let (b, b_origin) = listing(&list.navigate("/b"));

    let follow_up = list.complete(listed(a, a_origin, vec![Entry::directory("/a", "d", T)]));
    assert!(follow_up.is_empty());
    assert!(list.render_order().is_empty());

    list.complete(listed(b, b_origin, vec![Entry::file("/b", "x", 1, T)]));
    assert_eq!(list.render_order(), vec!["/b/x"]);
}

#[test]
fn test_sort_preference_of_previous_navigation_is_discarded() {
    let mut list = FileList::new();
    list.navigate("/a");
    let stale_nav = list.nav_token();
    list.navigate("/b");

    let by_date = SortPreference::new(SortField::Date, SortDirection::Descending);
    list.complete(Completion::SettingLoaded {
        key: SettingKey::SortPreference("/a".into()),
        nav: stale_nav,
        result: Ok(Some(SettingValue::Sort(by_date))),
    });
    assert_eq!(list.sort_preference(), SortPreference::default());

    list.complete(Completion::SettingLoaded {
        key: SettingKey::SortPreference("/b".into()),
        nav: list.nav_token(),
        result: Ok(Some(SettingValue::Sort(by_date))),
    });
    assert_eq!(list.sort_preference(), by_date);
}

#[test]
fn test_user_sort_wins_over_late_preference() {
    let mut list = FileList::new();
    list.navigate("/b");
    let stored = list.set_sort_field(SortField::Size);
    assert!(matches!(
        stored.as_slice(),
        [Request::StoreSetting { key: SettingKey::SortPreference(path), .. }] if path == "/b"
    ));

    list.complete(Completion::SettingLoaded {
        key: SettingKey::SortPreference("/b".into()),
        nav: list.nav_token(),
        result: Ok(Some(SettingValue::Sort(SortPreference::new(
            SortField::Date,
            SortDirection::Ascending,
        )))),
    });
    assert_eq!(
        list.sort_preference(),
        SortPreference::new(SortField::Size, SortDirection::Ascending)
    );
}

#[tokio::test]
async fn test_sort_preference_restored_per_directory() {
    let backend = MockBackend::new(HOME).with_dir("/home/me/docs");
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.set_sort_field(SortField::Size);
    run(&mut list, &backend, &settings, requests).await;
    assert!(settings.value("sortPreference:/home/me").is_some());

    let requests = list.navigate(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.sort_preference(), SortPreference::default());

    let requests = list.go_back();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(
        list.sort_preference(),
        SortPreference::new(SortField::Size, SortDirection::Ascending)
    );
}

// =============================================================================
// Refresh
// =============================================================================

#[test]
fn test_tick_is_suppressed() {
    let mut list = FileList::new();
    let (ticket, origin) = listing(&list.navigate("/a"));
    list.complete(listed(ticket, origin, vec![Entry::file("/a", "x", 1, T)]));

    list.open_context_menu(10.0, 10.0, MenuTarget::Background);
    assert!(list.tick().is_empty());
    list.close_context_menu();

    list.begin_drag(Point::new(0.0, 0.0), false);
    assert!(list.tick().is_empty());
    assert!(list.end_drag());

    list.open_trash();
    assert!(list.tick().is_empty());
    let (ticket, origin) = listing(&list.close_trash());
    list.complete(listed(ticket, origin, vec![Entry::file("/a", "x", 1, T)]));

    let requests = list.tick();
    assert_eq!(requests.len(), 1);
    // a fetch is already in flight
    assert!(list.tick().is_empty());
    let (ticket, origin) = listing(&requests);
    list.complete(listed(ticket, origin, vec![]));

    list.teardown();
    assert!(list.is_torn_down());
    assert!(list.tick().is_empty());
}

// =============================================================================
// Create / Rename
// =============================================================================

#[tokio::test]
async fn test_create_then_empty_rename_keeps_file() {
    let backend = MockBackend::new(HOME);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.create_file();
    run(&mut list, &backend, &settings, requests).await;

    let created = p("New File.txt");
    assert!(backend.exists(&created));
    assert_eq!(list.selection().single(), Some(created.as_str()));
    let edit = list.edit().expect("rename editor opens on the new file");
    assert_eq!(edit.value, "New File.txt");
    assert_eq!(list.take_reveal(), Some(created.clone()));

    list.set_edit_value("   ");
    assert!(list.commit_edit().is_empty());
    assert!(!list.is_editing());
    assert_eq!(
        list.error(),
        Some(&FileListError::Validation(ValidationError::EmptyName))
    );
    assert!(backend.exists(&created));
    assert_eq!(list.render_order(), vec![created]);
}

#[tokio::test]
async fn test_create_folder_picks_free_name() {
    let backend = MockBackend::new(HOME).with_dir("/home/me/New Folder");
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.create_folder();
    assert!(matches!(
        requests.as_slice(),
        [Request::Mutate(crate::request::Mutation::CreateDirectory { name, .. })] if name == "New Folder 2"
    ));
    run(&mut list, &backend, &settings, requests).await;
    assert!(backend.exists("/home/me/New Folder 2"));
    assert_eq!(list.edit().map(|e| e.path.as_str()), Some("/home/me/New Folder 2"));
}

#[tokio::test]
async fn test_rename_selects_new_path() {
    let backend = MockBackend::new(HOME).with_file("/home/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a.txt"));
    assert!(list.begin_rename());
    list.set_edit_value(" b.txt ");
    let requests = list.commit_edit();
    run(&mut list, &backend, &settings, requests).await;

    assert_eq!(list.render_order(), vec![p("b.txt")]);
    assert_eq!(list.selection().single(), Some(p("b.txt").as_str()));
}

#[tokio::test]
async fn test_unchanged_rename_sends_nothing() {
    let backend = MockBackend::new(HOME).with_file("/home/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a.txt"));
    list.begin_rename();
    assert!(list.commit_edit().is_empty());
    assert!(list.error().is_none());

    list.begin_rename();
    list.set_edit_value("c.txt");
    list.cancel_edit();
    assert!(!list.is_editing());
    assert!(list.commit_edit().is_empty());
}

#[tokio::test]
async fn test_failed_rename_reports_and_refetches() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a.txt", 1)
        .with_file("/home/me/b.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;
    backend.clear_calls();

    list.select_single(&p("a.txt"));
    list.begin_rename();
    list.set_edit_value("b.txt");
    let requests = list.commit_edit();
    run(&mut list, &backend, &settings, requests).await;

    assert!(matches!(
        list.error(),
        Some(FileListError::Mutation { op: MutationOp::Rename, .. })
    ));
    assert!(backend.calls().contains(&"read_directory /home/me".to_string()));
    assert_eq!(list.render_order().len(), 2);
}

#[tokio::test]
async fn test_rename_forgets_expansion() {
    let backend = MockBackend::new(HOME).with_file("/home/me/docs/x.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    assert!(list.is_expanded(&p("docs")));

    list.select_single(&p("docs"));
    list.begin_rename();
    list.set_edit_value("notes");
    let requests = list.commit_edit();
    run(&mut list, &backend, &settings, requests).await;

    assert!(!list.is_expanded(&p("docs")));
    assert_eq!(settings.value(&SettingKey::ExpandedFolders.name()), Some(json!({})));
    assert_eq!(list.render_order(), vec![p("notes")]);
    assert_eq!(list.selection().single(), Some(p("notes").as_str()));
}

// =============================================================================
// Clipboard
// =============================================================================

#[tokio::test]
async fn test_cut_paste_clears_clipboard() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/src/a.txt", 1)
        .with_dir("/home/me/dst");
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.navigate(&p("src"));
    run(&mut list, &backend, &settings, requests).await;
    list.select_single(&p("src/a.txt"));
    list.cut();
    assert!(list.can_paste());
    assert!(list.rows()[0].cut);

    let requests = list.navigate(&p("dst"));
    run(&mut list, &backend, &settings, requests).await;
    let requests = list.paste();
    assert_eq!(requests.len(), 1);
    run(&mut list, &backend, &settings, requests).await;

    assert!(!list.can_paste());
    assert!(!backend.exists("/home/me/src/a.txt"));
    assert_eq!(list.render_order(), vec![p("dst/a.txt")]);
    assert_eq!(list.selection().single(), Some(p("dst/a.txt").as_str()));
}

#[tokio::test]
async fn test_copy_paste_keeps_clipboard() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a.txt", 1)
        .with_dir("/home/me/dst");
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a.txt"));
    list.copy();
    let requests = list.navigate(&p("dst"));
    run(&mut list, &backend, &settings, requests).await;
    let requests = list.paste();
    run(&mut list, &backend, &settings, requests).await;

    assert!(list.can_paste());
    assert!(backend.exists("/home/me/a.txt"));
    assert!(backend.exists("/home/me/dst/a.txt"));

    // pasting again collides with the copy
    let requests = list.paste();
    run(&mut list, &backend, &settings, requests).await;
    assert!(matches!(
        list.error(),
        Some(FileListError::Mutation { op: MutationOp::Copy, .. })
    ));
}

#[test]
fn test_copy_without_selection_is_ignored() {
    let mut list = FileList::new();
    list.copy();
    assert!(!list.can_paste());
    assert!(list.paste().is_empty());
}

// =============================================================================
// Trash
// =============================================================================

#[tokio::test]
async fn test_deleting_last_trash_item_exits_trash() {
    let backend = MockBackend::new(HOME).with_file("/home/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a.txt"));
    let requests = list.delete_selected();
    run(&mut list, &backend, &settings, requests).await;
    assert!(list.render_order().is_empty());
    assert_eq!(list.trash_count(), 1);

    let requests = list.open_trash();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.view(), View::Trash);
    assert_eq!(list.render_order(), vec!["/.Trash/a.txt"]);

    list.select_all();
    let requests = list.delete_selected();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.view(), View::Browse);
    assert_eq!(list.trash_count(), 0);
    assert!(list.selection().is_empty());
}

#[tokio::test]
async fn test_restore_leaves_trash_once_empty() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a.txt", 1)
        .with_file("/home/me/b.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_all();
    let requests = list.delete_selected();
    run(&mut list, &backend, &settings, requests).await;
    let requests = list.open_trash();
    run(&mut list, &backend, &settings, requests).await;

    let requests = list.restore("/.Trash/a.txt");
    run(&mut list, &backend, &settings, requests).await;
    assert!(list.in_trash());
    assert_eq!(list.render_order(), vec!["/.Trash/b.txt"]);

    list.select_single("/.Trash/b.txt");
    let requests = list.restore_selected();
    run(&mut list, &backend, &settings, requests).await;
    assert!(!list.in_trash());
    assert_eq!(list.render_order(), vec![p("a.txt"), p("b.txt")]);
}

#[tokio::test]
async fn test_partial_delete_attempts_every_item() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a", 1)
        .with_file("/home/me/b", 1)
        .with_file("/home/me/c", 1);
    backend.fail_on("/home/me/b");
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_all();
    let requests = list.delete_selected();
    assert_eq!(requests.len(), 3);
    run(&mut list, &backend, &settings, requests).await;

    assert_eq!(list.render_order(), vec![p("b")]);
    assert_eq!(list.trash_count(), 2);
    assert!(matches!(
        list.error(),
        Some(FileListError::Mutation { op: MutationOp::Trash, path, .. }) if *path == p("b")
    ));
}

#[tokio::test]
async fn test_trashing_expanded_dir_keeps_anchor_on_entry() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/docs/x.txt", 1)
        .with_file("/home/me/docs/y.txt", 1)
        .with_file("/home/me/a.txt", 1)
        .with_file("/home/me/b.txt", 1)
        .with_file("/home/me/c.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    list.select_single(&p("a.txt"));
    assert_eq!(list.selection().anchor(), Some(3));

    let requests = vec![Request::Mutate(Mutation::MoveToTrash { path: p("docs") })];
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.render_order(), vec![p("a.txt"), p("b.txt"), p("c.txt")]);
    assert_eq!(list.selection().anchor(), Some(0));

    list.select_range(&p("c.txt"));
    assert_eq!(list.selection().to_vec(), vec![p("a.txt"), p("b.txt"), p("c.txt")]);
}

#[tokio::test]
async fn test_trash_view_rejects_browse_operations() {
    let backend = MockBackend::new(HOME).with_file("/home/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a.txt"));
    list.copy();
    let requests = list.open_trash();
    run(&mut list, &backend, &settings, requests).await;

    assert!(list.paste().is_empty());
    assert!(list.create_file().is_empty());
    assert!(!list.begin_rename_path("/.Trash/a.txt"));
    assert_eq!(list.restore("/nowhere").len(), 1);
}

// =============================================================================
// Tree
// =============================================================================

#[tokio::test]
async fn test_expand_collapse_expand_uses_cache() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/docs/x.txt", 1)
        .with_file("/home/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    let rows = list.rows();
    assert_eq!(rows[1].entry.path, p("docs/x.txt"));
    assert_eq!(rows[1].depth, 1);
    backend.clear_calls();

    let collapse = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, collapse).await;
    let expand = list.toggle_expand(&p("docs"));
    assert!(
        expand
            .iter()
            .all(|r| !matches!(r, Request::ListDirectory { .. }))
    );
    run(&mut list, &backend, &settings, expand).await;

    assert_eq!(backend.count_calls("read_directory"), 0);
    assert_eq!(list.render_order(), vec![p("docs"), p("docs/x.txt"), p("a.txt")]);
}

#[tokio::test]
async fn test_range_after_cached_expand() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/docs/x.txt", 1)
        .with_file("/home/me/docs/y.txt", 1)
        .with_file("/home/me/a.txt", 1)
        .with_file("/home/me/b.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;

    list.select_single(&p("a.txt"));
    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.selection().anchor(), Some(3));

    list.select_range(&p("b.txt"));
    assert_eq!(list.selection().to_vec(), vec![p("a.txt"), p("b.txt")]);
}

#[tokio::test]
async fn test_tick_refetches_expanded_children() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/docs/x.txt", 1)
        .with_file("/home/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    // changed behind the list's back
    backend.create_file(&p("docs"), "z.txt").await.unwrap();
    backend.clear_calls();

    let requests = list.tick();
    run(&mut list, &backend, &settings, requests).await;

    let calls = backend.calls();
    assert!(calls.contains(&"read_directory /home/me".to_string()));
    assert!(calls.contains(&"read_directory /home/me/docs".to_string()));
    assert_eq!(
        list.render_order(),
        vec![p("docs"), p("docs/x.txt"), p("docs/z.txt"), p("a.txt")]
    );
}

#[tokio::test]
async fn test_collapse_prunes_hidden_selection() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/docs/x.txt", 1)
        .with_file("/home/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    list.select_single(&p("docs/x.txt"));
    list.toggle_selected(&p("a.txt"));
    assert_eq!(list.selection().len(), 2);

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.selection().to_vec(), vec![p("a.txt")]);
}

#[tokio::test]
async fn test_toggle_hidden_refetches_expanded() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/docs/.secret", 1)
        .with_file("/home/me/.profile", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.toggle_expand(&p("docs"));
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.render_order(), vec![p("docs")]);
    backend.clear_calls();

    let requests = list.toggle_hidden();
    assert!(
        requests
            .iter()
            .all(|r| matches!(r, Request::ListDirectory { show_hidden: true, .. }))
    );
    run(&mut list, &backend, &settings, requests).await;

    let calls = backend.calls();
    assert!(calls.contains(&"read_directory /home/me".to_string()));
    assert!(calls.contains(&"read_directory /home/me/docs".to_string()));
    assert_eq!(
        list.render_order(),
        vec![p("docs"), p("docs/.secret"), p(".profile")]
    );
}

#[tokio::test]
async fn test_persisted_expansion_restored_on_mount() {
    let backend = MockBackend::new(HOME).with_file("/home/me/docs/x.txt", 1);
    let settings = MemorySettings::new().with_value(
        &SettingKey::ExpandedFolders.name(),
        json!({ "/home/me/docs": true }),
    );
    let list = mounted(&backend, &settings).await;

    assert!(list.is_expanded(&p("docs")));
    assert_eq!(list.render_order(), vec![p("docs"), p("docs/x.txt")]);
}

#[tokio::test]
async fn test_bundles_do_not_expand_on_macos() {
    let backend = MockBackend::new("/Users/me")
        .with_platform("macos")
        .with_file("/Users/me/Mail.app/Contents/Info.plist", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    assert_eq!(list.platform(), Platform::MacOs);
    assert!(list.toggle_expand("/Users/me/Mail.app").is_empty());
    assert!(!list.rows()[0].expandable);
}

// =============================================================================
// Open
// =============================================================================

#[tokio::test]
async fn test_open_selection_opens_files_and_enters_first_directory() {
    let backend = MockBackend::new("/Users/me")
        .with_platform("macos")
        .with_dir("/Users/me/Mail.app")
        .with_dir("/Users/me/docs")
        .with_file("/Users/me/a.txt", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_all();
    let requests = list.open_selected(false);
    run(&mut list, &backend, &settings, requests).await;

    assert_eq!(backend.opened(), vec!["/Users/me/Mail.app", "/Users/me/a.txt"]);
    assert_eq!(list.current_path(), Some("/Users/me/docs"));
}

#[tokio::test]
async fn test_reveal_enters_bundle() {
    let backend = MockBackend::new("/Users/me")
        .with_platform("macos")
        .with_dir("/Users/me/Mail.app/Contents");
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let requests = list.open("/Users/me/Mail.app", true);
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.current_path(), Some("/Users/me/Mail.app"));
    assert!(backend.opened().is_empty());
}

// =============================================================================
// Pointer / Keyboard
// =============================================================================

#[tokio::test]
async fn test_clicks() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a", 1)
        .with_file("/home/me/b", 1)
        .with_file("/home/me/c", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.click(&p("a"), Modifiers::default());
    let shift = Modifiers {
        shift: true,
        ..Default::default()
    };
    list.click(&p("c"), shift);
    assert_eq!(list.selection().len(), 3);

    let ctrl = Modifiers {
        ctrl: true,
        ..Default::default()
    };
    list.click(&p("b"), ctrl);
    assert_eq!(list.selection().to_vec(), vec![p("a"), p("c")]);

    list.click_background();
    assert!(list.selection().is_empty());
}

#[tokio::test]
async fn test_drag_selection() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a", 1)
        .with_file("/home/me/b", 1)
        .with_file("/home/me/c", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;
    let layout = RowLayout {
        row_height: 20.0,
        top_offset: 0.0,
        width: 400.0,
    };

    list.begin_drag(Point::new(5.0, 5.0), false);
    list.update_drag(Point::new(50.0, 30.0), &layout);
    assert_eq!(list.selection().to_vec(), vec![p("a"), p("b")]);
    assert!(list.drag_rect().is_some());
    assert!(list.end_drag());
    assert!(!list.is_dragging());

    list.select_single(&p("c"));
    list.begin_drag(Point::new(5.0, 5.0), true);
    list.update_drag(Point::new(50.0, 10.0), &layout);
    assert_eq!(list.selection().to_vec(), vec![p("c"), p("a")]);
    list.end_drag();
}

#[tokio::test]
async fn test_context_menu_targets_selection() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a", 1)
        .with_file("/home/me/b", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a"));
    list.open_context_menu(10.0, 10.0, MenuTarget::Entry(p("b")));
    assert_eq!(list.selection().to_vec(), vec![p("b")]);

    list.select_all();
    list.open_context_menu(10.0, 10.0, MenuTarget::Entry(p("a")));
    assert_eq!(list.selection().len(), 2);
    assert!(!list.menu_items().is_empty());

    list.clamp_context_menu(200.0, 300.0, 100.0, 100.0);
    let menu = list.context_menu().expect("menu open");
    assert!(menu.x <= 10.0 && menu.y <= 10.0);

    list.menu_action(MenuAction::Copy);
    assert!(list.context_menu().is_none());
    assert!(list.can_paste());
}

#[tokio::test]
async fn test_keyboard_select_all_and_escape() {
    let backend = MockBackend::new(HOME)
        .with_file("/home/me/a", 1)
        .with_file("/home/me/b", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    let outcome = list.handle_key(key("a", true, false));
    assert!(outcome.prevent_default);
    assert_eq!(outcome.command, Some(Command::SelectAll));
    assert_eq!(list.selection().len(), 2);

    list.handle_key(key("Escape", false, false));
    assert!(list.selection().is_empty());
}

#[tokio::test]
async fn test_keys_ignored_while_editing() {
    let backend = MockBackend::new(HOME).with_file("/home/me/a", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a"));
    list.begin_rename();
    let outcome = list.handle_key(key("Delete", false, false));
    assert!(!outcome.prevent_default);
    assert!(outcome.requests.is_empty());
    assert!(list.is_editing());
}

#[tokio::test]
async fn test_arrow_keys_expand_and_collapse() {
    let backend = MockBackend::new(HOME).with_file("/home/me/docs/x", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("docs"));
    let outcome = list.handle_key(key("ArrowRight", false, false));
    assert_eq!(outcome.command, Some(Command::Expand));
    run(&mut list, &backend, &settings, outcome.requests).await;
    assert!(list.is_expanded(&p("docs")));

    let outcome = list.handle_key(key("ArrowLeft", false, false));
    assert_eq!(outcome.command, Some(Command::Collapse));
    assert!(!list.is_expanded(&p("docs")));
}

#[tokio::test]
async fn test_delete_key_moves_to_trash() {
    let backend = MockBackend::new(HOME).with_file("/home/me/a", 1);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    list.select_single(&p("a"));
    let outcome = list.handle_key(key("Delete", false, false));
    assert_eq!(outcome.command, Some(Command::Delete));
    run(&mut list, &backend, &settings, outcome.requests).await;
    assert!(list.render_order().is_empty());
    assert_eq!(list.trash_count(), 1);
}

// =============================================================================
// Zoom
// =============================================================================

#[tokio::test]
async fn test_zoom_is_clamped_and_persisted() {
    let backend = MockBackend::new(HOME);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;

    for _ in 0..20 {
        let requests = list.zoom_in();
        run(&mut list, &backend, &settings, requests).await;
    }
    assert_eq!(list.zoom(), 2.0);
    assert!(list.zoom_in().is_empty());
    assert_eq!(settings.value("zoomLevel"), Some(json!(2.0)));

    list.set_zoom(1.234);
    assert_eq!(list.zoom(), 1.23);
    list.set_zoom(0.0);
    assert_eq!(list.zoom(), 0.5);
    list.zoom_reset();
    assert_eq!(list.zoom(), 1.0);
}

#[tokio::test]
async fn test_settings_write_failure_keeps_state() {
    let backend = MockBackend::new(HOME);
    let settings = MemorySettings::new();
    let mut list = mounted(&backend, &settings).await;
    settings.fail_writes(true);

    let requests = list.zoom_in();
    run(&mut list, &backend, &settings, requests).await;
    assert_eq!(list.zoom(), 1.1);
    assert!(matches!(list.error(), Some(FileListError::Settings(_))));
}
