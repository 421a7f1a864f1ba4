//! File list component for explorer view.
//!
//! Renders the controller's rows as a tree: expandable directories, inline
//! rename, rubber-band selection with edge auto-scroll, and the trash view.

use arbor_core::config::drag::TICK_MS;
use arbor_core::drag::{Point, RowLayout, Viewport, auto_scroll_delta};
use arbor_core::format::{format_modified, format_size};
use arbor_core::menu::MenuTarget;
use arbor_core::{Modifiers, Row, SortDirection, SortField};
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, MouseEvent};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::layout;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/explorer/file_list.module.css");

/// Pointer travel below which a background press counts as a click (px).
const CLICK_SLOP: f64 = 4.0;

fn mouse_modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        shift: event.shift_key(),
        alt: event.alt_key(),
    }
}

// ============================================================================
// Drag Geometry
// ============================================================================

/// Last pointer position of a drag, in client coordinates.
#[derive(Clone, Copy, Default)]
struct DragPointer {
    x: f64,
    y: f64,
    additive: bool,
}

/// Scroll container measurements at one instant.
struct Geometry {
    left: f64,
    top: f64,
    viewport: Viewport,
    layout: RowLayout,
}

impl Geometry {
    fn measure(el: &HtmlElement, zoom: f64) -> Self {
        let rect = el.get_bounding_client_rect();
        Self {
            left: rect.left(),
            top: rect.top(),
            viewport: Viewport {
                scroll_top: el.scroll_top() as f64,
                scroll_left: el.scroll_left() as f64,
                width: el.client_width() as f64,
                height: el.client_height() as f64,
                content_height: el.scroll_height() as f64,
            },
            layout: RowLayout {
                row_height: layout::ROW_HEIGHT * zoom,
                top_offset: layout::HEADER_HEIGHT * zoom,
                width: el.scroll_width() as f64,
            },
        }
    }

    /// Container-relative point.
    fn local(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }
}

/// Feed the current pointer position to the active drag.
fn update_drag_at(ctx: AppContext, list_ref: NodeRef<leptos::html::Div>, pointer: DragPointer) {
    let Some(el) = list_ref.get_untracked() else {
        return;
    };
    let Some(zoom) = ctx.list.try_with_untracked(|l| l.zoom()) else {
        return;
    };
    let geometry = Geometry::measure(&el, zoom);
    let content = geometry
        .viewport
        .to_content(geometry.local(pointer.x, pointer.y));
    ctx.apply(|l| l.update_drag(content, &geometry.layout));
}

/// Scroll the container while the pointer rests near its top or bottom edge
/// during a drag, extending the selection as rows pass by.
fn start_auto_scroll(
    ctx: AppContext,
    list_ref: NodeRef<leptos::html::Div>,
    pointer: StoredValue<DragPointer>,
) {
    spawn_local(async move {
        loop {
            TimeoutFuture::new(TICK_MS).await;
            let dragging = ctx.list.try_with_untracked(|l| (l.is_dragging(), l.zoom()));
            let (Some((true, zoom)), Some(p)) = (dragging, pointer.try_get_value()) else {
                break;
            };
            let Some(el) = list_ref.get_untracked() else {
                break;
            };
            let mut geometry = Geometry::measure(&el, zoom);
            let delta = auto_scroll_delta(p.y - geometry.top, geometry.viewport.height);
            if delta == 0.0 {
                continue;
            }
            let before = geometry.viewport.scroll_top;
            let after = geometry.viewport.scroll_by(delta);
            if after != before {
                el.set_scroll_top(after as i32);
                update_drag_at(ctx, list_ref, p);
            }
        }
    });
}

// ============================================================================
// FileList Component
// ============================================================================

/// Identity of a rendered row; any change re-creates the row view.
type RowKey = (String, String, u64, usize, bool, bool, bool, bool, bool, bool);

fn row_key(row: &Row) -> RowKey {
    (
        row.entry.path.clone(),
        row.entry.modified_at.clone(),
        row.entry.size_bytes,
        row.depth,
        row.expanded,
        row.selected,
        row.cut,
        row.editing,
        row.loading,
        row.failed,
    )
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let list_ref = NodeRef::<leptos::html::Div>::new();
    let pointer = StoredValue::new(DragPointer::default());
    let today = dom::today();

    let rows = Memo::new(move |_| ctx.list.with(|l| l.rows()));
    let in_trash = Signal::derive(move || ctx.list.with(|l| l.in_trash()));
    let loading = Signal::derive(move || ctx.list.with(|l| l.is_loading()));

    // Background press starts a drag selection
    let on_mousedown = move |event: MouseEvent| {
        if event.button() != 0 {
            return;
        }
        let Some(el) = list_ref.get_untracked() else {
            return;
        };
        let (dragging, zoom, platform) =
            ctx.list.with_untracked(|l| (l.is_dragging(), l.zoom(), l.platform()));
        if dragging {
            return;
        }
        let geometry = Geometry::measure(&el, zoom);
        let local = geometry.local(event.client_x() as f64, event.client_y() as f64);
        // Scrollbar presses land outside the client area
        if local.x > geometry.viewport.width || local.y > geometry.viewport.height {
            return;
        }
        event.prevent_default();
        let additive = mouse_modifiers(&event).additive(platform);
        pointer.set_value(DragPointer {
            x: event.client_x() as f64,
            y: event.client_y() as f64,
            additive,
        });
        let origin = geometry.viewport.to_content(local);
        ctx.apply(|l| l.begin_drag(origin, additive));
        start_auto_scroll(ctx, list_ref, pointer);
    };

    let move_handle = window_event_listener(ev::mousemove, move |event: MouseEvent| {
        if !ctx.list.try_with_untracked(|l| l.is_dragging()).unwrap_or(false) {
            return;
        }
        pointer.update_value(|p| {
            p.x = event.client_x() as f64;
            p.y = event.client_y() as f64;
        });
        update_drag_at(ctx, list_ref, pointer.get_value());
    });

    let up_handle = window_event_listener(ev::mouseup, move |_: MouseEvent| {
        let click = ctx.list.try_with_untracked(|l| {
            l.drag_rect()
                .map(|r| r.width() < CLICK_SLOP && r.height() < CLICK_SLOP)
        });
        let Some(Some(click)) = click else {
            return;
        };
        let additive = pointer.get_value().additive;
        ctx.apply(|l| {
            l.end_drag();
            if click && !additive {
                l.click_background();
            }
        });
    });

    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
    });

    let on_contextmenu = move |event: MouseEvent| {
        event.prevent_default();
        let (x, y) = (event.client_x() as f64, event.client_y() as f64);
        ctx.apply(|l| l.open_context_menu(x, y, MenuTarget::Background));
    };

    let rubber_band = move || {
        ctx.list
            .with(|l| l.drag_rect())
            .filter(|r| r.width() >= CLICK_SLOP || r.height() >= CLICK_SLOP)
            .map(|r| {
                let style = format!(
                    "left: {}px; top: {}px; width: {}px; height: {}px;",
                    r.left,
                    r.top,
                    r.width(),
                    r.height()
                );
                view! { <div class=css::rubberBand style=style></div> }
            })
    };

    let empty_message = move || {
        if loading.get() {
            Some("Loading…")
        } else if rows.with(|r| r.is_empty()) {
            Some(if in_trash.get() { "Trash is empty" } else { "This folder is empty" })
        } else {
            None
        }
    };

    view! {
        <div
            class=css::list
            node_ref=list_ref
            role="grid"
            aria-label="File list"
            on:mousedown=on_mousedown
            on:contextmenu=on_contextmenu
        >
            <ColumnHeader />
            <For
                each=move || rows.get()
                key=row_key
                children=move |row| {
                    view! { <FileRow row=row today=today.clone() /> }
                }
            />
            {move || empty_message().map(|msg| view! { <div class=css::empty>{msg}</div> })}
            {rubber_band}
        </div>
    }
}

// ============================================================================
// Column Header
// ============================================================================

#[component]
fn ColumnHeader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let column = move |field: SortField, class: &'static str| {
        let indicator = move || {
            let pref = ctx.list.with(|l| l.sort_preference());
            (pref.field == field).then(|| {
                let icon = match pref.direction {
                    SortDirection::Ascending => ic::SORT_ASCENDING,
                    SortDirection::Descending => ic::SORT_DESCENDING,
                };
                view! { <span class=css::sortIndicator><Icon icon=icon /></span> }
            })
        };
        view! {
            <button
                class=format!("{} {}", css::headerCell, class)
                on:mousedown=|event: MouseEvent| event.stop_propagation()
                on:click=move |_| ctx.act(|l| l.set_sort_field(field))
            >
                {field.label()}
                {indicator}
            </button>
        }
    };

    view! {
        <div class=css::listHeader role="row">
            {column(SortField::Name, css::headerName)}
            {column(SortField::Date, css::headerDate)}
            {column(SortField::Size, css::headerSize)}
            <span class=format!("{} {}", css::headerCell, css::headerKind)>"Kind"</span>
        </div>
    }
}

// ============================================================================
// Rows
// ============================================================================

#[component]
fn FileRow(row: Row, today: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (platform, in_trash) = ctx.list.with_untracked(|l| (l.platform(), l.in_trash()));

    let entry = row.entry;
    let path = StoredValue::new(entry.path.clone());
    let icon = ic::entry_icon(&entry, platform, row.expanded);
    let display_name = entry.display_name(platform).to_string();
    let modified = format_modified(&entry.modified_at, &today);
    let size = format_size(entry.size_bytes, entry.is_dir);
    let kind = if entry.is_opaque_bundle(platform) {
        "Application".to_string()
    } else if entry.is_dir {
        "Folder".to_string()
    } else {
        entry.kind.to_uppercase()
    };

    let mut class = css::listItem.to_string();
    for (on, extra) in [
        (row.selected, css::selected),
        (row.cut, css::cut),
        (entry.is_hidden, css::hidden),
    ] {
        if on {
            class.push(' ');
            class.push_str(extra);
        }
    }
    let indent = format!("padding-left: calc(var(--indent) * {} + 6px);", row.depth);

    let on_click = move |event: MouseEvent| {
        let modifiers = mouse_modifiers(&event);
        ctx.apply(|l| l.click(&path.get_value(), modifiers));
    };
    let on_dblclick = move |_: MouseEvent| {
        ctx.act(|l| l.open(&path.get_value(), false));
    };
    let on_contextmenu = move |event: MouseEvent| {
        event.prevent_default();
        event.stop_propagation();
        let (x, y) = (event.client_x() as f64, event.client_y() as f64);
        ctx.apply(|l| l.open_context_menu(x, y, MenuTarget::Entry(path.get_value())));
    };

    let toggle = row.expandable.then(|| {
        let chevron = if row.expanded { ic::CHEVRON_DOWN } else { ic::CHEVRON_RIGHT };
        view! {
            <button
                class=css::chevron
                aria-label={if row.expanded { "Collapse" } else { "Expand" }}
                on:mousedown=|event: MouseEvent| event.stop_propagation()
                on:click=move |event: MouseEvent| {
                    event.stop_propagation();
                    ctx.act(|l| l.toggle_expand(&path.get_value()));
                }
                on:dblclick=|event: MouseEvent| event.stop_propagation()
            >
                <Icon icon=chevron />
            </button>
        }
    });

    let status = if row.loading {
        Some(view! { <span class=css::rowStatus>"…"</span> }.into_any())
    } else if row.failed {
        Some(
            view! {
                <span class=css::rowStatus title="Could not read this folder">
                    <Icon icon=ic::WARNING />
                </span>
            }
            .into_any(),
        )
    } else {
        None
    };

    let restore = in_trash.then(|| {
        view! {
            <button
                class=css::rowAction
                title="Restore"
                on:mousedown=|event: MouseEvent| event.stop_propagation()
                on:click=move |event: MouseEvent| {
                    event.stop_propagation();
                    ctx.act(|l| l.restore(&path.get_value()));
                }
            >
                <Icon icon=ic::RESTORE />
            </button>
        }
    });

    let name = if row.editing {
        let initial = ctx
            .list
            .with_untracked(|l| l.edit().map(|e| e.value.clone()))
            .unwrap_or_else(|| entry.name.clone());
        view! { <RenameInput initial=initial is_dir=entry.is_dir /> }.into_any()
    } else {
        view! { <span class=css::name>{display_name.clone()}</span> }.into_any()
    };

    view! {
        <div
            class=class
            data-path=entry.path.clone()
            role="row"
            aria-selected=row.selected
            title=display_name
            on:mousedown=|event: MouseEvent| event.stop_propagation()
            on:click=on_click
            on:dblclick=on_dblclick
            on:contextmenu=on_contextmenu
        >
            <div class=css::nameCell style=indent>
                <span class=css::toggle>{toggle}</span>
                <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
                {name}
                {status}
                {restore}
            </div>
            <span class=css::itemDate>{modified}</span>
            <span class=css::size>{size}</span>
            <span class=css::kind>{kind}</span>
        </div>
    }
}

/// Inline rename field. Focuses itself with the name stem selected.
#[component]
fn RenameInput(initial: String, is_dir: bool) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let stem = match initial.rfind('.') {
        Some(idx) if idx > 0 && !is_dir => &initial[..idx],
        _ => initial.as_str(),
    };
    let stem_len = stem.encode_utf16().count() as u32;

    Effect::new(move || {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            let _ = input.set_selection_range(0, stem_len);
        }
    });

    let on_input = move |event: ev::Event| {
        let value = event_target_value(&event);
        ctx.apply(|l| l.set_edit_value(&value));
    };

    // Keys stay in the field; the global router must not see them
    let on_keydown = move |event: web_sys::KeyboardEvent| {
        event.stop_propagation();
        match event.key().as_str() {
            "Enter" => {
                event.prevent_default();
                ctx.act(|l| l.commit_edit());
            }
            "Escape" => {
                event.prevent_default();
                ctx.apply(|l| l.cancel_edit());
            }
            _ => {}
        }
    };

    let on_blur = move |_: web_sys::FocusEvent| {
        ctx.act(|l| l.commit_edit());
    };

    view! {
        <input
            class=css::renameInput
            node_ref=input_ref
            type="text"
            spellcheck="false"
            prop:value=initial.clone()
            on:input=on_input
            on:keydown=on_keydown
            on:blur=on_blur
            on:mousedown=|event: MouseEvent| event.stop_propagation()
            on:click=|event: MouseEvent| event.stop_propagation()
            on:dblclick=|event: MouseEvent| event.stop_propagation()
        />
    }
}
