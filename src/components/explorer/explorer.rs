//! Main explorer component.
//!
//! ## Layout
//!
//! Sidebar on the left; header, file list and status bar stacked on the
//! right. The context menu floats above everything.
//!
//! The explorer also owns the window-level keyboard listener and the
//! background refresh loop.

use arbor_core::config::REFRESH_INTERVAL_MS;
use arbor_core::{Key, KeyInput, Modifiers};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::spawn_local;

use super::{ContextMenu, FileList, Header};
use crate::app::AppContext;
use crate::components::sidebar::Sidebar;
use crate::components::status::Status;
use crate::config::layout;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

// ============================================================================
// Listener Setup
// ============================================================================

/// Route every keydown through the controller.
///
/// The closure is leaked with `forget()`; it lives as long as the page and
/// becomes inert once the context is disposed.
fn setup_key_listener(ctx: AppContext) {
    let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let input = KeyInput::new(
            Key::from_dom(&event.key()),
            Modifiers {
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
                shift: event.shift_key(),
                alt: event.alt_key(),
            },
        );
        let Some(outcome) = ctx.list.try_update(|list| list.handle_key(input)) else {
            return;
        };
        if outcome.prevent_default {
            event.prevent_default();
        }
        ctx.dispatch(outcome.requests);
    }) as Box<dyn Fn(web_sys::KeyboardEvent)>);

    if let Some(window) = dom::window() {
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Re-list the current directory every [`REFRESH_INTERVAL_MS`] until the
/// list is torn down.
fn start_refresh_loop(ctx: AppContext) {
    spawn_local(async move {
        loop {
            TimeoutFuture::new(REFRESH_INTERVAL_MS).await;
            let tick = ctx.list.try_update(|list| {
                if list.is_torn_down() {
                    None
                } else {
                    Some(list.tick())
                }
            });
            match tick.flatten() {
                Some(requests) => ctx.dispatch(requests),
                None => break,
            }
        }
        log::debug!("refresh loop stopped");
    });
}

/// Scroll newly focused entries into view once they render.
fn setup_reveal_effect(ctx: AppContext) {
    Effect::new(move || {
        ctx.list.track();
        if let Some(Some(path)) = ctx.list.try_update_untracked(|list| list.take_reveal()) {
            request_animation_frame(move || dom::reveal_path(&path));
        }
    });
}

// ============================================================================
// Explorer Component
// ============================================================================

/// File explorer view component.
#[component]
pub fn Explorer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Mount runs once
    let mounted = StoredValue::new(false);
    Effect::new(move || {
        if !mounted.get_value() {
            mounted.set_value(true);
            ctx.act(|list| list.mount());
            setup_key_listener(ctx);
            start_refresh_loop(ctx);
        }
    });
    setup_reveal_effect(ctx);

    on_cleanup(move || {
        let _ = ctx.list.try_update(|list| list.teardown());
    });

    let zoom_style = move || {
        let zoom = ctx.list.with(|list| list.zoom());
        format!(
            "font-size: {:.2}px; --row-height: {:.2}px; --indent: {:.2}px;",
            layout::FONT_SIZE * zoom,
            layout::ROW_HEIGHT * zoom,
            layout::INDENT * zoom,
        )
    };

    view! {
        <div class=css::explorer style=zoom_style>
            <Sidebar />
            <main class=css::main>
                <Header />
                <div class=css::body>
                    <FileList />
                </div>
                <Status />
            </main>
            <ContextMenu />
        </div>
    }
}
