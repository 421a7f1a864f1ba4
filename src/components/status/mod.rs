//! Status bar component.
//!
//! Displays item and selection counts, zoom level, the outside-home notice
//! and the most recent error.

use arbor_core::format::format_count;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/status/status.module.css");

/// Status bar below the file list.
///
/// | Section | Content |
/// |---------|---------|
/// | Left    | `12 items, 3 selected` |
/// | Middle  | Error toast or outside-home notice |
/// | Right   | Zoom percentage (click to reset) |
#[component]
pub fn Status() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let summary = Signal::derive(move || {
        ctx.list.with(|l| {
            let items = format_count(l.item_count());
            match l.selection().len() {
                0 => items,
                n => format!("{}, {} selected", items, n),
            }
        })
    });
    let error = Memo::new(move |_| ctx.list.with(|l| l.error().map(|e| e.to_string())));
    let outside_home = Signal::derive(move || ctx.list.with(|l| !l.in_trash() && l.is_outside_home()));
    let zoom = Signal::derive(move || ctx.list.with(|l| format!("{:.0}%", l.zoom() * 100.0)));

    view! {
        <footer class=css::bar>
            <span class=css::summary>{summary}</span>

            <div class=css::middle>
                {move || match error.get() {
                    Some(message) => view! {
                        <span class=css::error role="alert">
                            <span class=css::labelIcon><Icon icon=ic::WARNING /></span>
                            <span class=css::value>{message}</span>
                            <button
                                class=css::dismiss
                                title="Dismiss"
                                on:click=move |_| ctx.apply(|l| l.dismiss_error())
                            >
                                <Icon icon=ic::CLOSE />
                            </button>
                        </span>
                    }
                    .into_any(),
                    None => view! {
                        <Show when=move || outside_home.get()>
                            <span class=css::notice>"Outside your home folder"</span>
                        </Show>
                    }
                    .into_any(),
                }}
            </div>

            <button
                class=css::zoom
                title="Reset zoom"
                on:click=move |_| ctx.act(|l| l.zoom_reset())
            >
                {zoom}
            </button>
        </footer>
    }
}
