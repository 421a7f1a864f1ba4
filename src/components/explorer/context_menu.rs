//! Context menu overlay.

use arbor_core::menu::MenuItem;
use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::app::AppContext;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/explorer/context_menu.module.css");

/// Right-click menu for the entry or background the controller recorded.
///
/// A transparent backdrop closes the menu on any press outside it. Once
/// rendered, the menu is measured and pushed back inside the window.
#[component]
pub fn ContextMenu() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let menu_ref = NodeRef::<leptos::html::Div>::new();

    let menu = Memo::new(move |_| ctx.list.with(|l| l.context_menu().cloned()));
    let items = Memo::new(move |_| ctx.list.with(|l| l.menu_items()));

    Effect::new(move || {
        let Some(open) = menu.get() else {
            return;
        };
        let Some(el) = menu_ref.get() else {
            return;
        };
        let rect = el.get_bounding_client_rect();
        let (vw, vh) = dom::viewport_size();
        let mut clamped = open.clone();
        clamped.clamp(rect.width(), rect.height(), vw, vh);
        // Only write when it moves, or the effect would re-trigger forever
        if clamped != open {
            ctx.apply(|l| l.clamp_context_menu(rect.width(), rect.height(), vw, vh));
        }
    });

    let close = move |event: MouseEvent| {
        event.prevent_default();
        ctx.apply(|l| l.close_context_menu());
    };

    view! {
        <Show when=move || menu.with(|m| m.is_some())>
            <div class=css::backdrop on:mousedown=close on:contextmenu=close></div>
            <div
                class=css::menu
                node_ref=menu_ref
                role="menu"
                style=move || {
                    menu.with(|m| {
                        m.as_ref()
                            .map(|m| format!("left: {}px; top: {}px;", m.x, m.y))
                            .unwrap_or_default()
                    })
                }
                on:contextmenu=|event: MouseEvent| event.prevent_default()
            >
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|item| match item {
                            MenuItem::Separator => {
                                view! { <div class=css::separator role="separator"></div> }.into_any()
                            }
                            MenuItem::Action { action, label, shortcut, danger } => {
                                let class = if danger {
                                    format!("{} {}", css::item, css::danger)
                                } else {
                                    css::item.to_string()
                                };
                                view! {
                                    <button
                                        class=class
                                        role="menuitem"
                                        on:click=move |_| ctx.act(|l| l.menu_action(action))
                                    >
                                        <span class=css::label>{label}</span>
                                        {shortcut.map(|s| view! { <span class=css::shortcut>{s}</span> })}
                                    </button>
                                }
                                .into_any()
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}
