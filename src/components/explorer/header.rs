//! Explorer header component.
//!
//! Contains navigation buttons, the current location title, and the new-item
//! and view menus.

use arbor_core::SortField;
use arbor_core::entry::basename;
use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen::JsCast;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// Close a dropdown when focus leaves its wrapper.
fn close_on_focusout(set_menu_open: WriteSignal<bool>) -> impl Fn(web_sys::FocusEvent) + 'static {
    move |event: web_sys::FocusEvent| {
        if let Some(related) = event.related_target() {
            if let Some(current) = event.current_target()
                && let (Some(wrapper), Some(target)) = (
                    current.dyn_ref::<web_sys::Node>(),
                    related.dyn_ref::<web_sys::Node>(),
                )
                && !wrapper.contains(Some(target))
            {
                set_menu_open.set(false);
            }
        } else {
            // Focus moved outside the document
            set_menu_open.set(false);
        }
    }
}

/// Explorer header with navigation and actions.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (new_menu_open, set_new_menu_open) = signal(false);
    let (more_menu_open, set_more_menu_open) = signal(false);

    let in_trash = Signal::derive(move || ctx.list.with(|l| l.in_trash()));

    let title = Memo::new(move |_| {
        ctx.list.with(|l| {
            if l.in_trash() {
                return "Trash".to_string();
            }
            match l.current_path() {
                Some(path) if l.home() == Some(path) => "Home".to_string(),
                Some(path) => {
                    let name = basename(path);
                    if name.is_empty() { path.to_string() } else { name.to_string() }
                }
                None => String::new(),
            }
        })
    });

    let title_icon = Memo::new(move |_| {
        ctx.list.with(|l| {
            if l.in_trash() {
                ic::TRASH
            } else if l.home().is_some() && l.home() == l.current_path() {
                ic::HOME
            } else {
                ic::FOLDER
            }
        })
    });

    let full_path = move || ctx.list.with(|l| l.current_path().unwrap_or_default().to_string());

    view! {
        <header class=css::header>
            <NavButtons in_trash=in_trash />

            <div class=css::title title=full_path>
                <span class=css::titleIcon>
                    {move || view! { <Icon icon=title_icon.get() /> }}
                </span>
                <span class=css::titleLabel>{move || title.get()}</span>
            </div>

            <div class=css::actionButtons>
                <button
                    class=css::actionButton
                    on:click=move |_| ctx.act(|l| l.refresh())
                    title="Refresh"
                >
                    <Icon icon=ic::REFRESH />
                </button>
                <NewMenu
                    menu_open=new_menu_open
                    set_menu_open=set_new_menu_open
                    disabled=in_trash
                />
                <MoreMenu
                    menu_open=more_menu_open
                    set_menu_open=set_more_menu_open
                />
            </div>
        </header>
    }
}

/// Navigation buttons (back, forward, up).
#[component]
fn NavButtons(in_trash: Signal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let can_back = Signal::derive(move || ctx.list.with(|l| l.can_go_back()));
    let can_forward = Signal::derive(move || ctx.list.with(|l| l.can_go_forward()));
    let can_up = Signal::derive(move || !in_trash.get() && ctx.list.with(|l| l.current_path().is_some()));

    view! {
        <div class=css::navButtons>
            <button
                class=move || nav_button_class(!can_back.get())
                on:click=move |_| ctx.act(|l| l.go_back())
                disabled=move || !can_back.get()
                title="Back"
            >
                <Icon icon=ic::CHEVRON_LEFT />
            </button>
            <button
                class=move || nav_button_class(!can_forward.get())
                on:click=move |_| ctx.act(|l| l.go_forward())
                disabled=move || !can_forward.get()
                title="Forward"
            >
                <Icon icon=ic::CHEVRON_RIGHT />
            </button>
            <button
                class=move || nav_button_class(!can_up.get())
                on:click=move |_| ctx.act(|l| l.navigate_up())
                disabled=move || !can_up.get()
                title="Enclosing folder"
            >
                <Icon icon=ic::PARENT_DIR />
            </button>
        </div>
    }
}

fn nav_button_class(disabled: bool) -> String {
    if disabled {
        format!("{} {}", css::navButton, css::navButtonDisabled)
    } else {
        css::navButton.to_string()
    }
}

/// New file/folder dropdown menu.
#[component]
fn NewMenu(
    menu_open: ReadSignal<bool>,
    set_menu_open: WriteSignal<bool>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let shortcut = move |key: &str| ctx.list.with(|l| l.platform().shortcut(key));

    let on_new_file = move |_: leptos::ev::MouseEvent| {
        set_menu_open.set(false);
        ctx.act(|l| l.create_file());
    };

    let on_new_folder = move |_: leptos::ev::MouseEvent| {
        set_menu_open.set(false);
        ctx.act(|l| l.create_folder());
    };

    view! {
        <div class=css::dropdownWrapper on:focusout=close_on_focusout(set_menu_open)>
            <button
                class=css::actionButton
                on:click=move |_| set_menu_open.update(|v| *v = !*v)
                disabled=move || disabled.get()
                title="New file or folder"
            >
                <Icon icon=ic::PLUS />
            </button>
            <Show when=move || menu_open.get() && !disabled.get()>
                <div class=css::dropdownMenu>
                    <button class=css::dropdownItem on:click=on_new_file>
                        <span class=css::dropdownIcon><Icon icon=ic::FILE /></span>
                        "New File"
                        <span class=css::dropdownShortcut>{move || shortcut("N")}</span>
                    </button>
                    <button class=css::dropdownItem on:click=on_new_folder>
                        <span class=css::dropdownIcon><Icon icon=ic::FOLDER /></span>
                        "New Folder"
                        <span class=css::dropdownShortcut>{move || shortcut("Shift+N")}</span>
                    </button>
                </div>
            </Show>
        </div>
    }
}

/// View options: zoom, hidden files and sort order.
#[component]
fn MoreMenu(menu_open: ReadSignal<bool>, set_menu_open: WriteSignal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let shortcut = move |key: &str| ctx.list.with(|l| l.platform().shortcut(key));

    let show_hidden = Signal::derive(move || ctx.list.with(|l| l.show_hidden()));
    let zoom_label = move || ctx.list.with(|l| format!("{:.0}%", l.zoom() * 100.0));

    let sort_item = move |field: SortField| {
        let active = move || ctx.list.with(|l| l.sort_preference().field == field);
        let ascending = move || {
            ctx.list
                .with(|l| l.sort_preference().direction == arbor_core::SortDirection::Ascending)
        };
        view! {
            <button
                class=move || {
                    if active() {
                        format!("{} {}", css::dropdownItem, css::dropdownItemActive)
                    } else {
                        css::dropdownItem.to_string()
                    }
                }
                on:click=move |_| {
                    set_menu_open.set(false);
                    ctx.act(|l| l.set_sort_field(field));
                }
            >
                <span class=css::dropdownIcon>
                    {move || active().then(|| {
                        let icon = if ascending() { ic::SORT_ASCENDING } else { ic::SORT_DESCENDING };
                        view! { <Icon icon=icon /> }
                    })}
                </span>
                {format!("Sort by {}", field.label())}
            </button>
        }
    };

    view! {
        <div class=css::dropdownWrapper on:focusout=close_on_focusout(set_menu_open)>
            <button
                class=css::actionButton
                on:click=move |_| set_menu_open.update(|v| *v = !*v)
                title="View options"
            >
                <Icon icon=ic::MORE />
            </button>
            <Show when=move || menu_open.get()>
                <div class=css::dropdownMenu>
                    <button
                        class=css::dropdownItem
                        on:click=move |_| {
                            set_menu_open.set(false);
                            ctx.act(|l| l.toggle_hidden());
                        }
                    >
                        <span class=css::dropdownIcon>
                            {move || if show_hidden.get() {
                                view! { <Icon icon=ic::EYE_OFF /> }.into_any()
                            } else {
                                view! { <Icon icon=ic::EYE /> }.into_any()
                            }}
                        </span>
                        {move || if show_hidden.get() { "Hide Hidden Files" } else { "Show Hidden Files" }}
                        <span class=css::dropdownShortcut>{move || shortcut("H")}</span>
                    </button>
                    <div class=css::dropdownDivider></div>
                    {sort_item(SortField::Name)}
                    {sort_item(SortField::Date)}
                    {sort_item(SortField::Size)}
                    <div class=css::dropdownDivider></div>
                    <button class=css::dropdownItem on:click=move |_| ctx.act(|l| l.zoom_in())>
                        <span class=css::dropdownIcon><Icon icon=ic::ZOOM_IN /></span>
                        "Zoom In"
                        <span class=css::dropdownShortcut>{move || shortcut("=")}</span>
                    </button>
                    <button class=css::dropdownItem on:click=move |_| ctx.act(|l| l.zoom_out())>
                        <span class=css::dropdownIcon><Icon icon=ic::ZOOM_OUT /></span>
                        "Zoom Out"
                        <span class=css::dropdownShortcut>{move || shortcut("-")}</span>
                    </button>
                    <button class=css::dropdownItem on:click=move |_| ctx.act(|l| l.zoom_reset())>
                        <span class=css::dropdownIcon></span>
                        {move || format!("Actual Size ({})", zoom_label())}
                        <span class=css::dropdownShortcut>{move || shortcut("0")}</span>
                    </button>
                </div>
            </Show>
        </div>
    }
}
