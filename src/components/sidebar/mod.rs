//! Sidebar component.
//!
//! Shortcuts to the home directory, the host's drives and the trash.

use arbor_core::entry::basename;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/sidebar/sidebar.module.css");

fn item_class(active: bool) -> String {
    if active {
        format!("{} {}", css::item, css::itemActive)
    } else {
        css::item.to_string()
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let at_home = Signal::derive(move || {
        ctx.list
            .with(|l| !l.in_trash() && l.home().is_some() && l.home() == l.current_path())
    });
    let in_trash = Signal::derive(move || ctx.list.with(|l| l.in_trash()));
    let trash_count = Signal::derive(move || ctx.list.with(|l| l.trash_count()));
    let drives = Memo::new(move |_| ctx.list.with(|l| l.drives().to_vec()));

    view! {
        <nav class=css::sidebar aria-label="Places">
            <div class=css::brand>{APP_NAME}</div>

            <div class=css::sectionTitle>"Favorites"</div>
            <button
                class=move || item_class(at_home.get())
                on:click=move |_| ctx.act(|l| l.navigate_home())
            >
                <span class=css::icon><Icon icon=ic::HOME /></span>
                <span class=css::label>"Home"</span>
            </button>

            <Show when=move || drives.with(|d| !d.is_empty())>
                <div class=css::sectionTitle>"Locations"</div>
                <For
                    each=move || drives.get()
                    key=|drive| drive.clone()
                    children=move |drive| {
                        let target = drive.clone();
                        let active = {
                            let drive = drive.clone();
                            move || ctx.list.with(|l| !l.in_trash() && l.current_path() == Some(drive.as_str()))
                        };
                        let label = match basename(&drive) {
                            "" => drive.clone(),
                            name => name.to_string(),
                        };
                        view! {
                            <button
                                class=move || item_class(active())
                                title=drive
                                on:click=move |_| ctx.act(|l| l.navigate(&target))
                            >
                                <span class=css::icon><Icon icon=ic::DRIVE /></span>
                                <span class=css::label>{label}</span>
                            </button>
                        }
                    }
                />
            </Show>

            <div class=css::spacer></div>

            <button
                class=move || item_class(in_trash.get())
                on:click=move |_| ctx.act(|l| if l.in_trash() { l.close_trash() } else { l.open_trash() })
            >
                <span class=css::icon><Icon icon=ic::TRASH /></span>
                <span class=css::label>"Trash"</span>
                <Show when=move || { trash_count.get() > 0 }>
                    <span class=css::badge>{move || trash_count.get()}</span>
                </Show>
            </button>
        </nav>
    }
}
