//! Root application module.
//!
//! Contains the main App component, the AppContext that owns the file list
//! controller, and the request dispatch loop connecting it to the host.

use arbor_core::{FileList, Request, driver};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::bridge::{LocalSettings, TauriBackend};
use crate::components::Explorer;
use crate::config::APP_NAME;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/app.module.css");

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// component with `use_context::<AppContext>()`. The controller is the single
/// source of truth; components read it through `list.with(..)` and mutate it
/// only through [`act`](Self::act) so follow-up requests are never dropped.
///
/// # Note
///
/// This struct is `Copy` because its only field is a Leptos signal.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub list: RwSignal<FileList>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            list: RwSignal::new(FileList::new()),
        }
    }

    /// Run `requests` against the host. Each completion is applied to the
    /// list and whatever it asks for next is dispatched in turn.
    ///
    /// Requests run concurrently; the controller tags them so late or
    /// out-of-order completions are discarded.
    pub fn dispatch(self, requests: Vec<Request>) {
        for request in requests {
            log::debug!("dispatch {}", request.label());
            spawn_local(async move {
                let completion = driver::execute(&TauriBackend, &LocalSettings, request).await;
                // None once the owner is disposed.
                if let Some(next) = self.list.try_update(|list| list.complete(completion)) {
                    self.dispatch(next);
                }
            });
        }
    }

    /// Apply `f` to the list and dispatch the requests it returns.
    pub fn act(self, f: impl FnOnce(&mut FileList) -> Vec<Request>) {
        if let Some(requests) = self.list.try_update(f) {
            self.dispatch(requests);
        }
    }

    /// Apply a state-only change.
    pub fn apply(self, f: impl FnOnce(&mut FileList)) {
        self.list.update(f);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root component: provides [`AppContext`] and renders the explorer.
///
/// A render failure replaces the explorer with the error list and a reload
/// button.
#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext::new());

    let reload = |_: web_sys::MouseEvent| {
        if let Some(window) = dom::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <ErrorBoundary fallback=move |errors| view! {
            <div class=css::crashed role="alert">
                <p class=css::title>{format!("{} stopped responding", APP_NAME)}</p>
                <ul class=css::errors>
                    {move || errors
                        .get()
                        .into_iter()
                        .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                        .collect_view()
                    }
                </ul>
                <button class=css::reload on:click=reload>"Reload window"</button>
            </div>
        }>
            <Explorer />
        </ErrorBoundary>
    }
}
