mod app;
mod bridge;
mod components;
mod config;
mod logging;
mod utils;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    let root = document()
        .get_element_by_id("app")
        .expect("Failed to find #app element")
        .unchecked_into::<web_sys::HtmlElement>();

    log::info!("{} starting", config::APP_NAME);
    mount_to(root, App).forget();
}
