use jwtsh::app::App;
use jwtsh::utils::logger;
use leptos::prelude::*;
use log::LevelFilter;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let Some(root) = document().get_element_by_id("app") else {
        log::error!("missing #app element");
        return;
    };

    mount_to(root.unchecked_into::<web_sys::HtmlElement>(), App).forget();
}
