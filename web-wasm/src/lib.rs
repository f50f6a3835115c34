//! Recruit Console Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod mount;
#[cfg(all(target_arch = "wasm32", test))]
mod test_support;

use wasm_bindgen::prelude::*;

#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
