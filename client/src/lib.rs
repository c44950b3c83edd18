//! # client
//!
//! Leptos + WASM browser front-end for Kabaw Chat.
//!
//! The page owns one `SessionHook` (from `kabaw-chat`) driven over a
//! `gloo-net` WebSocket. Components read session and settings state from
//! Leptos context and never touch the socket directly.

pub mod app;
pub mod components;
pub mod net;
pub mod state;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
