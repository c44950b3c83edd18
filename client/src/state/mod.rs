//! Client-side state provided through Leptos context.
//!
//! Session state itself is `kabaw_chat::SessionState`, mirrored into an
//! `RwSignal` by the session observer. Only UI-owned state lives here.

pub mod settings;
