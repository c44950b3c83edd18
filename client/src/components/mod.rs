//! UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read `RwSignal<SessionState>`, `RwSignal<SettingsState>` and the
//! `ChatSession` handle from Leptos context providers set up in `App`.

pub mod chat_window;
pub mod message_input;
pub mod message_list;
pub mod settings_modal;
