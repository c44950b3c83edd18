//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::chat_window::ChatWindow;
use crate::net::session::ChatSession;
use crate::state::settings::SettingsState;
use kabaw_chat::SessionState;

/// Root application component.
///
/// Provides session state, settings and the session handle, then keeps the
/// live transport in step with the settings.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session_state = RwSignal::new(SessionState::default());
    let settings = RwSignal::new(SettingsState::for_page());
    let session = ChatSession::new(session_state, settings);

    provide_context(session_state);
    provide_context(settings);
    provide_context(session);

    // Address (or None when the user is not asking to be connected).
    let target = Memo::new(move |_| settings.with(SettingsState::target));

    Effect::new(move || {
        session.retarget(target.get());
    });

    view! {
        <Title text="Kabaw Chat"/>
        <ChatWindow/>
    }
}
