//! Main chat window: status header, scrolling message list, input, and the
//! settings modal.
//!
//! The list sticks to the bottom while the reader is near it (or just sent
//! something). Otherwise new messages raise a "scroll down" button instead of
//! yanking the view.

#[cfg(test)]
#[path = "chat_window_test.rs"]
mod chat_window_test;

use leptos::prelude::*;

use kabaw_chat::SessionState;

use crate::components::message_input::MessageInput;
use crate::components::message_list::MessageList;
use crate::components::settings_modal::SettingsModal;
use crate::net::session::ChatSession;
use crate::state::settings::SettingsState;

/// Distance from the bottom, in pixels, that still counts as "at the bottom".
pub const NEAR_BOTTOM_PX: i32 = 100;

/// Whether a scroll container is within [`NEAR_BOTTOM_PX`] of its end.
pub fn is_near_bottom(scroll_top: i32, client_height: i32, scroll_height: i32) -> bool {
    scroll_top + client_height >= scroll_height - NEAR_BOTTOM_PX
}

/// Header status text and CSS class.
pub fn status_badge(connected: bool) -> (&'static str, &'static str) {
    if connected {
        ("Connected", "status status--connected")
    } else {
        ("Disconnected", "status status--disconnected")
    }
}

#[component]
pub fn ChatWindow() -> impl IntoView {
    let session_state = expect_context::<RwSignal<SessionState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let session = expect_context::<ChatSession>();

    let list_ref = NodeRef::<leptos::html::Div>::new();
    let show_scroll_down = RwSignal::new(false);
    let force_scroll = StoredValue::new(false);

    Effect::new(move || {
        session_state.track();
        let force = force_scroll.get_value();
        force_scroll.set_value(false);

        if force || list_near_bottom(list_ref) {
            scroll_list_to_bottom(list_ref);
            show_scroll_down.set(false);
        } else {
            show_scroll_down.set(true);
        }
    });

    let on_scroll = move |_| show_scroll_down.set(!list_near_bottom(list_ref));

    let on_scroll_down = move |_| {
        scroll_list_to_bottom(list_ref);
        show_scroll_down.set(false);
    };

    let on_send = Callback::new(move |content: String| {
        force_scroll.set_value(true);
        show_scroll_down.set(false);
        if !session.send(&content) {
            leptos::logging::warn!("message not sent; session is not open");
        }
    });

    let input_disabled = Signal::derive(move || {
        settings.with(|s| s.show_settings) || !session_state.with(|s| s.connected)
    });

    let status = move || status_badge(session_state.with(|s| s.connected));

    view! {
        <div class="chat-window">
            <header class="chat-window__header">
                <h1 class="chat-window__title">"Kabaw Chat"</h1>
                <div class="chat-window__status">
                    <span class=move || status().1>{move || status().0}</span>
                    <button
                        class="chat-window__settings"
                        title="Connection settings"
                        on:click=move |_| settings.update(|s| s.show_settings = true)
                    >
                        "Settings"
                    </button>
                </div>
            </header>

            <div class="chat-window__list" node_ref=list_ref on:scroll=on_scroll>
                <MessageList/>
            </div>

            <Show when=move || show_scroll_down.get()>
                <button class="chat-window__scroll-down" title="Scroll down" on:click=on_scroll_down>
                    "\u{2193}"
                </button>
            </Show>

            <MessageInput disabled=input_disabled on_send=on_send/>

            <SettingsModal/>
        </div>
    }
}

#[cfg(feature = "csr")]
fn list_near_bottom(list_ref: NodeRef<leptos::html::Div>) -> bool {
    list_ref
        .get_untracked()
        .is_none_or(|el| is_near_bottom(el.scroll_top(), el.client_height(), el.scroll_height()))
}

#[cfg(not(feature = "csr"))]
fn list_near_bottom(_list_ref: NodeRef<leptos::html::Div>) -> bool {
    true
}

#[cfg(feature = "csr")]
fn scroll_list_to_bottom(list_ref: NodeRef<leptos::html::Div>) {
    if let Some(el) = list_ref.get_untracked() {
        el.set_scroll_top(el.scroll_height());
    }
}

#[cfg(not(feature = "csr"))]
fn scroll_list_to_bottom(_list_ref: NodeRef<leptos::html::Div>) {}
