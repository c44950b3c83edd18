//! Connection settings modal: pick username/channel, connect or disconnect.

use leptos::prelude::*;

use kabaw_chat::SessionState;

use crate::net::session::ChatSession;
use crate::state::settings::SettingsState;

#[component]
pub fn SettingsModal() -> impl IntoView {
    let settings = expect_context::<RwSignal<SettingsState>>();
    let session_state = expect_context::<RwSignal<SessionState>>();
    let session = expect_context::<ChatSession>();

    let username = RwSignal::new(String::new());
    let channel = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let is_open = move || settings.with(|s| s.show_settings);
    let connected = move || session_state.with(|s| s.connected);

    // Re-seed the draft from committed settings each time the modal opens.
    Effect::new(move || {
        if !is_open() {
            return;
        }
        let config = settings.with_untracked(|s| s.config.clone());
        username.set(config.username);
        channel.set(config.channel);
        error.set(None);
    });

    let on_connect = move |_| {
        let next = settings.with_untracked(|s| s.connect_as(&username.get_untracked(), &channel.get_untracked()));
        match next {
            Ok(next) => settings.set(next),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let on_disconnect = move |_| {
        session.disconnect();
        settings.update(SettingsState::disconnect);
    };

    let on_close = move |_| settings.update(|s| s.show_settings = false);

    view! {
        <Show when=is_open>
            <div class="settings-backdrop">
                <div class="settings-modal">
                    <h2 class="settings-modal__title">"Connection Settings"</h2>

                    <label for="usernameInput" class="settings-modal__label">"Username"</label>
                    <input
                        id="usernameInput"
                        class="settings-modal__input"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                        disabled=connected
                    />

                    <label for="channelInput" class="settings-modal__label">"Channel"</label>
                    <input
                        id="channelInput"
                        class="settings-modal__input"
                        prop:value=move || channel.get()
                        on:input=move |ev| channel.set(event_target_value(&ev))
                        disabled=connected
                    />

                    {move || error.get().map(|msg| view! { <div class="settings-modal__error">{msg}</div> })}

                    <div class="settings-modal__actions">
                        <Show
                            when=connected
                            fallback=move || {
                                view! {
                                    <button class="btn btn--connect" on:click=on_connect>
                                        "Connect"
                                    </button>
                                }
                            }
                        >
                            <button class="btn btn--disconnect" on:click=on_disconnect>
                                "Disconnect"
                            </button>
                        </Show>
                        <button class="btn btn--close" on:click=on_close>
                            "Close"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
