//! Chat input row: Enter or the Send button submits.

use leptos::prelude::*;

use kabaw_chat::display::outgoing_content;

#[component]
pub fn MessageInput(#[prop(into)] disabled: Signal<bool>, on_send: Callback<String>) -> impl IntoView {
    let input = RwSignal::new(String::new());

    let do_send = move || {
        if disabled.get_untracked() {
            return;
        }
        let text = input.get_untracked();
        let Some(content) = outgoing_content(&text) else {
            return;
        };
        on_send.run(content.to_owned());
        input.set(String::new());
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <div class="message-input">
            <input
                id="messageInput"
                class="message-input__field"
                placeholder="Aa"
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
                disabled=move || disabled.get()
            />
            <button
                class="message-input__send"
                class:message-input__send--disabled=move || disabled.get()
                on:click=move |_| do_send()
                disabled=move || disabled.get()
            >
                "Send"
            </button>
        </div>
    }
}
