//! Message list: one bubble per message, classified by the shared display
//! helpers.

#[cfg(test)]
#[path = "message_list_test.rs"]
mod message_list_test;

use leptos::prelude::*;

use kabaw_chat::SessionState;
use kabaw_chat::display::{MessageStyle, MessageView, message_view};

/// CSS classes for a bubble of the given style.
pub fn bubble_class(style: MessageStyle) -> &'static str {
    match style {
        MessageStyle::System => "message message--system",
        MessageStyle::Own => "message message--own",
        MessageStyle::Peer => "message message--peer",
        MessageStyle::Joined => "message message--joined",
    }
}

#[component]
pub fn MessageList() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <div class="message-list">
            {move || {
                session.with(|s| {
                    s.messages
                        .iter()
                        .map(|msg| message_view(msg, s.current_user_id.as_deref()))
                        .map(|item| view! { <MessageBubble item=item/> })
                        .collect::<Vec<_>>()
                })
            }}
        </div>
    }
}

#[component]
fn MessageBubble(item: MessageView) -> impl IntoView {
    let class = bubble_class(item.style);
    let header = item
        .header
        .map(|header| view! { <div class="message__header">{header}</div> });

    view! {
        <div class=class>
            {header}
            <div class="message__body">{item.body}</div>
        </div>
    }
}
