use super::*;
use chrono::{FixedOffset, Utc};

fn chat(user_id: &str, username: Option<&str>, content: &str, timestamp: Option<&str>) -> ChatMessage {
    ChatMessage {
        kind: MessageKind::Message,
        username: username.map(str::to_owned),
        user_id: Some(user_id.to_owned()),
        content: Some(content.to_owned()),
        timestamp: timestamp.map(str::to_owned),
        channel: Some("general".to_owned()),
    }
}

// =============================================================
// message_view
// =============================================================

#[test]
fn view_classifies_by_kind_and_ownership() {
    let own = chat("u1", Some("Alice"), "hi", None);
    let peer = chat("u2", Some("Bob"), "yo", None);
    let notice = ChatMessage::system_notice("Connection error");
    let joined = ChatMessage { kind: MessageKind::UserConnected, ..chat("u1", Some("System"), "Welcome", None) };

    assert_eq!(message_view(&own, Some("u1")).style, MessageStyle::Own);
    assert_eq!(message_view(&peer, Some("u1")).style, MessageStyle::Peer);
    assert_eq!(message_view(&own, None).style, MessageStyle::Peer);
    assert_eq!(message_view(&notice, Some("system")).style, MessageStyle::System);
    assert_eq!(message_view(&joined, Some("u1")).style, MessageStyle::Joined);
}

#[test]
fn header_only_for_chat_lines() {
    let line = message_view(&chat("u2", Some("Bob"), "yo", None), None);
    assert_eq!(line.header.as_deref(), Some("Bob (--:--)"));

    let notice = message_view(&ChatMessage::system_notice("hello"), None);
    assert_eq!(notice.header, None);
    assert_eq!(notice.body, "hello");
}

#[test]
fn view_fills_missing_fields() {
    let bare = ChatMessage {
        kind: MessageKind::Message,
        username: None,
        user_id: None,
        content: None,
        timestamp: None,
        channel: None,
    };
    let view = message_view(&bare, Some("u1"));
    assert_eq!(view.username, "Anonymous");
    assert_eq!(view.body, "");
    assert_eq!(view.time, MISSING_CLOCK);
    assert_eq!(view.style, MessageStyle::Peer);
}

// =============================================================
// format_clock
// =============================================================

#[test]
fn clock_converts_into_zone() {
    let ts = Some("2024-05-01T13:04:05.123Z");
    assert_eq!(format_clock_in(ts, &Utc), "13:04:05");
    let manila = FixedOffset::east_opt(8 * 3600).expect("offset");
    assert_eq!(format_clock_in(ts, &manila), "21:04:05");
}

#[test]
fn clock_accepts_offsets() {
    assert_eq!(format_clock_in(Some("2024-05-01T08:00:00+02:00"), &Utc), "06:00:00");
}

#[test]
fn clock_placeholder_for_missing_or_garbage() {
    assert_eq!(format_clock(None), "--:--");
    assert_eq!(format_clock(Some("")), "--:--");
    assert_eq!(format_clock(Some("yesterday")), "--:--");
}

#[test]
fn local_clock_has_wall_clock_shape() {
    let rendered = format_clock(Some("2024-05-01T13:04:05Z"));
    assert_eq!(rendered.len(), 8);
    assert_eq!(rendered.matches(':').count(), 2);
}

// =============================================================
// terminal_line
// =============================================================

#[test]
fn terminal_lines_per_style() {
    let ts = Some("2024-05-01T13:04:05Z");
    let mut own = message_view(&chat("u1", Some("Alice"), "hi", ts), Some("u1"));
    own.time = "13:04:05".into();
    assert_eq!(terminal_line(&own), "You [13:04:05] > hi");

    let mut peer = message_view(&chat("u2", Some("Bob"), "yo", ts), Some("u1"));
    peer.time = "13:04:05".into();
    assert_eq!(terminal_line(&peer), "Bob [13:04:05] > yo");

    let notice = message_view(&ChatMessage::system_notice("Connection disconnected"), None);
    assert_eq!(terminal_line(&notice), "[SYSTEM] Connection disconnected");

    let joined = ChatMessage { kind: MessageKind::UserConnected, ..chat("u1", None, "Welcome to the chat!", None) };
    assert_eq!(terminal_line(&message_view(&joined, None)), "*** Welcome to the chat!");
}

// =============================================================
// outgoing_content
// =============================================================

#[test]
fn outgoing_rejects_blank_and_keeps_text_verbatim() {
    assert_eq!(outgoing_content(""), None);
    assert_eq!(outgoing_content("   \t"), None);
    assert_eq!(outgoing_content("  hi  "), Some("  hi  "));
}
