//! Presentation helpers shared by the browser and terminal front-ends.
//!
//! Both views render the same [`MessageView`]; only the final markup differs.

#[cfg(test)]
#[path = "display_test.rs"]
mod display_test;

use chrono::{DateTime, Local, TimeZone};

use crate::config::DEFAULT_USERNAME;
use crate::message::{ChatMessage, MessageKind};

/// Placeholder shown when a message carries no usable timestamp.
pub const MISSING_CLOCK: &str = "--:--";

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Server or local notice, centered and muted.
    System,
    /// Chat line sent by the local user.
    Own,
    /// Chat line from someone else.
    Peer,
    /// Join acknowledgement.
    Joined,
}

/// Display-ready projection of a [`ChatMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub style: MessageStyle,
    pub username: String,
    /// Local `HH:MM:SS`, or [`MISSING_CLOCK`].
    pub time: String,
    pub body: String,
    /// `"{username} ({time})"`, present for chat lines only.
    pub header: Option<String>,
}

#[must_use]
pub fn message_view(message: &ChatMessage, current_user_id: Option<&str>) -> MessageView {
    let style = match message.kind {
        MessageKind::System => MessageStyle::System,
        MessageKind::UserConnected => MessageStyle::Joined,
        MessageKind::Message if message.is_own(current_user_id) => MessageStyle::Own,
        MessageKind::Message => MessageStyle::Peer,
    };
    let username = message.username.as_deref().unwrap_or(DEFAULT_USERNAME).to_owned();
    let time = format_clock(message.timestamp.as_deref());
    let header = (message.kind == MessageKind::Message).then(|| format!("{username} ({time})"));

    MessageView {
        style,
        username,
        time,
        body: message.body().to_owned(),
        header,
    }
}

/// Render an RFC 3339 timestamp as local wall-clock time.
#[must_use]
pub fn format_clock(timestamp: Option<&str>) -> String {
    format_clock_in(timestamp, &Local)
}

pub(crate) fn format_clock_in<Tz>(timestamp: Option<&str>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = timestamp else {
        return MISSING_CLOCK.to_owned();
    };
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(parsed) => parsed.with_timezone(zone).format("%H:%M:%S").to_string(),
        Err(_) => MISSING_CLOCK.to_owned(),
    }
}

/// One-line rendering used by the terminal client.
#[must_use]
pub fn terminal_line(view: &MessageView) -> String {
    match view.style {
        MessageStyle::System => format!("[SYSTEM] {}", view.body),
        MessageStyle::Joined => format!("*** {}", view.body),
        MessageStyle::Own => format!("You [{}] > {}", view.time, view.body),
        MessageStyle::Peer => format!("{} [{}] > {}", view.username, view.time, view.body),
    }
}

/// Content to send for raw input, or `None` when there is nothing to send.
///
/// Non-blank input goes out exactly as typed.
#[must_use]
pub fn outgoing_content(input: &str) -> Option<&str> {
    if input.trim().is_empty() { None } else { Some(input) }
}
