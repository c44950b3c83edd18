//! Chat wire model shared by inbound events, outbound sends, and local notices.
//!
//! Inbound events are JSON objects with a `type` tag plus optional
//! `username`, `user_id`, `content`, `timestamp`, and `channel` fields.
//! Outbound sends carry only `type` and `content`.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

/// Display name attached to locally synthesized notices.
pub const SYSTEM_USERNAME: &str = "System";
/// User ID attached to locally synthesized notices.
pub const SYSTEM_USER_ID: &str = "system";

/// Error returned by [`decode_message`] and [`encode_outbound`].
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The inbound payload is not a valid chat message.
    #[error("failed to decode chat message: {0}")]
    Decode(#[source] serde_json::Error),
    /// The outbound payload could not be serialized.
    #[error("failed to encode chat message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Tag discriminating how a message is rendered and what it means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A chat line relayed by the server.
    Message,
    /// A notice, either from the server or synthesized locally.
    System,
    /// Join acknowledgement carrying the server-assigned user ID.
    UserConnected,
}

/// A single chat message as received from the server or synthesized locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// ISO-8601 creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ChatMessage {
    /// Build a local system notice stamped with the current UTC time.
    #[must_use]
    pub fn system_notice(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::System,
            username: Some(SYSTEM_USERNAME.to_owned()),
            user_id: Some(SYSTEM_USER_ID.to_owned()),
            content: Some(content.into()),
            timestamp: Some(now_rfc3339()),
            channel: None,
        }
    }

    /// Whether this message was sent by `current_user_id`.
    ///
    /// System notices are never owned, even if the IDs happen to collide.
    #[must_use]
    pub fn is_own(&self, current_user_id: Option<&str>) -> bool {
        if self.kind == MessageKind::System {
            return false;
        }
        match (self.user_id.as_deref(), current_user_id) {
            (Some(sender), Some(me)) => sender == me,
            _ => false,
        }
    }

    /// Body text, or an empty string when the message carries none.
    #[must_use]
    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Client → server payload: `{"type":"message","content":...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
}

impl OutboundMessage {
    #[must_use]
    pub fn chat(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Message,
            content: content.into(),
        }
    }
}

/// Decode one inbound text frame.
///
/// # Errors
///
/// Returns [`MessageError::Decode`] for invalid JSON, a missing or unknown
/// `type`, or fields of the wrong shape.
pub fn decode_message(raw: &str) -> Result<ChatMessage, MessageError> {
    serde_json::from_str(raw).map_err(MessageError::Decode)
}

/// Encode an outbound chat send as a JSON text frame.
///
/// # Errors
///
/// Returns [`MessageError::Encode`] if serialization fails.
pub fn encode_outbound(message: &OutboundMessage) -> Result<String, MessageError> {
    serde_json::to_string(message).map_err(MessageError::Encode)
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
