//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds an envelope stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Error envelope with a numeric code and message.
    #[must_use]
    pub fn error(id: impl Into<String>, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// An event id as sent by clients: `"3"`, `3` or the wildcard `"*"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EventIdRef {
    /// Numeric id.
    Number(u64),
    /// Textual id or wildcard.
    Text(String),
}

/// Parsed form of an [`EventIdRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    /// Every event.
    All,
    /// One event.
    One(u64),
}

impl EventIdRef {
    /// Resolves the reference; `None` for text that is neither `*` nor a
    /// number.
    #[must_use]
    pub fn target(&self) -> Option<EventTarget> {
        match self {
            Self::Number(n) => Some(EventTarget::One(*n)),
            Self::Text(s) if s.trim() == "*" => Some(EventTarget::All),
            Self::Text(s) => s.trim().parse().ok().map(EventTarget::One),
        }
    }
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to live events of specific events. `["*"]` for all.
    Subscribe {
        /// Event ids to follow.
        event_ids: Vec<EventIdRef>,
    },
    /// Stop following specific events.
    Unsubscribe {
        /// Event ids to drop.
        event_ids: Vec<EventIdRef>,
    },
    /// Current engagement snapshot of one event.
    GetEngagement {
        /// Event id.
        event_id: EventIdRef,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_accepts_strings_numbers_and_wildcard() {
        let raw = r#"{"command": "subscribe", "event_ids": ["1", 2, "*"]}"#;
        let Ok(WsCommand::Subscribe { event_ids }) = serde_json::from_str::<WsCommand>(raw) else {
            panic!("subscribe should parse");
        };
        let targets: Vec<Option<EventTarget>> = event_ids.iter().map(EventIdRef::target).collect();
        assert_eq!(
            targets,
            vec![
                Some(EventTarget::One(1)),
                Some(EventTarget::One(2)),
                Some(EventTarget::All)
            ]
        );
    }

    #[test]
    fn unknown_command_fails_to_parse() {
        let raw = r#"{"command": "refund", "booking_id": 1}"#;
        assert!(serde_json::from_str::<WsCommand>(raw).is_err());
    }

    #[test]
    fn garbage_id_has_no_target() {
        assert_eq!(EventIdRef::Text("abc".to_string()).target(), None);
    }
}
