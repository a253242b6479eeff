use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An incoming text message from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Platform-specific user ID.
    pub sender_id: String,
    /// Human-readable sender name.
    pub sender_name: Option<String>,
    /// Message text content.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Platform-specific conversation ID used both as the state key and
    /// as the target for replies (e.g. Telegram chat_id).
    pub reply_target: String,
}

/// An inline-button press reported by a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackPress {
    /// Platform callback ID, needed to acknowledge the press.
    pub id: String,
    pub channel: String,
    pub sender_id: String,
    /// Opaque action payload carried by the pressed button.
    pub action: String,
    /// Conversation the pressed message lives in.
    pub reply_target: String,
    /// ID of the message the keyboard is attached to, when the platform
    /// reports it.
    pub message_id: Option<i64>,
}

/// Anything a channel can deliver to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChannelEvent {
    Message(IncomingMessage),
    Callback(CallbackPress),
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    /// Platform-specific target for routing (e.g. Telegram chat_id).
    pub reply_target: String,
    /// Inline keyboard attached below the message, if any.
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
    /// Render the text in a fixed-width, copy-friendly block.
    #[serde(default)]
    pub monospace: bool,
}

/// An inline keyboard: rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

/// A single inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Caption shown to the user.
    pub label: String,
    /// Action payload delivered back in the press event.
    pub action: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}
