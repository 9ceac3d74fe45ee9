use serde::{Deserialize, Serialize};

/// One inbound chat message, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub sender_name: Option<String>,
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    /// Transport reference of the largest photo size.
    Photo { file_id: String },
    /// Stickers, voice notes, documents and anything else without text.
    Unsupported,
}

/// A press on an inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery {
    pub callback_id: String,
    pub chat_id: i64,
    pub message_id: i64,
    pub data: String,
}

/// Anything the transport delivers that the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Message(InboundMessage),
    Callback(CallbackQuery),
    /// A button press with no source message or payload. It is only acknowledged.
    UnroutedCallback { callback_id: String },
}

impl ChatEvent {
    pub fn chat_id(&self) -> Option<i64> {
        match self {
            ChatEvent::Message(message) => Some(message.chat_id),
            ChatEvent::Callback(query) => Some(query.chat_id),
            ChatEvent::UnroutedCallback { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Controls attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Quick-reply labels, one inner vector per row.
    Reply(Vec<Vec<String>>),
    Inline(Vec<Vec<InlineButton>>),
}

impl Keyboard {
    pub fn reply(rows: &[&[&str]]) -> Self {
        Keyboard::Reply(
            rows.iter()
                .map(|row| row.iter().map(|label| label.to_string()).collect())
                .collect(),
        )
    }

    /// Every label of a reply keyboard, in order.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Keyboard::Reply(rows) => rows.iter().flatten().map(String::as_str).collect(),
            Keyboard::Inline(rows) => rows.iter().flatten().map(|b| b.text.as_str()).collect(),
        }
    }
}
