use serde::{Deserialize, Serialize};

use crate::domain::conversation::entities::{
    CallbackQuery, ChatEvent, InboundMessage, InlineButton, Keyboard, MessageContent,
};

/// The subset of a Bot API `Update` the bot reacts to.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
    pub callback_query: Option<TelegramCallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub chat: TelegramChat,
    pub from: Option<TelegramUser>,
    pub text: Option<String>,
    pub photo: Option<Vec<TelegramPhotoSize>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub first_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramPhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramCallbackQuery {
    pub id: String,
    pub from: TelegramUser,
    pub message: Option<TelegramMessage>,
    pub data: Option<String>,
}

impl From<TelegramMessage> for InboundMessage {
    fn from(message: TelegramMessage) -> Self {
        let content = match (message.text, message.photo) {
            (Some(text), _) => MessageContent::Text(text),
            (None, Some(sizes)) => sizes
                .into_iter()
                .max_by_key(|size| u64::from(size.width) * u64::from(size.height))
                .map(|size| MessageContent::Photo {
                    file_id: size.file_id,
                })
                .unwrap_or(MessageContent::Unsupported),
            (None, None) => MessageContent::Unsupported,
        };

        Self {
            chat_id: message.chat.id,
            sender_name: message.from.map(|user| user.first_name),
            content,
        }
    }
}

impl TelegramUpdate {
    /// `None` for updates the bot ignores (edits, channel posts). Callbacks without a
    /// message or payload still come through so they can be answered.
    pub fn into_event(self) -> Option<ChatEvent> {
        if let Some(message) = self.message {
            return Some(ChatEvent::Message(message.into()));
        }

        let query = self.callback_query?;
        let event = match (query.message, query.data) {
            (Some(message), Some(data)) => ChatEvent::Callback(CallbackQuery {
                callback_id: query.id,
                chat_id: message.chat.id,
                message_id: message.message_id,
                data,
            }),
            _ => ChatEvent::UnroutedCallback {
                callback_id: query.id,
            },
        };
        Some(event)
    }
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardButton {
    pub text: String,
}

/// Bot API `reply_markup`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Reply {
        keyboard: Vec<Vec<ReplyKeyboardButton>>,
        resize_keyboard: bool,
    },
    Inline {
        inline_keyboard: Vec<Vec<InlineButton>>,
    },
}

impl From<Keyboard> for ReplyMarkup {
    fn from(keyboard: Keyboard) -> Self {
        match keyboard {
            Keyboard::Reply(rows) => ReplyMarkup::Reply {
                keyboard: rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|text| ReplyKeyboardButton { text })
                            .collect()
                    })
                    .collect(),
                resize_keyboard: true,
            },
            Keyboard::Inline(rows) => ReplyMarkup::Inline {
                inline_keyboard: rows,
            },
        }
    }
}
