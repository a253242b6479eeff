//! Telegram Bot API wire types.

use serde::{Deserialize, Serialize};
use tolmach_core::message::Keyboard;

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUpdate {
    pub update_id: i64,
    pub message: Option<TgMessage>,
    pub callback_query: Option<TgCallbackQuery>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct TgMessage {
    pub message_id: i64,
    pub from: Option<TgUser>,
    pub chat: TgChat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct TgUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
}

/// An inline-button press, delivered as its own update kind.
#[derive(Debug, Deserialize)]
pub(crate) struct TgCallbackQuery {
    pub id: String,
    pub from: TgUser,
    /// The message the pressed keyboard was attached to. Absent for
    /// presses on very old messages.
    pub message: Option<TgMessage>,
    pub data: Option<String>,
}

/// `reply_markup` payload for `sendMessage` / `editMessageReplyMarkup`.
#[derive(Debug, Serialize)]
pub(crate) struct TgInlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<TgInlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TgInlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl From<&Keyboard> for TgInlineKeyboardMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        Self {
            inline_keyboard: keyboard
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|b| TgInlineKeyboardButton {
                            text: b.label.clone(),
                            callback_data: b.action.clone(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}
