//! Message sending: text, keyboards, callback answers, chat actions, and
//! command registration.

use super::types::TgInlineKeyboardMarkup;
use super::TelegramChannel;
use crate::utils::{escape_html, split_message};
use tolmach_core::{error::TolmachError, message::Keyboard};
use tracing::{info, warn};

impl TelegramChannel {
    /// Send a text message to a specific chat, chunked to Telegram's
    /// 4096-char limit.
    ///
    /// The keyboard, if any, goes on the final chunk. `monospace` wraps
    /// each chunk in `<pre>` so clients offer tap-to-copy.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
        monospace: bool,
    ) -> Result<(), TolmachError> {
        let chunks = split_message(text, 4096);
        let last = chunks.len() - 1;

        for (i, chunk) in chunks.iter().enumerate() {
            let markup = match keyboard {
                Some(kb) if i == last => {
                    Some(serde_json::to_value(TgInlineKeyboardMarkup::from(kb))?)
                }
                _ => None,
            };

            let mut body = if monospace {
                serde_json::json!({
                    "chat_id": chat_id,
                    "text": format!("<pre>{}</pre>", escape_html(chunk)),
                    "parse_mode": "HTML",
                })
            } else {
                serde_json::json!({
                    "chat_id": chat_id,
                    "text": chunk,
                })
            };
            if let Some(ref m) = markup {
                body["reply_markup"] = m.clone();
            }

            let url = format!("{}/sendMessage", self.base_url);
            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| TolmachError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                if monospace && error_text.contains("can't parse entities") {
                    warn!("HTML parse failed, retrying as plain text: {error_text}");
                    let mut plain_body = serde_json::json!({
                        "chat_id": chat_id,
                        "text": chunk,
                    });
                    if let Some(m) = markup {
                        plain_body["reply_markup"] = m;
                    }
                    let plain_resp = self
                        .client
                        .post(format!("{}/sendMessage", self.base_url))
                        .json(&plain_body)
                        .send()
                        .await
                        .map_err(|e| {
                            TolmachError::Channel(format!("telegram send (plain) failed: {e}"))
                        })?;
                    if !plain_resp.status().is_success() {
                        let plain_err = plain_resp.text().await.unwrap_or_default();
                        return Err(TolmachError::Channel(format!(
                            "telegram send (plain fallback) failed: {plain_err}"
                        )));
                    }
                } else {
                    return Err(TolmachError::Channel(format!(
                        "telegram send failed ({status}): {error_text}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "sr", "description": "Переводить на сербский (латиница)" },
                { "command": "en", "description": "Переводить на английский" },
                { "command": "status", "description": "Текущий язык и состояние" },
                { "command": "help", "description": "Справка" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }

    /// Send a chat action (e.g. "typing") to a chat.
    pub(crate) async fn send_chat_action(
        &self,
        chat_id: i64,
        action: &str,
    ) -> Result<(), TolmachError> {
        let url = format!("{}/sendChatAction", self.base_url);
        let body = serde_json::json!({
            "chat_id": chat_id,
            "action": action,
        });

        self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TolmachError::Channel(format!("telegram sendChatAction failed: {e}")))?;

        Ok(())
    }

    /// Acknowledge a callback query, optionally showing a short toast.
    pub(crate) async fn answer_callback_query(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), TolmachError> {
        let url = format!("{}/answerCallbackQuery", self.base_url);
        let mut body = serde_json::json!({
            "callback_query_id": callback_id,
        });
        if let Some(t) = text {
            body["text"] = serde_json::Value::String(t.to_string());
        }

        self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TolmachError::Channel(format!("telegram answerCallbackQuery failed: {e}"))
            })?;

        Ok(())
    }

    /// Replace the inline keyboard on a previously sent message.
    /// `None` removes the keyboard.
    pub(crate) async fn edit_message_reply_markup(
        &self,
        chat_id: i64,
        message_id: i64,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), TolmachError> {
        let url = format!("{}/editMessageReplyMarkup", self.base_url);
        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
        });
        if let Some(kb) = keyboard {
            body["reply_markup"] = serde_json::to_value(TgInlineKeyboardMarkup::from(kb))?;
        }

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TolmachError::Channel(format!("telegram editMessageReplyMarkup failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(TolmachError::Channel(format!(
                "telegram editMessageReplyMarkup failed ({status}): {error_text}"
            )));
        }

        Ok(())
    }
}
