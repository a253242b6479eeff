//! Long-polling update loop and Channel trait implementation.

use super::types::{TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tolmach_core::{
    error::TolmachError,
    message::{CallbackPress, ChannelEvent, IncomingMessage, Keyboard, OutgoingMessage},
    traits::Channel,
};
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<ChannelEvent>, TolmachError> {
        self.register_commands().await;

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!("{base_url}/getUpdates?timeout=30");
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(std::time::Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let Some(event) = convert_update(update) else {
                        continue;
                    };
                    if tx.send(event).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), TolmachError> {
        let chat_id = parse_chat_id(&message.reply_target)?;
        self.send_text(
            chat_id,
            &message.text,
            message.keyboard.as_ref(),
            message.monospace,
        )
        .await
    }

    async fn send_typing(&self, target: &str) -> Result<(), TolmachError> {
        let chat_id = parse_chat_id(target)?;
        self.send_chat_action(chat_id, "typing").await
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), TolmachError> {
        self.answer_callback_query(callback_id, text).await
    }

    async fn edit_keyboard(
        &self,
        target: &str,
        message_id: i64,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TolmachError> {
        let chat_id = parse_chat_id(target)?;
        self.edit_message_reply_markup(chat_id, message_id, keyboard.as_ref())
            .await
    }

    async fn stop(&self) -> Result<(), TolmachError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

fn parse_chat_id(target: &str) -> Result<i64, TolmachError> {
    target
        .parse()
        .map_err(|e| TolmachError::Channel(format!("invalid telegram chat_id '{target}': {e}")))
}

/// Turn a raw update into a channel event. Updates without text or without
/// a sender are dropped.
pub(crate) fn convert_update(update: TgUpdate) -> Option<ChannelEvent> {
    if let Some(cq) = update.callback_query {
        // A press is only routable when Telegram includes the source message.
        let message = cq.message?;
        return Some(ChannelEvent::Callback(CallbackPress {
            id: cq.id,
            channel: "telegram".to_string(),
            sender_id: cq.from.id.to_string(),
            action: cq.data.unwrap_or_default(),
            reply_target: message.chat.id.to_string(),
            message_id: Some(message.message_id),
        }));
    }

    let msg = update.message?;
    let user = msg.from?;
    let text = msg.text?;

    let sender_name = if let Some(ref un) = user.username {
        format!("@{un}")
    } else if let Some(ref ln) = user.last_name {
        format!("{} {ln}", user.first_name)
    } else {
        user.first_name.clone()
    };

    Some(ChannelEvent::Message(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: user.id.to_string(),
        sender_name: Some(sender_name),
        text,
        timestamp: chrono::Utc::now(),
        reply_target: msg.chat.id.to_string(),
    }))
}
