//! Per-event handlers: plain text, commands, and button presses.

use super::Gateway;
use crate::commands::{self, Command};
use crate::keyboards::{self, CallbackAction};
use crate::replies;
use tolmach_core::{
    error::TolmachError,
    language::Language,
    message::{CallbackPress, ChannelEvent, IncomingMessage},
};
use tracing::{error, info, warn};

impl Gateway {
    /// Route one inbound event to its handler.
    pub(super) async fn handle_event(&self, event: ChannelEvent) {
        match event {
            ChannelEvent::Message(msg) => self.handle_message(msg).await,
            ChannelEvent::Callback(press) => self.handle_callback(press).await,
        }
    }

    /// Process a single incoming text message.
    pub(super) async fn handle_message(&self, incoming: IncomingMessage) {
        let preview: String = incoming.text.chars().take(60).collect();
        info!(
            "[{}] {} says: {}{}",
            incoming.channel,
            incoming.sender_name.as_deref().unwrap_or("unknown"),
            preview,
            if incoming.text.chars().count() > 60 {
                "..."
            } else {
                ""
            }
        );

        // --- 1. ACCESS CHECK ---
        if !self.allow_list.permits(&incoming.sender_id) {
            warn!(
                "access denied for {} on {}",
                incoming.sender_id, incoming.channel
            );
            self.send(
                &incoming.channel,
                &incoming.reply_target,
                self.deny_message.clone(),
                None,
                false,
            )
            .await;
            return;
        }

        // --- 2. COMMAND DISPATCH ---
        if let Some(cmd) = Command::parse(&incoming.text) {
            if let Command::SetLanguage(lang) = cmd {
                self.states.set_target(&incoming.reply_target, lang).await;
            }
            let state = self.states.snapshot(&incoming.reply_target).await;
            let ctx = commands::CommandContext {
                state: &state,
                model: &self.model,
                uptime: self.uptime.elapsed(),
            };
            let (text, keyboard) = commands::handle(cmd, &ctx);
            self.send(&incoming.channel, &incoming.reply_target, text, keyboard, false)
                .await;
            return;
        }

        // --- 3. TRANSLATE ---
        let text = incoming.text.trim();
        if text.is_empty() {
            return;
        }

        let target = self.states.target(&incoming.reply_target).await;
        self.translate_and_reply(&incoming.channel, &incoming.reply_target, text, target)
            .await;
    }

    /// Process a single button press.
    pub(super) async fn handle_callback(&self, press: CallbackPress) {
        // Denied presses get the deny text as a toast; a chat message per
        // stray press would spam the conversation.
        if !self.allow_list.permits(&press.sender_id) {
            warn!("access denied for {} on {} (callback)", press.sender_id, press.channel);
            self.answer(&press, Some(&self.deny_message)).await;
            return;
        }

        let Some(action) = CallbackAction::parse(&press.action) else {
            info!("[{}] unknown callback payload: {}", press.channel, press.action);
            self.answer(&press, None).await;
            return;
        };

        match action {
            CallbackAction::SelectLanguage(lang) => {
                self.states.set_target(&press.reply_target, lang).await;
                self.answer(&press, Some(&replies::language_toast(lang))).await;
                self.swap_keyboard(
                    &press,
                    keyboards::language_keyboard(lang),
                    &replies::language_confirmation(lang),
                )
                .await;
            }
            CallbackAction::Copy => {
                match self.states.last_exchange(&press.reply_target).await {
                    None => self.answer(&press, Some(replies::NOTHING_TO_COPY)).await,
                    Some(exchange) => {
                        self.answer(&press, None).await;
                        self.send(
                            &press.channel,
                            &press.reply_target,
                            exchange.translated,
                            None,
                            true,
                        )
                        .await;
                    }
                }
            }
            CallbackAction::Again => {
                match self.states.last_exchange(&press.reply_target).await {
                    None => {
                        self.answer(&press, Some(replies::NOTHING_TO_RETRANSLATE))
                            .await;
                    }
                    Some(_) => {
                        self.answer(&press, None).await;
                        self.swap_keyboard(
                            &press,
                            keyboards::retry_keyboard(),
                            replies::RETRY_MENU_TITLE,
                        )
                        .await;
                    }
                }
            }
            CallbackAction::Retranslate(lang) => {
                match self.states.last_exchange(&press.reply_target).await {
                    None => {
                        self.answer(&press, Some(replies::NOTHING_TO_RETRANSLATE))
                            .await;
                    }
                    Some(exchange) => {
                        self.answer(&press, Some(&replies::language_toast(lang))).await;
                        self.states.set_target(&press.reply_target, lang).await;
                        self.translate_and_reply(
                            &press.channel,
                            &press.reply_target,
                            &exchange.original,
                            lang,
                        )
                        .await;
                    }
                }
            }
            CallbackAction::NewText => {
                self.answer(&press, Some(replies::SEND_NEW_TEXT)).await;
            }
        }
    }

    /// The shared translation path: typing indicator, one provider call,
    /// state write-back, reply with the result keyboard. Used by plain
    /// messages and "retranslate" presses alike.
    async fn translate_and_reply(
        &self,
        channel: &str,
        reply_target: &str,
        text: &str,
        target: Language,
    ) {
        // Best-effort; a failed indicator must not fail the translation.
        if let Some(ch) = self.channels.get(channel) {
            if let Err(e) = ch.send_typing(reply_target).await {
                warn!("typing indicator failed: {e}");
            }
        }

        match self.translator.translate(text, target).await {
            Ok(translated) => {
                self.states
                    .store_exchange(reply_target, text, &translated)
                    .await;
                self.send(
                    channel,
                    reply_target,
                    translated,
                    Some(keyboards::result_keyboard()),
                    false,
                )
                .await;
            }
            Err(TolmachError::RegionBlocked(e)) => {
                error!("translation blocked by region: {e}");
                self.send(channel, reply_target, replies::REGION_BLOCKED, None, false)
                    .await;
            }
            Err(e) => {
                error!("translation failed: {e}");
                self.send(channel, reply_target, replies::GENERIC_FAILURE, None, false)
                    .await;
            }
        }
    }

    /// Acknowledge a press, optionally with a toast.
    async fn answer(&self, press: &CallbackPress, text: Option<&str>) {
        if let Some(ch) = self.channels.get(&press.channel) {
            if let Err(e) = ch.answer_callback(&press.id, text).await {
                warn!("failed to answer callback {}: {e}", press.id);
            }
        }
    }

    /// Replace the pressed message's keyboard in place; when the platform
    /// didn't attach the source message (or the edit fails), send the menu
    /// as a new message titled `fallback_text`.
    async fn swap_keyboard(
        &self,
        press: &CallbackPress,
        keyboard: tolmach_core::message::Keyboard,
        fallback_text: &str,
    ) {
        if let Some(message_id) = press.message_id {
            if let Some(ch) = self.channels.get(&press.channel) {
                match ch
                    .edit_keyboard(&press.reply_target, message_id, Some(keyboard.clone()))
                    .await
                {
                    Ok(()) => return,
                    Err(e) => warn!("keyboard edit failed, sending fresh menu: {e}"),
                }
            }
        }
        self.send(
            &press.channel,
            &press.reply_target,
            fallback_text,
            Some(keyboard),
            false,
        )
        .await;
    }
}
