use crate::{
    error::TolmachError,
    language::Language,
    message::{ChannelEvent, Keyboard, OutgoingMessage},
};
use async_trait::async_trait;

/// Translation backend trait.
///
/// Every backend implements this to provide a uniform interface to the
/// gateway. `translate` is a single round trip with no retry or streaming.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Translate `text` into `target`, returning the trimmed result.
    ///
    /// Callers must not pass empty text; the gateway trims and drops
    /// empty input before reaching this point.
    async fn translate(&self, text: &str, target: Language) -> Result<String, TolmachError>;

    /// Check if the backend is reachable and ready.
    async fn is_available(&self) -> bool;
}

/// Messaging channel trait.
///
/// Every messaging platform implements this trait to receive events and
/// send replies. Presence and callback operations default to no-ops so
/// platforms without them stay trivial to implement.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming events.
    /// Returns a receiver that yields messages and button presses.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<ChannelEvent>, TolmachError>;

    /// Send a reply (with optional inline keyboard) through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), TolmachError>;

    /// Send a typing indicator to show the bot is working.
    async fn send_typing(&self, _target: &str) -> Result<(), TolmachError> {
        Ok(())
    }

    /// Acknowledge a button press, optionally with a short toast text.
    async fn answer_callback(
        &self,
        _callback_id: &str,
        _text: Option<&str>,
    ) -> Result<(), TolmachError> {
        Ok(())
    }

    /// Replace the inline keyboard on an already-sent message.
    async fn edit_keyboard(
        &self,
        _target: &str,
        _message_id: i64,
        _keyboard: Option<Keyboard>,
    ) -> Result<(), TolmachError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), TolmachError>;
}
