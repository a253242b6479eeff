//! Gateway — the event loop connecting channels to the translator.
//!
//! Includes: allow-list enforcement, command dispatch, callback handling,
//! and graceful shutdown.

mod dispatch;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tolmach_core::{
    config::AllowList,
    message::{ChannelEvent, Keyboard, OutgoingMessage},
    state::ChatStates,
    traits::{Channel, Translator},
};
use tracing::{error, info};

/// The central gateway that routes events between channels and the translator.
pub struct Gateway {
    pub(super) translator: Arc<dyn Translator>,
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) states: ChatStates,
    pub(super) allow_list: AllowList,
    pub(super) deny_message: String,
    /// Model name shown in /status.
    pub(super) model: String,
    pub(super) uptime: Instant,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        translator: Arc<dyn Translator>,
        channels: HashMap<String, Arc<dyn Channel>>,
        allow_list: AllowList,
        deny_message: String,
        model: String,
    ) -> Self {
        Self {
            translator,
            channels,
            states: ChatStates::new(),
            allow_list,
            deny_message,
            model,
            uptime: Instant::now(),
        }
    }

    /// Run the main event loop until Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "tolmach gateway running | translator: {} | channels: {} | access: {}",
            self.translator.name(),
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            if self.allow_list.is_empty() {
                "unrestricted".to_string()
            } else {
                format!("{} allowed users", self.allow_list.len())
            },
        );

        let (tx, mut rx) = mpsc::channel::<ChannelEvent>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(event) = channel_rx.recv().await {
                    if tx.send(event).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        // One task per event: a conversation's in-flight translation never
        // blocks events from other conversations. Events for the same
        // conversation may interleave; its state is last-writer-wins.
        loop {
            tokio::select! {
                Some(event) = rx.recv() => {
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.handle_event(event).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Graceful shutdown: stop all channels.
    async fn shutdown(&self) {
        info!("Shutting down...");
        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                error!("failed to stop channel {name}: {e}");
            }
        }
        info!("Shutdown complete.");
    }

    /// Send a reply through the named channel.
    pub(super) async fn send(
        &self,
        channel: &str,
        reply_target: &str,
        text: impl Into<String>,
        keyboard: Option<Keyboard>,
        monospace: bool,
    ) {
        let msg = OutgoingMessage {
            text: text.into(),
            reply_target: reply_target.to_string(),
            keyboard,
            monospace,
        };
        if let Some(ch) = self.channels.get(channel) {
            if let Err(e) = ch.send(msg).await {
                error!("failed to send message via {channel}: {e}");
            }
        } else {
            error!("no such channel: {channel}");
        }
    }
}
