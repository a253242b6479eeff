use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::language::Language;

/// One completed translation: what came in and what went out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub original: String,
    pub translated: String,
}

/// Per-conversation state.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    /// Currently selected target language.
    pub target: Language,
    /// Last successful translation, used by the copy/retranslate buttons.
    /// `None` until the first translation in this conversation.
    pub last: Option<Exchange>,
}

/// All conversation states, keyed by conversation ID.
///
/// Entries are created with defaults on first access and live for the
/// process lifetime. The lock is only held for the map operation itself,
/// never across a network call.
#[derive(Debug, Default)]
pub struct ChatStates {
    inner: Mutex<HashMap<String, ChatState>>,
}

impl ChatStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current target language for a conversation.
    pub async fn target(&self, chat: &str) -> Language {
        let mut map = self.inner.lock().await;
        map.entry(chat.to_string()).or_default().target
    }

    /// Select the target language for a conversation.
    pub async fn set_target(&self, chat: &str, target: Language) {
        let mut map = self.inner.lock().await;
        map.entry(chat.to_string()).or_default().target = target;
    }

    /// Record the result of a successful translation.
    pub async fn store_exchange(
        &self,
        chat: &str,
        original: impl Into<String>,
        translated: impl Into<String>,
    ) {
        let mut map = self.inner.lock().await;
        map.entry(chat.to_string()).or_default().last = Some(Exchange {
            original: original.into(),
            translated: translated.into(),
        });
    }

    /// Last stored translation pair, if any.
    pub async fn last_exchange(&self, chat: &str) -> Option<Exchange> {
        let map = self.inner.lock().await;
        map.get(chat).and_then(|s| s.last.clone())
    }

    /// Full state of a conversation (defaults if it was never touched).
    pub async fn snapshot(&self, chat: &str) -> ChatState {
        let map = self.inner.lock().await;
        map.get(chat).cloned().unwrap_or_default()
    }
}
