//! Gateway behavior tests with a scripted translator and a recording channel.

use super::*;
use async_trait::async_trait;
use std::sync::Mutex as StdMutex;
use tolmach_core::{
    error::TolmachError,
    language::Language,
    message::{CallbackPress, IncomingMessage},
};

/// What the scripted translator should do on every call.
#[derive(Clone)]
enum Script {
    Reply(&'static str),
    RegionBlocked,
    Fail,
}

struct MockTranslator {
    script: Script,
    calls: StdMutex<Vec<(String, Language)>>,
}

impl MockTranslator {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: StdMutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, text: &str, target: Language) -> Result<String, TolmachError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target));
        match self.script {
            Script::Reply(reply) => Ok(reply.trim().to_string()),
            Script::RegionBlocked => Err(TolmachError::RegionBlocked("403".into())),
            Script::Fail => Err(TolmachError::Translator("boom".into())),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }
}

#[derive(Default)]
struct MockChannel {
    sent: StdMutex<Vec<OutgoingMessage>>,
    toasts: StdMutex<Vec<Option<String>>>,
    edits: StdMutex<Vec<(i64, Option<Keyboard>)>>,
}

impl MockChannel {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    fn toasts(&self) -> Vec<Option<String>> {
        self.toasts.lock().unwrap().clone()
    }

    fn edits(&self) -> Vec<(i64, Option<Keyboard>)> {
        self.edits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for MockChannel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start(&self) -> Result<mpsc::Receiver<ChannelEvent>, TolmachError> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), TolmachError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn answer_callback(
        &self,
        _callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), TolmachError> {
        self.toasts
            .lock()
            .unwrap()
            .push(text.map(str::to_string));
        Ok(())
    }

    async fn edit_keyboard(
        &self,
        _target: &str,
        message_id: i64,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TolmachError> {
        self.edits.lock().unwrap().push((message_id, keyboard));
        Ok(())
    }

    async fn stop(&self) -> Result<(), TolmachError> {
        Ok(())
    }
}

const DENY: &str = "⛔️ Доступ ограничён.";

fn gateway(
    script: Script,
    allowed: &str,
) -> (Gateway, Arc<MockTranslator>, Arc<MockChannel>) {
    let translator = MockTranslator::new(script);
    let channel = MockChannel::new();
    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
    channels.insert("mock".to_string(), channel.clone());
    let gw = Gateway::new(
        translator.clone(),
        channels,
        tolmach_core::config::AllowList::parse(allowed),
        DENY.to_string(),
        "gpt-4o-mini".to_string(),
    );
    (gw, translator, channel)
}

fn message(sender_id: &str, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: uuid::Uuid::new_v4(),
        channel: "mock".to_string(),
        sender_id: sender_id.to_string(),
        sender_name: Some("tester".to_string()),
        text: text.to_string(),
        timestamp: chrono::Utc::now(),
        reply_target: "100".to_string(),
    }
}

fn press(sender_id: &str, action: &str) -> CallbackPress {
    CallbackPress {
        id: "cb-1".to_string(),
        channel: "mock".to_string(),
        sender_id: sender_id.to_string(),
        action: action.to_string(),
        reply_target: "100".to_string(),
        message_id: Some(5),
    }
}

#[tokio::test]
async fn test_denied_sender_gets_fixed_reply_and_no_provider_call() {
    let (gw, translator, channel) = gateway(Script::Reply("Zdravo"), "42");
    gw.handle_message(message("7", "Привет")).await;

    let sent = channel.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, DENY);
    assert!(translator.calls().is_empty());
}

#[tokio::test]
async fn test_empty_input_is_silently_ignored() {
    let (gw, translator, channel) = gateway(Script::Reply("Zdravo"), "");
    gw.handle_message(message("7", "   \n\t ")).await;
    gw.handle_message(message("7", "")).await;

    assert!(channel.sent().is_empty());
    assert!(translator.calls().is_empty());
}

#[tokio::test]
async fn test_successful_translation_stores_pair_and_replies_with_keyboard() {
    let (gw, translator, channel) = gateway(Script::Reply("  Zdravo!  "), "42");
    gw.handle_message(message("42", "Привет")).await;

    // Default mode is Serbian Latin.
    assert_eq!(
        translator.calls(),
        vec![("Привет".to_string(), Language::SrLatn)]
    );

    let sent = channel.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "Zdravo!");
    let kb = sent[0].keyboard.as_ref().unwrap();
    let actions: Vec<_> = kb.rows[0].iter().map(|b| b.action.as_str()).collect();
    assert_eq!(actions, vec!["copy", "again"]);

    let last = gw.states.last_exchange("100").await.unwrap();
    assert_eq!(last.original, "Привет");
    assert_eq!(last.translated, "Zdravo!");
}

#[tokio::test]
async fn test_language_command_switches_instruction_for_next_message() {
    let (gw, translator, channel) = gateway(Script::Reply("Hello"), "");
    gw.handle_message(message("99", "/en")).await;
    gw.handle_message(message("99", "Привет")).await;

    assert_eq!(
        translator.calls(),
        vec![("Привет".to_string(), Language::En)]
    );
    let sent = channel.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].text.contains("английский"));
}

#[tokio::test]
async fn test_language_selection_is_idempotent() {
    let (gw, _, channel) = gateway(Script::Reply("Hello"), "");
    gw.handle_message(message("99", "/en")).await;
    let once = gw.states.snapshot("100").await;
    gw.handle_message(message("99", "/en")).await;
    let twice = gw.states.snapshot("100").await;

    assert_eq!(once.target, twice.target);
    assert_eq!(twice.target, Language::En);
    // Both selections produce the same confirmation.
    let sent = channel.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].text, sent[1].text);
}

#[tokio::test]
async fn test_unknown_slash_command_falls_through_to_translation() {
    let (gw, translator, _) = gateway(Script::Reply("done"), "");
    gw.handle_message(message("99", "/unknown thing")).await;
    assert_eq!(translator.calls().len(), 1);
}

#[tokio::test]
async fn test_status_and_help_make_no_provider_call() {
    let (gw, translator, channel) = gateway(Script::Reply("x"), "");
    gw.handle_message(message("99", "/status")).await;
    gw.handle_message(message("99", "/help")).await;

    assert!(translator.calls().is_empty());
    assert_eq!(channel.sent().len(), 2);
    assert!(channel.sent()[0].text.contains("gpt-4o-mini"));
}

#[tokio::test]
async fn test_copy_with_no_translation_yields_notice_only() {
    let (gw, _, channel) = gateway(Script::Reply("x"), "");
    gw.handle_callback(press("99", "copy")).await;

    assert_eq!(
        channel.toasts(),
        vec![Some("Пока нечего копировать.".to_string())]
    );
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn test_copy_resends_last_translation_monospace() {
    let (gw, _, channel) = gateway(Script::Reply("Zdravo"), "");
    gw.handle_message(message("99", "Привет")).await;
    gw.handle_callback(press("99", "copy")).await;

    let sent = channel.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].text, "Zdravo");
    assert!(sent[1].monospace);
    assert!(sent[1].keyboard.is_none());
}

#[tokio::test]
async fn test_again_presents_both_languages_via_keyboard_edit() {
    let (gw, _, channel) = gateway(Script::Reply("Zdravo"), "");
    gw.handle_message(message("99", "Привет")).await;
    gw.handle_callback(press("99", "again")).await;

    let edits = channel.edits();
    assert_eq!(edits.len(), 1);
    let kb = edits[0].1.as_ref().unwrap();
    let actions: Vec<_> = kb.rows[0].iter().map(|b| b.action.as_str()).collect();
    assert_eq!(actions, vec!["retr:sr", "retr:en"]);
    assert_eq!(kb.rows[1][0].action, "new");
}

#[tokio::test]
async fn test_again_without_translation_yields_notice() {
    let (gw, _, channel) = gateway(Script::Reply("x"), "");
    gw.handle_callback(press("99", "again")).await;

    assert_eq!(
        channel.toasts(),
        vec![Some("Пока нечего переводить заново.".to_string())]
    );
    assert!(channel.edits().is_empty());
}

#[tokio::test]
async fn test_retranslate_reuses_original_and_updates_translated() {
    let (gw, translator, channel) = gateway(Script::Reply("Hello"), "");
    gw.handle_message(message("99", "Привет")).await;
    gw.handle_callback(press("99", "retr:en")).await;

    assert_eq!(
        translator.calls(),
        vec![
            ("Привет".to_string(), Language::SrLatn),
            ("Привет".to_string(), Language::En),
        ]
    );
    let last = gw.states.last_exchange("100").await.unwrap();
    assert_eq!(last.original, "Привет");
    assert_eq!(last.translated, "Hello");
    // The target language sticks for subsequent messages.
    assert_eq!(gw.states.target("100").await, Language::En);
    // The reply carries the usual result keyboard.
    let sent = channel.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].keyboard.is_some());
}

#[tokio::test]
async fn test_language_button_updates_state_and_marks_choice() {
    let (gw, _, channel) = gateway(Script::Reply("x"), "");
    gw.handle_callback(press("99", "lang:en")).await;

    assert_eq!(gw.states.target("100").await, Language::En);
    let edits = channel.edits();
    assert_eq!(edits.len(), 1);
    let kb = edits[0].1.as_ref().unwrap();
    let en = kb.rows[0].iter().find(|b| b.action == "lang:en").unwrap();
    assert!(en.label.starts_with("✅"));
}

#[tokio::test]
async fn test_denied_callback_answered_with_deny_toast() {
    let (gw, _, channel) = gateway(Script::Reply("x"), "42");
    gw.handle_callback(press("7", "copy")).await;

    assert_eq!(channel.toasts(), vec![Some(DENY.to_string())]);
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn test_unknown_callback_acknowledged_silently() {
    let (gw, _, channel) = gateway(Script::Reply("x"), "");
    gw.handle_callback(press("99", "stale:payload")).await;

    assert_eq!(channel.toasts(), vec![None]);
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn test_region_blocked_gets_distinct_apology() {
    let (gw, _, channel) = gateway(Script::RegionBlocked, "");
    gw.handle_message(message("99", "Привет")).await;

    let sent = channel.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.contains("региона"));
    // State keeps no record of the failed attempt.
    assert!(gw.states.last_exchange("100").await.is_none());
}

#[tokio::test]
async fn test_generic_failure_gets_generic_apology() {
    let (gw, _, channel) = gateway(Script::Fail, "");
    gw.handle_message(message("99", "Привет")).await;

    let sent = channel.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.contains("Не удалось"));
    assert!(!sent[0].text.contains("региона"));
}
