//! OpenAI-compatible translation backend.
//!
//! Works with OpenAI's API and any compatible endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tolmach_core::{
    config::TranslatorConfig, error::TolmachError, language::Language, traits::Translator,
};
use tracing::{debug, warn};

/// Error code OpenAI returns for requests from unsupported regions.
const REGION_BLOCKED_CODE: &str = "unsupported_country_region_territory";

/// OpenAI-compatible translator.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiTranslator {
    /// Create from config values.
    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// The single request shape this backend ever sends: the fixed
    /// per-language instruction plus the user text.
    fn build_request(&self, text: &str, target: Language) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: target.instruction().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Option<Vec<ChatChoice>>,
    pub usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChatMessage>,
}

#[derive(Deserialize)]
pub(crate) struct ChatUsage {
    pub total_tokens: Option<u64>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<String>,
}

/// First choice's content, whitespace-trimmed. `None` when the response
/// carries no usable text.
pub(crate) fn extract_text(resp: &ChatCompletionResponse) -> Option<String> {
    let text = resp
        .choices
        .as_ref()?
        .first()?
        .message
        .as_ref()?
        .content
        .trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Whether an error body carries OpenAI's region-restriction code.
pub(crate) fn is_region_blocked(body: &str) -> bool {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.code)
        .is_some_and(|code| code == REGION_BLOCKED_CODE)
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn translate(&self, text: &str, target: Language) -> Result<String, TolmachError> {
        let body = self.build_request(text, target);

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(
            "openai: POST {url} model={} target={}",
            self.model,
            target.code()
        );

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| TolmachError::Translator(format!("openai request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::FORBIDDEN && is_region_blocked(&text) {
                return Err(TolmachError::RegionBlocked(format!(
                    "openai returned {status}: {text}"
                )));
            }
            return Err(TolmachError::Translator(format!(
                "openai returned {status}: {text}"
            )));
        }

        let parsed: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| TolmachError::Translator(format!("openai: failed to parse response: {e}")))?;

        if let Some(tokens) = parsed.usage.as_ref().and_then(|u| u.total_tokens) {
            debug!("openai: completion used {tokens} tokens");
        }

        extract_text(&parsed).ok_or(TolmachError::EmptyTranslation)
    }

    async fn is_available(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("openai: no API key configured");
            return false;
        }
        // Basic check: try to list models.
        let url = format!("{}/models", self.base_url.trim_end_matches('/'));
        match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("openai not available: {e}");
                false
            }
        }
    }
}
