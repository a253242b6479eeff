use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::TolmachError;

/// Top-level tolmach configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Comma-separated Telegram user IDs. Empty = allow all.
    #[serde(default)]
    pub allowed_users: String,
}

/// Translation backend config (any OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Near-deterministic by default; translations should not be creative.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Message sent to unauthorized users.
    #[serde(default = "default_deny_message")]
    pub deny_message: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            deny_message: default_deny_message(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_deny_message() -> String {
    "⛔️ Доступ ограничён.".to_string()
}

impl Config {
    /// Check that the required credentials are present.
    ///
    /// Called once at startup; failure is fatal.
    pub fn validate(&self) -> Result<(), TolmachError> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(TolmachError::Config(
                "telegram.bot_token is required (or set TELEGRAM_BOT_TOKEN)".to_string(),
            ));
        }
        if self.translator.api_key.trim().is_empty() {
            return Err(TolmachError::Config(
                "translator.api_key is required (or set OPENAI_API_KEY)".to_string(),
            ));
        }
        Ok(())
    }

    /// The parsed allow-list for this configuration.
    pub fn allow_list(&self) -> AllowList {
        AllowList::parse(&self.telegram.allowed_users)
    }
}

/// Load configuration from a TOML file, then apply environment overrides.
///
/// Falls back to defaults if the file does not exist. A set, non-empty
/// environment variable wins over the file value.
pub fn load(path: &str) -> Result<Config, TolmachError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TolmachError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| TolmachError::Config(format!("failed to parse config: {}", e)))?
    } else {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(token) = env_value("TELEGRAM_BOT_TOKEN") {
        config.telegram.bot_token = token;
    }
    if let Some(key) = env_value("OPENAI_API_KEY") {
        config.translator.api_key = key;
    }
    if let Some(model) = env_value("OPENAI_MODEL") {
        config.translator.model = model;
    }
    if let Some(ids) = env_value("ALLOWED_USER_IDS") {
        config.telegram.allowed_users = ids;
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// The set of sender identifiers permitted to use the bot.
///
/// Empty means unrestricted.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    ids: HashSet<String>,
}

impl AllowList {
    /// Parse a comma-separated identifier list: entries are trimmed,
    /// empty ones dropped.
    pub fn parse(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    /// Whether the sender may use the bot. An empty list permits everyone.
    pub fn permits(&self, sender_id: &str) -> bool {
        self.ids.is_empty() || self.ids.contains(sender_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
