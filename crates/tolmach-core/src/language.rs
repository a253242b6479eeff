use serde::{Deserialize, Serialize};

/// Target languages the bot can translate into.
///
/// A closed set: adding a language means adding a variant here plus its
/// instruction text, not threading free-form strings through the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// Serbian in Latin script (sr-Latn).
    #[default]
    SrLatn,
    /// English.
    En,
}

impl Language {
    /// All supported target languages, in menu order.
    pub const ALL: &'static [Language] = &[Language::SrLatn, Language::En];

    /// Short code used in commands and callback payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Language::SrLatn => "sr",
            Language::En => "en",
        }
    }

    /// Human-readable label shown in menus and confirmations.
    pub fn label(&self) -> &'static str {
        match self {
            Language::SrLatn => "сербский (латиница)",
            Language::En => "английский",
        }
    }

    /// Button caption for the language selection keyboard.
    pub fn button_label(&self) -> &'static str {
        match self {
            Language::SrLatn => "🇷🇸 Сербский",
            Language::En => "🇬🇧 English",
        }
    }

    /// Fixed system instruction sent to the model for this target.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::SrLatn => {
                "Ты профессиональный переводчик. Переводи входной текст с русского \
                 на сербский язык латиницей (sr-Latn). Сохраняй смысл и тон. \
                 Используй č, ć, š, ž, đ. Не добавляй комментариев и пояснений — \
                 возвращай только перевод. Ссылки/код оставляй как есть, эмодзи сохраняй."
            }
            Language::En => {
                "Ты профессиональный переводчик. Переводи входной текст с русского \
                 на английский язык. Сохраняй смысл и тон. Не добавляй комментариев \
                 и пояснений — возвращай только перевод. Ссылки/код оставляй как есть, \
                 эмодзи сохраняй."
            }
        }
    }

    /// Parse the short code used in commands and callback payloads.
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "sr" => Some(Language::SrLatn),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}
