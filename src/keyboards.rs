//! Inline-keyboard actions and builders.
//!
//! Callback payloads use a `flag:payload` scheme so stale buttons from old
//! messages still parse (or fall through harmlessly).

use tolmach_core::language::Language;
use tolmach_core::message::{Button, Keyboard};

/// Everything a button press can ask the gateway to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Select the target language for future messages.
    SelectLanguage(Language),
    /// Resend the last translation in a copy-friendly block.
    Copy,
    /// Open the retranslate sub-menu for the last original text.
    Again,
    /// Retranslate the stored original into a specific language.
    Retranslate(Language),
    /// Dismiss the sub-menu; the user will just type a new message.
    NewText,
}

impl CallbackAction {
    /// Parse a callback payload. Unknown payloads return `None` and the
    /// press is acknowledged silently.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "copy" => return Some(Self::Copy),
            "again" => return Some(Self::Again),
            "new" => return Some(Self::NewText),
            _ => {}
        }
        let (flag, payload) = data.split_once(':')?;
        match flag {
            "lang" => Language::from_code(payload).map(Self::SelectLanguage),
            "retr" => Language::from_code(payload).map(Self::Retranslate),
            _ => None,
        }
    }

    /// Wire payload carried in the button's callback data.
    pub fn as_data(&self) -> String {
        match self {
            Self::SelectLanguage(lang) => format!("lang:{}", lang.code()),
            Self::Copy => "copy".to_string(),
            Self::Again => "again".to_string(),
            Self::Retranslate(lang) => format!("retr:{}", lang.code()),
            Self::NewText => "new".to_string(),
        }
    }
}

/// Keyboard attached below every successful translation.
pub fn result_keyboard() -> Keyboard {
    Keyboard {
        rows: vec![vec![
            Button::new("📋 Копировать", CallbackAction::Copy.as_data()),
            Button::new("🔄 Перевести ещё раз", CallbackAction::Again.as_data()),
        ]],
    }
}

/// Language selection keyboard with the active choice marked.
pub fn language_keyboard(active: Language) -> Keyboard {
    let row = Language::ALL
        .iter()
        .map(|lang| {
            let label = if *lang == active {
                format!("✅ {}", lang.button_label())
            } else {
                lang.button_label().to_string()
            };
            Button::new(label, CallbackAction::SelectLanguage(*lang).as_data())
        })
        .collect();
    Keyboard { rows: vec![row] }
}

/// Retranslate sub-menu: one button per target language plus "new text".
pub fn retry_keyboard() -> Keyboard {
    let langs = Language::ALL
        .iter()
        .map(|lang| {
            Button::new(
                lang.button_label(),
                CallbackAction::Retranslate(*lang).as_data(),
            )
        })
        .collect();
    Keyboard {
        rows: vec![
            langs,
            vec![Button::new(
                "✏️ Новый текст",
                CallbackAction::NewText.as_data(),
            )],
        ],
    }
}
