//! Fixed user-facing reply texts. The bot speaks Russian to its users.

use std::time::Duration;
use tolmach_core::{language::Language, state::ChatState};

pub const GENERIC_FAILURE: &str = "⚠️ Не удалось перевести. Попробуйте ещё раз.";
pub const REGION_BLOCKED: &str =
    "⚠️ Сервис перевода недоступен из вашего региона. Попробуйте позже.";
pub const NOTHING_TO_COPY: &str = "Пока нечего копировать.";
pub const NOTHING_TO_RETRANSLATE: &str = "Пока нечего переводить заново.";
pub const SEND_NEW_TEXT: &str = "Просто отправьте новый текст сообщением.";
pub const RETRY_MENU_TITLE: &str = "Перевести ещё раз:";

pub const WELCOME: &str = "Привет! Отправьте мне текст на русском, и я переведу его.\n\n\
    /sr — переводить на сербский (латиница)\n\
    /en — переводить на английский\n\
    /status — текущий язык и состояние\n\
    /help — справка";

pub const HELP: &str = "Я перевожу сообщения с русского.\n\n\
    /sr — переводить на сербский (латиница)\n\
    /en — переводить на английский\n\
    /status — текущий язык и состояние\n\
    /help — эта справка\n\n\
    Под каждым переводом есть кнопки «Копировать» и «Перевести ещё раз».";

/// Confirmation sent after a language command or button press.
pub fn language_confirmation(lang: Language) -> String {
    format!("Готово. Перевожу на {}.", lang.label())
}

/// Short toast shown on a language button press.
pub fn language_toast(lang: Language) -> String {
    format!("Язык: {}", lang.label())
}

/// The /status reply.
pub fn status_text(state: &ChatState, model: &str, uptime: Duration) -> String {
    let hours = uptime.as_secs() / 3600;
    let minutes = (uptime.as_secs() % 3600) / 60;
    let secs = uptime.as_secs() % 60;
    let last = if state.last.is_some() {
        "есть сохранённый перевод"
    } else {
        "переводов ещё не было"
    };

    format!(
        "Язык перевода: {}\n\
         Последний перевод: {last}\n\
         Модель: {model}\n\
         Аптайм: {hours}ч {minutes}м {secs}с",
        state.target.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tolmach_core::state::Exchange;

    #[test]
    fn test_language_confirmation_names_language() {
        assert!(language_confirmation(Language::SrLatn).contains("сербский"));
        assert!(language_confirmation(Language::En).contains("английский"));
    }

    #[test]
    fn test_status_text_reflects_state() {
        let state = ChatState {
            target: Language::En,
            last: None,
        };
        let text = status_text(&state, "gpt-4o-mini", Duration::from_secs(3725));
        assert!(text.contains("английский"));
        assert!(text.contains("переводов ещё не было"));
        assert!(text.contains("gpt-4o-mini"));
        assert!(text.contains("1ч 2м 5с"));

        let state = ChatState {
            target: Language::SrLatn,
            last: Some(Exchange {
                original: "Привет".into(),
                translated: "Zdravo".into(),
            }),
        };
        let text = status_text(&state, "gpt-4o-mini", Duration::from_secs(60));
        assert!(text.contains("есть сохранённый перевод"));
    }
}
