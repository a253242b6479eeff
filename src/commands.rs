//! Built-in bot commands — instant responses, no translation call
//! (except that unknown `/` prefixes fall through to translation).

use std::time::Duration;

use tolmach_core::{language::Language, message::Keyboard, state::ChatState};

use crate::keyboards;
use crate::replies;

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
    SetLanguage(Language),
}

impl Command {
    /// Parse a command from message text. Returns `None` for non-commands
    /// and unknown `/` prefixes (which pass through to translation).
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        // Strip @botname suffix (e.g. "/help@tolmach_bot" → "/help").
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/status" => Some(Self::Status),
            "/sr" => Some(Self::SetLanguage(Language::SrLatn)),
            "/en" => Some(Self::SetLanguage(Language::En)),
            _ => None,
        }
    }
}

/// Context a command needs to compose its reply.
pub struct CommandContext<'a> {
    pub state: &'a ChatState,
    pub model: &'a str,
    pub uptime: Duration,
}

/// Compose the reply for a command. State mutation (language selection)
/// happens in the gateway before this is called.
pub fn handle(cmd: Command, ctx: &CommandContext<'_>) -> (String, Option<Keyboard>) {
    match cmd {
        Command::Start => (
            replies::WELCOME.to_string(),
            Some(keyboards::language_keyboard(ctx.state.target)),
        ),
        Command::Help => (replies::HELP.to_string(), None),
        Command::Status => (
            replies::status_text(ctx.state, ctx.model, ctx.uptime),
            None,
        ),
        Command::SetLanguage(lang) => (
            replies::language_confirmation(lang),
            Some(keyboards::language_keyboard(lang)),
        ),
    }
}
