mod commands;
mod gateway;
mod keyboards;
mod replies;

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::sync::Arc;
use tolmach_channels::telegram::TelegramChannel;
use tolmach_core::{config, language::Language, traits::Translator};
use tolmach_providers::openai::OpenAiTranslator;

#[derive(Parser)]
#[command(name = "tolmach", version, about = "Толмач — Telegram translation bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Check configuration and translator availability.
    Status,
    /// Translate a text once, without starting the bot.
    Translate {
        /// Target language code (sr or en).
        #[arg(long, default_value = "sr")]
        to: String,
        /// The text to translate.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let cfg = config::load(&cli.config)?;
            cfg.validate()?;

            let translator: Arc<dyn Translator> =
                Arc::new(OpenAiTranslator::from_config(&cfg.translator));
            if !translator.is_available().await {
                anyhow::bail!(
                    "translator '{}' is not available. Check your API key and network.",
                    translator.name()
                );
            }

            let mut channels: HashMap<String, Arc<dyn tolmach_core::traits::Channel>> =
                HashMap::new();
            channels.insert(
                "telegram".to_string(),
                Arc::new(TelegramChannel::new(&cfg.telegram)),
            );

            println!("Толмач — starting bot...");
            let gw = Arc::new(gateway::Gateway::new(
                translator,
                channels,
                cfg.allow_list(),
                cfg.auth.deny_message.clone(),
                cfg.translator.model.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            println!("Толмач — Status Check\n");
            println!("Config: {}", cli.config);
            println!(
                "  telegram: {}",
                if cfg.telegram.bot_token.is_empty() {
                    "missing bot_token"
                } else {
                    "configured"
                }
            );
            let allow = cfg.allow_list();
            println!(
                "  access: {}",
                if allow.is_empty() {
                    "unrestricted".to_string()
                } else {
                    format!("{} allowed users", allow.len())
                }
            );
            println!("  model: {}", cfg.translator.model);

            let translator = OpenAiTranslator::from_config(&cfg.translator);
            println!(
                "  translator: {}",
                if translator.is_available().await {
                    "available"
                } else {
                    "not available"
                }
            );
        }
        Commands::Translate { to, text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: tolmach translate <text>");
            }
            let target = Language::from_code(&to)
                .ok_or_else(|| anyhow::anyhow!("unknown language code: {to} (expected sr or en)"))?;

            let cfg = config::load(&cli.config)?;
            if cfg.translator.api_key.trim().is_empty() {
                anyhow::bail!("translator.api_key is required (or set OPENAI_API_KEY)");
            }

            let translator = OpenAiTranslator::from_config(&cfg.translator);
            let translated = translator.translate(&text.join(" "), target).await?;
            println!("{translated}");
        }
    }

    Ok(())
}
