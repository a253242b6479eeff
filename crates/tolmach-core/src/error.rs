use thiserror::Error;

/// Top-level error type for tolmach.
#[derive(Debug, Error)]
pub enum TolmachError {
    /// Error from the translation backend.
    #[error("translator error: {0}")]
    Translator(String),

    /// The translation API refused the request because of the caller's region.
    #[error("region blocked: {0}")]
    RegionBlocked(String),

    /// The model returned an empty completion.
    #[error("empty translation")]
    EmptyTranslation,

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
