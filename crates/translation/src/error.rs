use thiserror::Error;

/// Why a translation fell back to the input text.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Translator key is not configured")]
    MissingKey,

    #[error("Translator request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Translator returned status {0}")]
    Status(u16),

    #[error("Translator reply had no translation")]
    EmptyReply,
}
