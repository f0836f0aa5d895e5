use thiserror::Error;

/// Errors returned by the phonemizer.
#[derive(Debug, Error)]
pub enum PhonemizerError {
    #[error("phonemizer: invalid dictionary: {0}")]
    InvalidDictionary(#[from] serde_json::Error),

    #[error("phonemizer: dictionary has no entries")]
    EmptyDictionary,

    #[error("phonemizer: fallback model: {0}")]
    Model(String),
}
