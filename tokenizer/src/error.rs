use thiserror::Error;

/// Errors returned when loading tokenizer assets.
#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("tokenizer: invalid vocabulary: {0}")]
    InvalidVocab(#[from] serde_json::Error),

    #[error("tokenizer: empty vocabulary")]
    EmptyVocab,

    #[error("tokenizer: token {token:?} and {other:?} share id {id}")]
    DuplicateId { id: u32, token: String, other: String },
}
