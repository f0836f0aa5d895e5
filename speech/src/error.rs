use std::path::PathBuf;

use parla_phonemizer::PhonemizerError;
use thiserror::Error;

use crate::voice::EngineKind;

/// Errors reported by model implementations.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model: inference failed: {0}")]
    Inference(String),

    #[error("model: invalid input: {0}")]
    InvalidInput(String),

    #[error("model: empty logits")]
    EmptyLogits,
}

/// Errors returned when loading or indexing voice style tables.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("style: empty style table")]
    Empty,

    #[error("style: length {0} is not a multiple of 4")]
    Misaligned(usize),

    #[error("style: {0} bytes is shorter than one row")]
    TooShort(usize),

    #[error("style: no style table for voice {0:?}")]
    NotFound(String),

    #[error("style: read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by the transcription pipeline.
#[derive(Debug, Error)]
pub enum AsrError {
    #[error("asr: cancelled")]
    Cancelled,

    #[error("asr: {0}")]
    Model(#[from] ModelError),

    #[error("asr: {0}")]
    Resample(#[from] parla_audio::resampler::ResampleError),

    #[error("asr: decoder end-of-text {decoder} differs from detokenizer end-of-text {detokenizer}")]
    EotMismatch { decoder: u32, detokenizer: u32 },

    #[error("asr: worker: {0}")]
    Join(String),
}

/// Errors returned by the synthesis pipeline.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("tts: no model loaded for engine {0}")]
    EngineUnavailable(EngineKind),

    #[error("tts: {0}")]
    Phonemizer(#[from] PhonemizerError),

    #[error("tts: {0}")]
    Style(#[from] StyleError),

    #[error("tts: {0}")]
    Model(#[from] ModelError),

    #[error("tts: worker: {0}")]
    Join(String),
}
