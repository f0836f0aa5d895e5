//! Greedy autoregressive token decoding.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{AsrError, ModelError};
use crate::model::{HiddenState, TokenDecoder};

/// `<|endoftext|>`
pub const TOKEN_EOT: u32 = parla_tokenizer::TOKEN_EOT;
/// `<|startoftranscript|>`
pub const TOKEN_SOT: u32 = 50257;
/// `<|en|>`
pub const TOKEN_EN: u32 = 50258;
/// `<|transcribe|>`
pub const TOKEN_TRANSCRIBE: u32 = 50358;
/// `<|notimestamps|>`
pub const TOKEN_NO_TIMESTAMPS: u32 = 50362;
/// Upper bound on generated tokens per utterance.
pub const MAX_NEW_TOKENS: usize = 448;

/// Special token ids and limits of the decode loop.
///
/// Defaults target the English-only distil-whisper vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub sot: u32,
    pub language: u32,
    pub task: u32,
    pub no_timestamps: u32,
    pub eot: u32,
    pub max_new_tokens: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            sot: TOKEN_SOT,
            language: TOKEN_EN,
            task: TOKEN_TRANSCRIBE,
            no_timestamps: TOKEN_NO_TIMESTAMPS,
            eot: TOKEN_EOT,
            max_new_tokens: MAX_NEW_TOKENS,
        }
    }
}

impl DecoderConfig {
    /// The forced prefix every sequence starts with.
    pub fn prompt(&self) -> [u32; 4] {
        [self.sot, self.language, self.task, self.no_timestamps]
    }
}

/// Why the decode loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndOfText,
    MaxTokens,
}

/// Result of a decode run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Text tokens only: ids below end-of-text.
    pub tokens: Vec<u32>,
    /// Number of model calls made.
    pub steps: usize,
    pub stop: StopReason,
}

/// Index of the largest logit; the first one wins ties.
pub fn argmax(logits: &[f32]) -> Option<usize> {
    let (first, rest) = logits.split_first()?;
    let mut best = 0;
    let mut best_val = *first;
    for (i, &v) in rest.iter().enumerate() {
        if v > best_val {
            best = i + 1;
            best_val = v;
        }
    }
    Some(best)
}

/// Runs the greedy loop against `decoder`.
///
/// Cancellation is checked before every step; a cancelled run discards what
/// it has produced so far.
pub fn greedy_decode(
    decoder: &dyn TokenDecoder,
    hidden: &HiddenState,
    cfg: &DecoderConfig,
    cancel: &CancellationToken,
) -> Result<Decoded, AsrError> {
    let mut sequence: Vec<u32> = cfg.prompt().to_vec();
    sequence.reserve(cfg.max_new_tokens);
    let mut tokens = Vec::new();
    let mut stop = StopReason::MaxTokens;
    let mut steps = 0;

    while steps < cfg.max_new_tokens {
        if cancel.is_cancelled() {
            debug!(steps, "decoder: cancelled");
            return Err(AsrError::Cancelled);
        }

        let logits = decoder.decode_step(&sequence, hidden)?;
        steps += 1;
        let next = argmax(&logits).ok_or(ModelError::EmptyLogits)? as u32;
        sequence.push(next);

        if next == cfg.eot {
            stop = StopReason::EndOfText;
            break;
        }
        if next < cfg.eot {
            tokens.push(next);
        }
    }

    debug!(steps, tokens = tokens.len(), reason = ?stop, "decoder: done");
    Ok(Decoded {
        tokens,
        steps,
        stop,
    })
}
