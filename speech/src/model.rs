//! Inference boundary.
//!
//! The pipelines only see these traits: features or token ids in, logits or
//! a waveform out. Runtimes (ONNX, ncnn, a remote service, a test stub) live
//! behind them. Implementations are owned by the pipeline and released when
//! it is dropped.

use parla_audio::MelSpectrogram;

use crate::error::ModelError;

/// Encoder output kept opaque to the decode loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HiddenState {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl HiddenState {
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Self {
        Self { shape, data }
    }
}

/// Speech-to-text encoder: `[1, mels, frames]` features to hidden states.
pub trait SpeechEncoder: Send + Sync {
    fn encode(&self, mel: &MelSpectrogram) -> Result<HiddenState, ModelError>;
}

/// Speech-to-text decoder step.
pub trait TokenDecoder: Send + Sync {
    /// Returns the logits for the position after `tokens`.
    fn decode_step(&self, tokens: &[u32], hidden: &HiddenState) -> Result<Vec<f32>, ModelError>;
}

/// Phoneme tokens + style vector -> waveform in `[-1, 1]`.
pub trait SynthesisModel: Send + Sync {
    fn synthesize(&self, tokens: &[i64], style: &[f32], speed: f32)
        -> Result<Vec<f32>, ModelError>;
}
