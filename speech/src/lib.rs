//! Speech recognition and synthesis pipelines.
//!
//! This crate wires the signal and text front-ends to pluggable models:
//! - [`Transcriber`]: PCM -> log-mel -> encoder -> greedy decode -> text
//! - [`Synthesizer`]: text -> sentences -> phonemes -> tokens + style -> PCM
//! - [`voice`]: the built-in voice catalog and per-engine profiles
//!
//! Inference itself sits behind the traits in [`model`]; anything that can
//! map features to logits or tokens to a waveform can be plugged in.
//!
//! # Example
//!
//! ```rust,ignore
//! use parla_speech::{Synthesizer, EngineKind, StyleDir};
//!
//! let tts = Synthesizer::new(phonemizer, Box::new(StyleDir::new("voices")))
//!     .with_model(EngineKind::Kokoro, Box::new(my_kokoro));
//! let audio = tts.synthesize("Hello there.", "en-US-heart-kokoro", 1.0)?;
//! ```

mod asr;
pub mod decoder;
mod error;
pub mod model;
pub mod style;
mod tts;
pub mod voice;

pub use asr::{Transcriber, Transcript};
pub use decoder::{DecoderConfig, StopReason};
pub use error::{AsrError, ModelError, StyleError, TtsError};
pub use model::{HiddenState, SpeechEncoder, SynthesisModel, TokenDecoder};
pub use style::{StyleDir, StyleSource, VoiceStyleTable, STYLE_DIM};
pub use tts::{clamp_speed, Audio, Synthesizer, MAX_SPEED, MIN_SPEED};
pub use voice::{EngineKind, EngineProfile, Voice, DEFAULT_VOICE_ID};
