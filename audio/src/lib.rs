//! Audio front-end for the speech pipelines.
//!
//! - `pcm`: 16-bit PCM <-> normalized f32 conversion and level metering
//! - `resampler`: sample-rate conversion (linear reference path, rubato FFT)
//! - `fbank`: Whisper-compatible log-mel spectrogram extraction
//!
//! # Example
//!
//! ```rust
//! use parla_audio::fbank::Extractor;
//! use parla_audio::resampler::to_mono_f32;
//!
//! // 100ms of 48kHz silence, converted to the 16kHz encoder rate.
//! let pcm = vec![0i16; 4800];
//! let samples = to_mono_f32(&pcm, 48000, 16000);
//!
//! let mel = Extractor::default().extract(&samples);
//! assert_eq!(mel.shape(), (80, 3000));
//! ```

pub mod fbank;
pub mod pcm;
pub mod resampler;

pub use fbank::{Extractor, MelSpectrogram};
