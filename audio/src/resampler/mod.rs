//! Sample-rate conversion to the 16 kHz mono input the encoder expects.
//!
//! [`resample_linear`] is the reference converter: cheap, deterministic and
//! what the features were tuned against. [`FftResampler`] wraps rubato for
//! callers that prefer band-limited conversion.
//!
//! # Example
//!
//! ```rust
//! use parla_audio::resampler::{resample, ResampleQuality};
//!
//! let input = vec![0.0f32; 48000];
//! let out = resample(&input, 48000, 16000, ResampleQuality::Linear).unwrap();
//! assert_eq!(out.len(), 16000);
//! ```

mod fft;

pub use fft::FftResampler;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pcm;

/// Errors returned by the resamplers.
#[derive(Debug, Error)]
pub enum ResampleError {
    #[error("resampler: invalid rate {src_rate} -> {dst_rate}")]
    InvalidRate { src_rate: u32, dst_rate: u32 },

    #[error("resampler: rubato: {0}")]
    Rubato(String),
}

impl From<rubato::ResamplerConstructionError> for ResampleError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        ResampleError::Rubato(e.to_string())
    }
}

impl From<rubato::ResampleError> for ResampleError {
    fn from(e: rubato::ResampleError) -> Self {
        ResampleError::Rubato(e.to_string())
    }
}

/// Which converter [`resample`] uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleQuality {
    #[default]
    Linear,
    Fft,
}

/// Linear-interpolation resampling.
///
/// Equal rates return the input unchanged. Otherwise output sample `i` reads
/// source position `i * src / dst`, blending the floor and ceil neighbours
/// (the ceil clamped to the last sample) by the fractional part. Output length
/// is `floor(len / (src / dst))`. A zero rate yields an empty buffer.
pub fn resample_linear(samples: &[f32], src_rate: u32, dst_rate: u32) -> Vec<f32> {
    if src_rate == dst_rate {
        return samples.to_vec();
    }
    if src_rate == 0 || dst_rate == 0 || samples.is_empty() {
        return Vec::new();
    }

    let ratio = src_rate as f64 / dst_rate as f64;
    let out_len = (samples.len() as f64 / ratio).floor() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let i0 = (pos.floor() as usize).min(last);
            let i1 = (i0 + 1).min(last);
            let frac = (pos - pos.floor()) as f32;
            samples[i0] * (1.0 - frac) + samples[i1] * frac
        })
        .collect()
}

/// Resamples with the selected converter.
pub fn resample(
    samples: &[f32],
    src_rate: u32,
    dst_rate: u32,
    quality: ResampleQuality,
) -> Result<Vec<f32>, ResampleError> {
    if src_rate == 0 || dst_rate == 0 {
        return Err(ResampleError::InvalidRate { src_rate, dst_rate });
    }
    match quality {
        ResampleQuality::Linear => Ok(resample_linear(samples, src_rate, dst_rate)),
        ResampleQuality::Fft => FftResampler::new(src_rate, dst_rate)?.process(samples),
    }
}

/// Converts 16-bit mono PCM at `src_rate` to normalized f32 at `dst_rate`
/// using the linear converter.
pub fn to_mono_f32(samples: &[i16], src_rate: u32, dst_rate: u32) -> Vec<f32> {
    resample_linear(&pcm::i16_to_f32(samples), src_rate, dst_rate)
}
