//! Log-mel spectrogram extraction for Whisper-style encoders.
//!
//! Output is always an `[num_mels, num_frames]` f32 matrix covering a fixed
//! window of audio: shorter input is zero-padded, longer input is truncated.
//!
//! Default parameters match the Whisper preprocessing:
//! - SampleRate: 16000
//! - WindowSize: 400 (25ms), Hann
//! - HopSize: 160 (10ms)
//! - FFTSize: 512 (window zero-padded to the next power of two)
//! - NumMels: 80 (Slaney scale, 0-8000 Hz)
//! - NumFrames: 3000 (30s)
//!
//! The frame loop is window -> FFT -> power -> mel -> log10 -> clamp to
//! `[max - 8, max]` -> `(x + 4) / 4`, where `max` is taken over the whole
//! matrix rather than per frame.

pub mod fft;
pub mod mel;

use thiserror::Error;
use tracing::debug;

use crate::pcm;

/// Floor applied to mel power before taking the logarithm.
const LOG_FLOOR: f64 = 1e-10;

/// Dynamic range kept below the global maximum, in log10 units.
const DYNAMIC_RANGE: f32 = 8.0;

/// Errors returned when building an [`Extractor`].
#[derive(Debug, Error)]
pub enum FbankError {
    #[error("fbank: invalid config: {0}")]
    InvalidConfig(String),
}

/// Configuration for log-mel extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sample_rate: usize,
    pub window_size: usize,
    pub hop_size: usize,
    pub fft_size: usize,
    pub num_mels: usize,
    pub num_frames: usize,
    pub f_min: f64,
    pub f_max: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            window_size: 400,
            hop_size: 160,
            fft_size: 512,
            num_mels: 80,
            num_frames: 3000,
            f_min: 0.0,
            f_max: 8000.0,
        }
    }
}

impl Config {
    /// Number of input samples covered by the fixed window.
    pub fn num_samples(&self) -> usize {
        self.num_frames * self.hop_size
    }

    /// Number of non-redundant FFT bins.
    pub fn num_freq_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    fn validate(&self) -> Result<(), FbankError> {
        if !self.fft_size.is_power_of_two() {
            return Err(FbankError::InvalidConfig(format!(
                "fft_size {} is not a power of two",
                self.fft_size
            )));
        }
        if self.fft_size < self.window_size {
            return Err(FbankError::InvalidConfig(format!(
                "fft_size {} is smaller than window_size {}",
                self.fft_size, self.window_size
            )));
        }
        if self.window_size == 0 || self.hop_size == 0 {
            return Err(FbankError::InvalidConfig(
                "window_size and hop_size must be non-zero".to_string(),
            ));
        }
        if self.num_mels == 0 || self.num_frames == 0 {
            return Err(FbankError::InvalidConfig(
                "num_mels and num_frames must be non-zero".to_string(),
            ));
        }
        if !(self.f_min >= 0.0 && self.f_min < self.f_max) {
            return Err(FbankError::InvalidConfig(format!(
                "invalid frequency range [{}, {}]",
                self.f_min, self.f_max
            )));
        }
        Ok(())
    }
}

/// A fixed-shape log-mel matrix stored mel-major (`data[mel * num_frames + frame]`).
#[derive(Debug, Clone, PartialEq)]
pub struct MelSpectrogram {
    num_mels: usize,
    num_frames: usize,
    data: Vec<f32>,
}

impl MelSpectrogram {
    /// Returns `(num_mels, num_frames)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_mels, self.num_frames)
    }

    pub fn num_mels(&self) -> usize {
        self.num_mels
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Value of mel band `mel` at `frame`.
    pub fn get(&self, mel: usize, frame: usize) -> f32 {
        self.data[mel * self.num_frames + frame]
    }

    /// All frames of one mel band.
    pub fn band(&self, mel: usize) -> &[f32] {
        let start = mel * self.num_frames;
        &self.data[start..start + self.num_frames]
    }

    /// Flat view, ready to be wrapped in a `[1, num_mels, num_frames]` tensor.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Log-mel feature extractor.
///
/// Holds the Hann window and the mel filterbank; both are read-only after
/// construction, so one extractor can be shared across threads.
pub struct Extractor {
    cfg: Config,
    window: Vec<f64>,
    mel_bank: Vec<Vec<f64>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::build(Config::default())
    }
}

impl Extractor {
    /// Creates a new extractor with the given config.
    pub fn new(cfg: Config) -> Result<Self, FbankError> {
        cfg.validate()?;
        Ok(Self::build(cfg))
    }

    fn build(cfg: Config) -> Self {
        let window = mel::hann_window(cfg.window_size);
        let mel_bank = mel::mel_filter_bank(
            cfg.num_mels,
            cfg.fft_size,
            cfg.sample_rate,
            cfg.f_min,
            cfg.f_max,
        );
        debug!(
            num_mels = cfg.num_mels,
            freq_bins = cfg.num_freq_bins(),
            "fbank: filterbank built"
        );
        Self {
            cfg,
            window,
            mel_bank,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The `[num_mels][num_freq_bins]` filterbank.
    pub fn filterbank(&self) -> &[Vec<f64>] {
        &self.mel_bank
    }

    /// Extracts the log-mel matrix from normalized f32 samples (range [-1, 1])
    /// at the configured sample rate.
    pub fn extract(&self, samples: &[f32]) -> MelSpectrogram {
        let cfg = &self.cfg;
        let audio = &samples[..samples.len().min(cfg.num_samples())];
        let nfft = cfg.fft_size;
        let bins = cfg.num_freq_bins();

        let mut power_mel = vec![0.0f64; cfg.num_mels * cfg.num_frames];
        let mut real = vec![0.0f64; nfft];
        let mut imag = vec![0.0f64; nfft];
        let mut power = vec![0.0f64; bins];

        for frame in 0..cfg.num_frames {
            let start = frame * cfg.hop_size;

            // Past the end of the audio the frame is silence: zero power.
            if start >= audio.len() {
                continue;
            }

            real.fill(0.0);
            imag.fill(0.0);
            let end = (start + cfg.window_size).min(audio.len());
            for (i, &s) in audio[start..end].iter().enumerate() {
                real[i] = s as f64 * self.window[i];
            }

            fft::fft(&mut real, &mut imag);

            for (k, p) in power.iter_mut().enumerate() {
                *p = real[k] * real[k] + imag[k] * imag[k];
            }

            for (m, filter) in self.mel_bank.iter().enumerate() {
                let sum: f64 = filter.iter().zip(power.iter()).map(|(w, p)| w * p).sum();
                power_mel[m * cfg.num_frames + frame] = sum;
            }
        }

        let mut data: Vec<f32> = power_mel
            .iter()
            .map(|&v| v.max(LOG_FLOOR).log10() as f32)
            .collect();

        let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let floor = max - DYNAMIC_RANGE;
        for v in data.iter_mut() {
            *v = (v.clamp(floor, max) + 4.0) / 4.0;
        }

        MelSpectrogram {
            num_mels: cfg.num_mels,
            num_frames: cfg.num_frames,
            data,
        }
    }

    /// Extracts features from raw int16 PCM bytes (little-endian) at the
    /// configured sample rate.
    pub fn extract_from_int16(&self, pcm_bytes: &[u8]) -> MelSpectrogram {
        let samples = pcm::i16_to_f32(&pcm::i16_from_le_bytes(pcm_bytes));
        self.extract(&samples)
    }
}
