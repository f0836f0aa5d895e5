//! Audio feature commands.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use parla_audio::{pcm, resampler, Extractor};
use serde::Serialize;
use tracing::debug;

use super::{get_config, output};
use crate::Cli;

/// Extract log-mel features from a raw 16-bit little-endian mono PCM file.
#[derive(Args)]
pub struct MelCommand {
    /// Raw PCM file
    file: PathBuf,

    /// Sample rate of the file
    #[arg(long, default_value_t = 16000)]
    rate: u32,
}

#[derive(Serialize)]
struct MelSummary {
    samples: usize,
    duration_ms: u64,
    level_db: f32,
    num_mels: usize,
    num_frames: usize,
    /// Frames that hold audio; the rest is padding.
    active_frames: usize,
    min: f32,
    max: f32,
    mean: f32,
}

impl MelCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let bytes =
            std::fs::read(&self.file).with_context(|| format!("read {}", self.file.display()))?;
        let samples = pcm::i16_to_f32(&pcm::i16_from_le_bytes(&bytes));

        let extractor = Extractor::default();
        let target = extractor.config().sample_rate as u32;
        let audio = resampler::resample(&samples, self.rate, target, cfg.resample)?;
        debug!(input = samples.len(), resampled = audio.len(), "mel: audio prepared");

        let mel = extractor.extract(&audio);
        let values = mel.as_slice();
        let (min, max, sum) = values.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v as f64),
        );
        let hop = extractor.config().hop_size;

        output(
            &MelSummary {
                samples: samples.len(),
                duration_ms: pcm::duration_ms(samples.len(), self.rate),
                level_db: pcm::rms_db(&samples),
                num_mels: mel.num_mels(),
                num_frames: mel.num_frames(),
                active_frames: audio.len().div_ceil(hop).min(mel.num_frames()),
                min,
                max,
                mean: (sum / values.len() as f64) as f32,
            },
            cli,
        )
    }
}
