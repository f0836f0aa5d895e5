//! Speech-to-text pipeline.

use std::sync::Arc;

use parla_audio::resampler::{self, ResampleQuality};
use parla_audio::{pcm, Extractor};
use parla_tokenizer::ByteLevelDecoder;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::decoder::{self, DecoderConfig, StopReason};
use crate::error::AsrError;
use crate::model::{SpeechEncoder, TokenDecoder};

/// Result of one transcription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    /// Detokenized text, trimmed.
    pub text: String,
    /// Text token ids, without the prompt and end-of-text.
    pub tokens: Vec<u32>,
    /// Decoder calls made.
    pub steps: usize,
    pub stop: StopReason,
    /// Length of the input audio.
    pub duration_ms: u64,
}

impl Transcript {
    /// True when nothing was recognized. Not an error.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

fn check_eot(config: &DecoderConfig, detokenizer: &ByteLevelDecoder) -> Result<(), AsrError> {
    if config.eot != detokenizer.eot() {
        return Err(AsrError::EotMismatch {
            decoder: config.eot,
            detokenizer: detokenizer.eot(),
        });
    }
    Ok(())
}

/// Owns an encoder/decoder pair and turns PCM into text.
///
/// The models are released when the transcriber is dropped. The extractor
/// and detokenizer are shared.
pub struct Transcriber {
    encoder: Box<dyn SpeechEncoder>,
    decoder: Box<dyn TokenDecoder>,
    extractor: Arc<Extractor>,
    detokenizer: Arc<ByteLevelDecoder>,
    config: DecoderConfig,
    quality: ResampleQuality,
}

impl Transcriber {
    /// Creates a transcriber with the default decoder config.
    ///
    /// Fails when the detokenizer's end-of-text id differs from the
    /// decoder's.
    pub fn new(
        encoder: Box<dyn SpeechEncoder>,
        decoder: Box<dyn TokenDecoder>,
        extractor: Arc<Extractor>,
        detokenizer: Arc<ByteLevelDecoder>,
    ) -> Result<Self, AsrError> {
        let config = DecoderConfig::default();
        check_eot(&config, &detokenizer)?;
        Ok(Self {
            encoder,
            decoder,
            extractor,
            detokenizer,
            config,
            quality: ResampleQuality::default(),
        })
    }

    /// Replaces the decoder config. The end-of-text id must match the
    /// detokenizer's.
    pub fn with_config(mut self, config: DecoderConfig) -> Result<Self, AsrError> {
        check_eot(&config, &self.detokenizer)?;
        self.config = config;
        Ok(self)
    }

    pub fn with_resample_quality(mut self, quality: ResampleQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Rate the extractor expects; input is resampled to it.
    pub fn sample_rate(&self) -> u32 {
        self.extractor.config().sample_rate as u32
    }

    /// Transcribes one utterance of 16-bit mono PCM at `sample_rate`.
    pub fn transcribe(
        &self,
        samples: &[i16],
        sample_rate: u32,
        cancel: &CancellationToken,
    ) -> Result<Transcript, AsrError> {
        let audio = pcm::i16_to_f32(samples);
        self.transcribe_f32(&audio, sample_rate, cancel)
    }

    /// Same as [`Transcriber::transcribe`] for normalized f32 samples.
    pub fn transcribe_f32(
        &self,
        samples: &[f32],
        sample_rate: u32,
        cancel: &CancellationToken,
    ) -> Result<Transcript, AsrError> {
        let duration_ms = pcm::duration_ms(samples.len(), sample_rate);
        let audio = resampler::resample(samples, sample_rate, self.sample_rate(), self.quality)?;
        debug!(
            input = samples.len(),
            resampled = audio.len(),
            sample_rate,
            "asr: audio prepared"
        );

        if cancel.is_cancelled() {
            return Err(AsrError::Cancelled);
        }
        let mel = self.extractor.extract(&audio);
        let hidden = self.encoder.encode(&mel)?;

        let decoded = decoder::greedy_decode(self.decoder.as_ref(), &hidden, &self.config, cancel)?;
        let text = self.detokenizer.decode(&decoded.tokens).trim().to_string();
        info!(
            duration_ms,
            steps = decoded.steps,
            chars = text.len(),
            "asr: transcribed"
        );

        Ok(Transcript {
            text,
            tokens: decoded.tokens,
            steps: decoded.steps,
            stop: decoded.stop,
            duration_ms,
        })
    }

    /// Runs [`Transcriber::transcribe`] on the blocking pool.
    pub async fn transcribe_async(
        self: Arc<Self>,
        samples: Vec<i16>,
        sample_rate: u32,
        cancel: CancellationToken,
    ) -> Result<Transcript, AsrError> {
        tokio::task::spawn_blocking(move || self.transcribe(&samples, sample_rate, &cancel))
            .await
            .map_err(|e| AsrError::Join(e.to_string()))?
    }
}
