//! Text-to-speech pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use parla_audio::pcm;
use parla_phonemizer::{split_sentences, Phonemizer};
use parla_tokenizer::phoneme;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::TtsError;
use crate::model::SynthesisModel;
use crate::style::StyleSource;
use crate::voice::{self, EngineKind};

/// Slowest accepted speaking rate.
pub const MIN_SPEED: f32 = 0.5;
/// Fastest accepted speaking rate.
pub const MAX_SPEED: f32 = 2.0;

/// Synthesized 16-bit mono PCM.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Audio {
    #[serde(skip)]
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub voice_id: String,
}

impl Audio {
    pub fn empty(voice_id: &str, sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
            voice_id: voice_id.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        pcm::duration_ms(self.samples.len(), self.sample_rate)
    }

    /// Little-endian byte buffer, ready to be written or played.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        pcm::i16_to_le_bytes(&self.samples)
    }
}

/// Clamps a requested speaking rate to `[MIN_SPEED, MAX_SPEED]`.
///
/// NaN falls back to normal speed.
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        return 1.0;
    }
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Owns one synthesis model per engine and turns text into PCM.
pub struct Synthesizer {
    models: HashMap<EngineKind, Box<dyn SynthesisModel>>,
    phonemizer: Arc<Phonemizer>,
    styles: Box<dyn StyleSource>,
}

impl Synthesizer {
    /// Creates a synthesizer with no models; add them with
    /// [`Synthesizer::with_model`].
    pub fn new(phonemizer: Arc<Phonemizer>, styles: Box<dyn StyleSource>) -> Self {
        Self {
            models: HashMap::new(),
            phonemizer,
            styles,
        }
    }

    pub fn with_model(mut self, engine: EngineKind, model: Box<dyn SynthesisModel>) -> Self {
        self.models.insert(engine, model);
        self
    }

    pub fn has_engine(&self, engine: EngineKind) -> bool {
        self.models.contains_key(&engine)
    }

    pub fn phonemizer(&self) -> &Phonemizer {
        &self.phonemizer
    }

    /// Synthesizes `text` with the voice `voice_id` at `speed`.
    ///
    /// An empty id selects the default voice. Blank text yields empty audio
    /// without touching the model.
    pub fn synthesize(&self, text: &str, voice_id: &str, speed: f32) -> Result<Audio, TtsError> {
        let voice = if voice_id.is_empty() {
            voice::default_voice().clone()
        } else {
            voice::resolve(voice_id)
        };
        let profile = voice.profile();

        if text.trim().is_empty() {
            return Ok(Audio::empty(&voice.id, profile.sample_rate));
        }

        let model = self
            .models
            .get(&voice.engine)
            .ok_or(TtsError::EngineUnavailable(voice.engine))?;
        let table = self.styles.load(&voice.id)?;
        let speed = clamp_speed(speed);

        let mut wave = Vec::new();
        for sentence in split_sentences(text) {
            let phonemes = self.phonemizer.phonemize(&sentence)?;
            if phonemes.is_empty() {
                continue;
            }

            let tokens = phoneme::encode(&phonemes, profile.wrapping);
            let style = table.select(profile.style_length(&phonemes, &tokens));
            let mut chunk = model.synthesize(&tokens, style, speed)?;
            profile.trim_tail(&mut chunk);
            debug!(
                voice = %voice.id,
                engine = %voice.engine,
                phonemes = phoneme::phoneme_count(&phonemes),
                samples = chunk.len(),
                "tts: sentence synthesized"
            );
            wave.extend_from_slice(&chunk);
        }

        let audio = Audio {
            samples: pcm::f32_to_i16(&wave),
            sample_rate: profile.sample_rate,
            voice_id: voice.id.clone(),
        };
        info!(
            voice = %voice.id,
            engine = %voice.engine,
            duration_ms = audio.duration_ms(),
            "tts: synthesized"
        );
        Ok(audio)
    }

    /// Runs [`Synthesizer::synthesize`] on the blocking pool.
    pub async fn synthesize_async(
        self: Arc<Self>,
        text: String,
        voice_id: String,
        speed: f32,
    ) -> Result<Audio, TtsError> {
        tokio::task::spawn_blocking(move || self.synthesize(&text, &voice_id, speed))
            .await
            .map_err(|e| TtsError::Join(e.to_string()))?
    }
}
