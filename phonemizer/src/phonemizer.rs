use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::dictionary::PronunciationDictionary;
use crate::error::PhonemizerError;
use crate::g2p::{self, SEQ_LEN};
use crate::{ctc, normalize};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w']+|[^\w\s]").unwrap());
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w']+$").unwrap());

/// Punctuation that closes up against the preceding word.
const CLOSING: &[&str] = &[".", ",", "!", "?", ";", ":", ")", "]", "}", "\u{BB}", "\u{201D}"];

/// Punctuation that closes up against the following word.
const OPENING: &[&str] = &["(", "[", "{", "\u{AB}", "\u{201C}"];

/// Neural grapheme-to-phoneme model used for dictionary misses.
pub trait FallbackModel: Send + Sync {
    /// Runs the model on an encoded word, returning logits per position.
    fn infer(&self, input: &[i64; SEQ_LEN]) -> Result<Vec<Vec<f32>>, PhonemizerError>;
}

/// Splits normalized text into word and punctuation tokens.
pub fn segment(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

fn is_punctuation(token: &str) -> bool {
    PUNCT_RE.is_match(token)
}

/// English text -> IPA phoneme string.
///
/// Words are looked up in the pronunciation dictionary first. Misses go to
/// the fallback model when one is attached; without one the lowercase word
/// is passed through as-is.
pub struct Phonemizer {
    dictionary: Arc<PronunciationDictionary>,
    fallback: Option<Box<dyn FallbackModel>>,
}

impl Phonemizer {
    /// Creates a dictionary-only phonemizer.
    pub fn new(dictionary: Arc<PronunciationDictionary>) -> Self {
        Self {
            dictionary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, model: Box<dyn FallbackModel>) -> Self {
        self.fallback = Some(model);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn dictionary(&self) -> &PronunciationDictionary {
        &self.dictionary
    }

    /// Normalizes `text` and converts it to phonemes.
    ///
    /// Closing punctuation attaches to the previous word. Opening punctuation
    /// is appended as is and the next word attaches to it. Anything else is
    /// separated by spaces.
    pub fn phonemize(&self, text: &str) -> Result<String, PhonemizerError> {
        let normalized = normalize::normalize(text);
        let mut out = String::new();

        for token in segment(&normalized) {
            if is_punctuation(token) {
                if CLOSING.contains(&token) {
                    if out.ends_with(' ') {
                        out.pop();
                    }
                } else if !OPENING.contains(&token) && !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str(token);
                continue;
            }

            if !out.is_empty() && !out.ends_with(' ') && !ends_with_opening(&out) {
                out.push(' ');
            }
            out.push_str(&self.phonemize_word(&token.to_lowercase())?);
        }

        Ok(out.trim().to_string())
    }

    /// Phonemes for one lowercase word.
    pub fn phonemize_word(&self, word: &str) -> Result<String, PhonemizerError> {
        if let Some(ipa) = self.dictionary.get(word) {
            return Ok(ipa.to_string());
        }
        let Some(model) = &self.fallback else {
            warn!(word, "phonemizer: no dictionary entry and no fallback model");
            return Ok(word.to_string());
        };

        let input = g2p::encode_word(word);
        let logits = model.infer(&input)?;
        let phonemes = ctc::decode(&ctc::greedy_ids(&logits));
        debug!(word, phonemes = %phonemes, "phonemizer: fallback");
        Ok(phonemes)
    }
}

fn ends_with_opening(out: &str) -> bool {
    out.chars()
        .last()
        .is_some_and(|c| OPENING.iter().any(|p| p.starts_with(c)))
}
