//! Text normalization and phonemization commands.

use clap::Args;
use parla_phonemizer::{normalize, split_sentences, Phonemizer};
use parla_tokenizer::phoneme;
use serde::Serialize;

use super::{get_config, output};
use crate::Cli;

/// Expand numbers, ordinals and abbreviations into words.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Input text
    text: String,
}

#[derive(Serialize)]
struct Normalized {
    sentences: Vec<SentenceText>,
}

#[derive(Serialize)]
struct SentenceText {
    input: String,
    normalized: String,
}

impl NormalizeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let sentences = split_sentences(&self.text)
            .into_iter()
            .map(|s| SentenceText {
                normalized: normalize(&s),
                input: s,
            })
            .collect();
        output(&Normalized { sentences }, cli)
    }
}

/// Convert text to phonemes using the configured dictionary.
///
/// Words missing from the dictionary are passed through unchanged.
#[derive(Args)]
pub struct PhonemizeCommand {
    /// Input text
    text: String,
}

#[derive(Serialize)]
struct Phonemized {
    sentence: String,
    phonemes: String,
    phoneme_count: usize,
}

impl PhonemizeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let phonemizer = Phonemizer::new(cfg.load_dictionary()?);

        let mut result = Vec::new();
        for sentence in split_sentences(&self.text) {
            let phonemes = phonemizer.phonemize(&sentence)?;
            result.push(Phonemized {
                phoneme_count: phoneme::phoneme_count(&phonemes),
                sentence,
                phonemes,
            });
        }
        output(&result, cli)
    }
}
