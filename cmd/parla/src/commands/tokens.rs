//! Token conversion commands.

use clap::Args;
use parla_speech::EngineKind;
use parla_tokenizer::phoneme;
use serde::Serialize;

use super::{get_config, output, Engine};
use crate::Cli;

/// Map a phoneme string to synthesis token ids.
#[derive(Args)]
pub struct TokenizeCommand {
    /// Phoneme string (IPA)
    phonemes: String,

    /// Engine whose wrapping to apply
    #[arg(long, value_enum, default_value = "kokoro")]
    engine: Engine,
}

#[derive(Serialize)]
struct Tokenized {
    engine: EngineKind,
    tokens: Vec<i64>,
    /// Row the engine would select from a style table.
    style_length: usize,
    unknown: Vec<char>,
}

impl TokenizeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let engine = EngineKind::from(self.engine);
        let profile = engine.profile();
        let tokens = phoneme::encode(&self.phonemes, profile.wrapping);
        let unknown = self
            .phonemes
            .chars()
            .filter(|&c| phoneme::id_of(c).is_none())
            .collect();
        output(
            &Tokenized {
                engine,
                style_length: profile.style_length(&self.phonemes, &tokens),
                tokens,
                unknown,
            },
            cli,
        )
    }
}

/// Turn transcript token ids back into text using the configured vocabulary.
#[derive(Args)]
pub struct DetokenizeCommand {
    /// Token ids
    #[arg(required = true, num_args = 1..)]
    ids: Vec<u32>,
}

#[derive(Serialize)]
struct Detokenized {
    text: String,
}

impl DetokenizeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let decoder = cfg.load_detokenizer()?;
        output(
            &Detokenized {
                text: decoder.decode(&self.ids),
            },
            cli,
        )
    }
}
