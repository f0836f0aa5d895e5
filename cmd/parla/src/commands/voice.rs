//! Voice catalog commands.

use clap::Args;
use parla_speech::{voice, EngineKind, StyleSource, Voice};
use serde::Serialize;

use super::{get_config, output};
use crate::Cli;

/// List built-in voices.
#[derive(Args)]
pub struct VoicesCommand {
    /// Language code (two or three letters)
    #[arg(long)]
    lang: Option<String>,

    /// Country code (two or three letters)
    #[arg(long)]
    country: Option<String>,

    /// Print only the preferred voice for the locale (the configured
    /// default voice when no language is given)
    #[arg(long)]
    best: bool,
}

impl VoicesCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let lang = self.lang.as_deref().unwrap_or("");
        if self.best {
            if lang.is_empty() {
                return output(&get_config(cli)?.voice(None), cli);
            }
            let best = voice::best_for(lang, self.country.as_deref().unwrap_or(""));
            return output(best, cli);
        }
        let voices: Vec<&Voice> = if lang.is_empty() {
            voice::catalog().iter().collect()
        } else {
            voice::by_locale(lang, self.country.as_deref())
        };
        output(&voices, cli)
    }
}

/// Look up the style vector a voice uses for an utterance length.
#[derive(Args)]
pub struct StyleCommand {
    /// Selector length (tokens for Kokoro, phonemes for Kitten)
    length: usize,

    /// Voice id (default: the configured default voice)
    #[arg(long)]
    voice: Option<String>,

    /// Number of leading values to print
    #[arg(long, default_value_t = 8)]
    head: usize,
}

#[derive(Serialize)]
struct StyleRow {
    voice: String,
    engine: EngineKind,
    rows: usize,
    index: usize,
    head: Vec<f32>,
}

impl StyleCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let voice = cfg.voice(self.voice.as_deref());
        let table = cfg.style_dir()?.load(&voice.id)?;

        let length = match voice.profile().selector_cap {
            Some(cap) => self.length.min(cap),
            None => self.length,
        };
        let row = table.select(length);
        output(
            &StyleRow {
                engine: voice.engine,
                rows: table.rows(),
                index: length.min(table.rows() - 1),
                head: row.iter().take(self.head).copied().collect(),
                voice: voice.id,
            },
            cli,
        )
    }
}
