//! Utility functions for CLI commands.

use clap::ValueEnum;
use parla_cli::{load_config, Config, Output, OutputFormat};
use parla_speech::EngineKind;
use serde::Serialize;

use crate::Cli;

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Prints `value` in the format selected on the command line.
pub fn output<T: Serialize>(value: &T, cli: &Cli) -> anyhow::Result<()> {
    Output::new(OutputFormat::from_json_flag(cli.json), cli.output.clone()).write(value)
}

/// Synthesis engine as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    Kokoro,
    Kitten,
}

impl From<Engine> for EngineKind {
    fn from(e: Engine) -> Self {
        match e {
            Engine::Kokoro => EngineKind::Kokoro,
            Engine::Kitten => EngineKind::Kitten,
        }
    }
}
