//! Parla CLI - offline tools over the speech front-end.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    ConfigCommand, DetokenizeCommand, MelCommand, NormalizeCommand, PhonemizeCommand,
    StyleCommand, TokenizeCommand, VoicesCommand,
};

/// Parla CLI - inspect every stage of the speech front-end.
///
/// This tool runs the model-free parts of the pipelines:
///   - Text normalization and sentence splitting
///   - Dictionary phonemization and phoneme tokenization
///   - Byte-level detokenization of transcript ids
///   - Log-mel feature extraction from raw PCM
///   - Voice catalog and style table lookups
///
/// Configuration is stored in ~/.parla/config.yaml.
#[derive(Parser)]
#[command(name = "parla")]
#[command(about = "Speech front-end CLI tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.parla/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<PathBuf>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// Expand numbers and abbreviations into words
    Normalize(NormalizeCommand),
    /// Convert text to phonemes with the pronunciation dictionary
    Phonemize(PhonemizeCommand),
    /// Map a phoneme string to synthesis token ids
    Tokenize(TokenizeCommand),
    /// Turn transcript token ids back into text
    Detokenize(DetokenizeCommand),
    /// Extract log-mel features from a raw PCM file
    Mel(MelCommand),
    /// Look up a style vector for a voice
    Style(StyleCommand),
    /// List built-in voices
    Voices(VoicesCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose || std::env::var_os("RUST_LOG").is_some() {
        let filter = if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::from_default_env()
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli),
        Commands::Normalize(cmd) => cmd.run(&cli),
        Commands::Phonemize(cmd) => cmd.run(&cli),
        Commands::Tokenize(cmd) => cmd.run(&cli),
        Commands::Detokenize(cmd) => cmd.run(&cli),
        Commands::Mel(cmd) => cmd.run(&cli),
        Commands::Style(cmd) => cmd.run(&cli),
        Commands::Voices(cmd) => cmd.run(&cli),
    }
}
