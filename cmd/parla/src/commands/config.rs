//! Configuration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use super::{get_config, output};
use crate::Cli;

/// Manage CLI configuration.
///
/// Configuration is stored in ~/.parla/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Show the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
    /// Print the config file path
    Path,
}

#[derive(Serialize)]
struct Shown<'a> {
    path: String,
    exists: bool,
    #[serde(flatten)]
    config: &'a parla_cli::Config,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        match &self.command {
            ConfigSubcommand::Show => output(
                &Shown {
                    path: cfg.path().display().to_string(),
                    exists: cfg.path().exists(),
                    config: &cfg,
                },
                cli,
            ),
            ConfigSubcommand::Init => {
                cfg.save()?;
                eprintln!("Wrote {}", cfg.path().display());
                Ok(())
            }
            ConfigSubcommand::Path => {
                println!("{}", cfg.path().display());
                Ok(())
            }
        }
    }
}
