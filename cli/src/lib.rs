//! Command-line support for parla.
//!
//! This crate provides the YAML configuration and output formatting shared
//! by the `parla` binary.

pub mod config;
pub mod output;

pub use config::{load_config, Assets, Config};
pub use output::{Output, OutputFormat};
