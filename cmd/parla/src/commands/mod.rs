//! CLI commands module.

mod audio;
mod config;
mod text;
mod tokens;
mod util;
mod voice;

pub use audio::MelCommand;
pub use config::ConfigCommand;
pub use text::{NormalizeCommand, PhonemizeCommand};
pub use tokens::{DetokenizeCommand, TokenizeCommand};
pub use voice::{StyleCommand, VoicesCommand};

pub(crate) use util::*;
