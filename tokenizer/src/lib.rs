//! Token <-> text conversions for the speech pipelines.
//!
//! - [`Vocabulary`] and [`ByteLevelDecoder`]: Whisper (GPT-2 byte-level BPE)
//!   token ids back to text
//! - [`phoneme`]: IPA phoneme strings to synthesis-model token ids
//!
//! # Example
//!
//! ```rust
//! use parla_tokenizer::{phoneme, ByteLevelDecoder, Vocabulary, Wrapping};
//!
//! let json = r#"{"Hello": 15496, "Ġworld": 995}"#;
//! let vocab = Vocabulary::from_json(json.as_bytes()).unwrap();
//! let decoder = ByteLevelDecoder::new(vocab);
//! assert_eq!(decoder.decode(&[15496, 995, 50256]), "Hello world");
//!
//! let ids = phoneme::encode("hə", Wrapping::Pad);
//! assert_eq!(ids, vec![0, 50, 83, 0]);
//! ```

pub mod bytelevel;
mod error;
pub mod phoneme;
mod vocab;

pub use bytelevel::ByteLevelDecoder;
pub use error::TokenizerError;
pub use phoneme::Wrapping;
pub use vocab::Vocabulary;

/// `<|endoftext|>`. Every id at or above it is a special token.
pub const TOKEN_EOT: u32 = 50256;
