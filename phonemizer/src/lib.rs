//! English text to IPA phonemes.
//!
//! - [`normalize()`]: numbers, ordinals and abbreviations to spoken words
//! - [`PronunciationDictionary`]: word -> phoneme lookup
//! - [`Phonemizer`]: dictionary lookup with an optional neural fallback
//!   ([`FallbackModel`]) whose output is decoded by [`ctc`]
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use parla_phonemizer::{Phonemizer, PronunciationDictionary};
//!
//! let dict = PronunciationDictionary::from_map(HashMap::from([
//!     ("hello".to_string(), "həlˈoʊ".to_string()),
//! ]));
//! let phonemizer = Phonemizer::new(Arc::new(dict));
//! assert_eq!(phonemizer.phonemize("Hello!").unwrap(), "həlˈoʊ!");
//! ```

pub mod ctc;
mod dictionary;
mod error;
pub mod g2p;
pub mod normalize;
pub mod numbers;
mod phonemizer;

pub use dictionary::{PronunciationDictionary, LOCALE_EN_US};
pub use error::PhonemizerError;
pub use normalize::{normalize, split_sentences};
pub use phonemizer::{segment, FallbackModel, Phonemizer};
