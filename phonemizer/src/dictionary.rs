use std::collections::HashMap;

use serde::de::Error as _;
use serde_json::Value;
use tracing::debug;

use crate::error::PhonemizerError;

/// Locale key used by the multi-locale dictionary layout.
pub const LOCALE_EN_US: &str = "en_us";

/// Lowercase word -> IPA phoneme string.
#[derive(Debug, Clone, Default)]
pub struct PronunciationDictionary {
    words: HashMap<String, String>,
}

impl PronunciationDictionary {
    /// Parses either `{"en_us": {word: ipa}}` or a flat `{word: ipa}` object.
    ///
    /// In the nested layout other locales are ignored. Keys are lowercased;
    /// entries whose value is not a string are skipped.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PhonemizerError> {
        let root: Value = serde_json::from_slice(bytes)?;
        let Value::Object(mut root) = root else {
            return Err(PhonemizerError::InvalidDictionary(serde_json::Error::custom(
                "expected a JSON object",
            )));
        };

        let entries = match root.remove(LOCALE_EN_US) {
            Some(Value::Object(nested)) => nested,
            Some(other) => {
                // A flat dictionary that happens to contain the word "en_us".
                root.insert(LOCALE_EN_US.to_string(), other);
                root
            }
            None => root,
        };

        let words: HashMap<String, String> = entries
            .into_iter()
            .filter_map(|(word, ipa)| match ipa {
                Value::String(ipa) => Some((word.to_lowercase(), ipa)),
                _ => None,
            })
            .collect();
        if words.is_empty() {
            return Err(PhonemizerError::EmptyDictionary);
        }
        debug!(words = words.len(), "phonemizer: dictionary loaded");
        Ok(Self { words })
    }

    pub fn from_map(words: HashMap<String, String>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|(w, ipa)| (w.to_lowercase(), ipa))
                .collect(),
        }
    }

    /// Looks up an already-lowercased word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
