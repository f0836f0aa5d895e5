use std::collections::HashMap;

use tracing::debug;

use crate::error::TokenizerError;

/// Immutable bidirectional token <-> id map, loaded from a `vocab.json`
/// style `{"token": id}` object.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    token_to_id: HashMap<String, u32>,
    id_to_token: HashMap<u32, String>,
}

impl Vocabulary {
    /// Parses a `{"token": id}` JSON object.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TokenizerError> {
        let map: HashMap<String, u32> = serde_json::from_slice(bytes)?;
        if map.is_empty() {
            return Err(TokenizerError::EmptyVocab);
        }
        let vocab = Self::from_map(map)?;
        debug!(tokens = vocab.len(), "tokenizer: vocabulary loaded");
        Ok(vocab)
    }

    /// Builds a vocabulary from an in-memory map.
    pub fn from_map(token_to_id: HashMap<String, u32>) -> Result<Self, TokenizerError> {
        let mut id_to_token = HashMap::with_capacity(token_to_id.len());
        for (token, &id) in &token_to_id {
            if let Some(other) = id_to_token.insert(id, token.clone()) {
                return Err(TokenizerError::DuplicateId {
                    id,
                    token: token.clone(),
                    other,
                });
            }
        }
        Ok(Self {
            token_to_id,
            id_to_token,
        })
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(&id).map(String::as_str)
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"{"a": 64, "Ġthe": 262, "<|endoftext|>": 50256}"#;
        let vocab = Vocabulary::from_json(json.as_bytes()).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.token(262), Some("Ġthe"));
        assert_eq!(vocab.id("a"), Some(64));
        assert_eq!(vocab.token(1), None);
        assert_eq!(vocab.id("missing"), None);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Vocabulary::from_json(b"{not json"),
            Err(TokenizerError::InvalidVocab(_))
        ));
        assert!(matches!(
            Vocabulary::from_json(br#"{"a": "b"}"#),
            Err(TokenizerError::InvalidVocab(_))
        ));
        assert!(matches!(
            Vocabulary::from_json(b"{}"),
            Err(TokenizerError::EmptyVocab)
        ));
    }

    #[test]
    fn test_duplicate_id() {
        assert!(matches!(
            Vocabulary::from_json(br#"{"a": 1, "b": 1}"#),
            Err(TokenizerError::DuplicateId { id: 1, .. })
        ));
    }
}
