//! GPT-2 byte-level BPE decoding.
//!
//! Token strings in a byte-level vocabulary never contain raw control or
//! whitespace bytes: every byte is first mapped to a printable character.
//! Bytes 33-126, 161-172 and 174-255 map to themselves; the remaining 68 map
//! in order to U+0100 onward (so a space is `Ġ`, a newline `Ċ`).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::vocab::Vocabulary;
use crate::TOKEN_EOT;

struct ByteTables {
    byte_to_char: [char; 256],
    char_to_byte: HashMap<char, u8>,
}

static TABLES: Lazy<ByteTables> = Lazy::new(|| {
    let mut byte_to_char = ['\0'; 256];
    let mut shifted = 0u32;
    for b in 0..=255u8 {
        let printable = matches!(b, 33..=126 | 161..=172 | 174..=255);
        let cp = if printable {
            b as u32
        } else {
            shifted += 1;
            255 + shifted
        };
        byte_to_char[b as usize] = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
    }
    let char_to_byte = byte_to_char
        .iter()
        .enumerate()
        .map(|(b, &c)| (c, b as u8))
        .collect();
    ByteTables {
        byte_to_char,
        char_to_byte,
    }
});

/// The printable character standing in for `byte`.
pub fn byte_to_char(byte: u8) -> char {
    TABLES.byte_to_char[byte as usize]
}

/// The raw byte behind a byte-level character, if it is one.
pub fn char_to_byte(c: char) -> Option<u8> {
    TABLES.char_to_byte.get(&c).copied()
}

/// Maps raw bytes to their byte-level token string.
pub fn encode_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| byte_to_char(b)).collect()
}

/// Maps a byte-level token string back to raw bytes.
///
/// Characters outside the table contribute their own UTF-8 encoding.
pub fn decode_chars(token: &str, out: &mut Vec<u8>) {
    for c in token.chars() {
        match char_to_byte(c) {
            Some(b) => out.push(b),
            None => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
}

/// Whisper token id -> text decoder.
#[derive(Debug, Clone)]
pub struct ByteLevelDecoder {
    vocab: Vocabulary,
    eot: u32,
}

impl ByteLevelDecoder {
    pub fn new(vocab: Vocabulary) -> Self {
        Self {
            vocab,
            eot: TOKEN_EOT,
        }
    }

    /// Overrides the id at and above which tokens are treated as special.
    pub fn with_eot(mut self, eot: u32) -> Self {
        self.eot = eot;
        self
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// First special-token id.
    pub fn eot(&self) -> u32 {
        self.eot
    }

    /// Decodes token ids to text.
    ///
    /// Special ids (`>= eot`) and ids missing from the vocabulary are skipped.
    /// The byte stream is decoded as UTF-8 with invalid sequences replaced by
    /// U+FFFD.
    pub fn decode(&self, ids: &[u32]) -> String {
        let mut bytes = Vec::with_capacity(ids.len() * 4);
        for &id in ids {
            if id >= self.eot {
                continue;
            }
            if let Some(token) = self.vocab.token(id) {
                decode_chars(token, &mut bytes);
            }
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn decoder(tokens: &[(&str, u32)]) -> ByteLevelDecoder {
        let map: HashMap<String, u32> = tokens.iter().map(|&(t, id)| (t.to_string(), id)).collect();
        ByteLevelDecoder::new(Vocabulary::from_map(map).unwrap())
    }

    #[test]
    fn test_table_is_bijection() {
        let mut seen = std::collections::HashSet::new();
        for b in 0..=255u8 {
            let c = byte_to_char(b);
            assert!(seen.insert(c), "duplicate char for byte {}", b);
            assert_eq!(char_to_byte(c), Some(b));
        }
        assert_eq!(seen.len(), 256);
    }

    #[test]
    fn test_table_values() {
        assert_eq!(byte_to_char(b'!'), '!');
        assert_eq!(byte_to_char(b'~'), '~');
        assert_eq!(byte_to_char(0xA1), '\u{A1}');
        assert_eq!(byte_to_char(0xAE), '\u{AE}');
        // Shifted bytes, in order: 0 is the first, space the 33rd.
        assert_eq!(byte_to_char(0), '\u{100}');
        assert_eq!(byte_to_char(b' '), 'Ġ');
        assert_eq!(byte_to_char(b'\n'), 'Ċ');
        assert_eq!(byte_to_char(0xAD), '\u{143}');
    }

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(b" hello"), "Ġhello");
        assert_eq!(encode_bytes("é".as_bytes()), "Ã©");
    }

    #[test]
    fn test_decode_words() {
        let d = decoder(&[("Hello", 15496), ("Ġworld", 995), ("!", 0)]);
        assert_eq!(d.decode(&[15496, 995, 0]), "Hello world!");
    }

    #[test]
    fn test_decode_skips_special_and_unknown() {
        let d = decoder(&[("Hi", 17250), ("<|endoftext|>", 50256)]);
        assert_eq!(d.decode(&[50257, 50258, 17250, 12345, 50256, 50362]), "Hi");
        assert_eq!(d.decode(&[]), "");
    }

    #[test]
    fn test_decode_multibyte_across_tokens() {
        // "é" split over two tokens, one byte each.
        let e = encode_bytes("é".as_bytes());
        let (first, second): (String, String) = (e.chars().take(1).collect(), e.chars().skip(1).collect());
        let d = decoder(&[(first.as_str(), 10), (second.as_str(), 11), ("Ġcaf", 12)]);
        assert_eq!(d.decode(&[12, 10, 11]), " café");
    }

    #[test]
    fn test_decode_invalid_utf8_is_replaced() {
        let lone = encode_bytes(&[0xC3]);
        let d = decoder(&[(lone.as_str(), 5), ("a", 6)]);
        assert_eq!(d.decode(&[5, 6]), "\u{FFFD}a");
    }

    #[test]
    fn test_decode_unmapped_char_falls_back_to_utf8() {
        let d = decoder(&[("日本", 7)]);
        assert_eq!(d.decode(&[7]), "日本");
    }

    #[test]
    fn test_roundtrip_via_encode_bytes() {
        let text = "Hello, wörld!\n\tdone";
        let token = encode_bytes(text.as_bytes());
        let d = decoder(&[(token.as_str(), 42)]);
        assert_eq!(d.decode(&[42]), text);
    }

    #[test]
    fn test_with_eot() {
        let d = decoder(&[("x", 100)]).with_eot(100);
        assert_eq!(d.decode(&[100]), "");
    }
}
