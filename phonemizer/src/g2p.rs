//! Input encoding and output symbols of the neural grapheme-to-phoneme model.
//!
//! The model reads a fixed 64-slot id sequence: a language tag, every
//! character repeated three times, an end tag, then zero padding. It emits
//! 64 positions of logits over [`PHONEME_SYMBOLS`], decoded with CTC.

/// Fixed input and output length of the model.
pub const SEQ_LEN: usize = 64;

/// Blank / pad id, shared by input and output tables.
pub const BLANK_ID: usize = 0;

/// `<en_us>` language tag.
pub const LANG_ID: usize = 1;

/// `<end>` tag.
pub const END_ID: usize = 2;

/// How many times each input character is repeated.
pub const CHAR_REPEATS: usize = 3;

/// Output vocabulary, indexed by id.
pub const PHONEME_SYMBOLS: [&str; 64] = [
    "_", "<en_us>", "<end>", "a", "b", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n",
    "o", "p", "r", "s", "t", "u", "v", "w", "x", "y", "z", "æ", "ç", "ð", "ø", "ŋ", "œ", "ɐ",
    "ɑ", "ɔ", "ə", "ɛ", "ɜ", "ɝ", "ɹ", "ɚ", "ɡ", "ɪ", "ʁ", "ʃ", "ʊ", "ʌ", "ʏ", "ʒ", "ʔ", "ˈ",
    "ˌ", "ː", "\u{0303}", "\u{030D}", "\u{0325}", "\u{0329}", "\u{032F}", "\u{0361}", "θ",
    "'", "ɾ", "ᵻ",
];

/// Input id of a character: `_` is 0, `a`-`z` are 3-28, `A`-`Z` are 29-54.
pub fn text_symbol(c: char) -> Option<usize> {
    match c {
        '_' => Some(BLANK_ID),
        'a'..='z' => Some(3 + (c as usize - 'a' as usize)),
        'A'..='Z' => Some(29 + (c as usize - 'A' as usize)),
        _ => None,
    }
}

/// Output symbol of an id, if the id is in range.
pub fn phoneme_symbol(id: usize) -> Option<&'static str> {
    PHONEME_SYMBOLS.get(id).copied()
}

/// Encodes a word as model input.
///
/// The word is lowercased, spaces become `_` and the result is trimmed.
/// Characters outside the input table are dropped. Long words are truncated
/// to [`SEQ_LEN`] ids, which may cut off the end tag.
pub fn encode_word(word: &str) -> [i64; SEQ_LEN] {
    let cleaned = word.to_lowercase().replace(' ', "_");
    let cleaned = cleaned.trim();

    let mut ids = Vec::with_capacity(cleaned.len() * CHAR_REPEATS + 2);
    ids.push(LANG_ID);
    for c in cleaned.chars() {
        if let Some(id) = text_symbol(c) {
            ids.extend(std::iter::repeat_n(id, CHAR_REPEATS));
        }
    }
    ids.push(END_ID);

    let mut out = [BLANK_ID as i64; SEQ_LEN];
    for (slot, &id) in out.iter_mut().zip(ids.iter()) {
        *slot = id as i64;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_symbols() {
        assert_eq!(text_symbol('_'), Some(0));
        assert_eq!(text_symbol('a'), Some(3));
        assert_eq!(text_symbol('z'), Some(28));
        assert_eq!(text_symbol('A'), Some(29));
        assert_eq!(text_symbol('Z'), Some(54));
        assert_eq!(text_symbol('\''), None);
        assert_eq!(text_symbol('é'), None);
    }

    #[test]
    fn test_phoneme_symbols() {
        assert_eq!(phoneme_symbol(0), Some("_"));
        assert_eq!(phoneme_symbol(5), Some("d"));
        assert_eq!(phoneme_symbol(36), Some("ə"));
        assert_eq!(phoneme_symbol(53), Some("ː"));
        assert_eq!(phoneme_symbol(60), Some("θ"));
        assert_eq!(phoneme_symbol(63), Some("ᵻ"));
        assert_eq!(phoneme_symbol(64), None);
    }

    #[test]
    fn test_encode_word() {
        let ids = encode_word("Hi");
        assert_eq!(&ids[..8], &[1, 10, 10, 10, 11, 11, 11, 2]);
        assert!(ids[8..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_encode_word_drops_unknown_chars() {
        let ids = encode_word("don't");
        // d o n t, apostrophe dropped.
        assert_eq!(&ids[..14], &[1, 6, 6, 6, 17, 17, 17, 16, 16, 16, 22, 22, 22, 2]);
    }

    #[test]
    fn test_encode_word_truncates() {
        let ids = encode_word(&"a".repeat(30));
        assert_eq!(ids.len(), SEQ_LEN);
        assert_eq!(ids[0], 1);
        assert!(ids[1..].iter().all(|&v| v == 3));
    }

    #[test]
    fn test_encode_empty_word() {
        let ids = encode_word("");
        assert_eq!(&ids[..3], &[1, 2, 0]);
    }
}
