//! Phoneme string -> synthesis model token ids.
//!
//! Character-level vocabulary shared by the Kokoro and Kitten models. Slot 0
//! (`$`) is pad, unknown and sequence wrapper at once; unlisted slots are
//! unused by the model.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Pad / unknown id.
pub const PAD_ID: i64 = 0;

/// Id of `…`, which the Kitten model expects before the closing pad.
pub const END_MARKER_ID: i64 = 10;

/// Number of slots in the model's embedding table.
pub const VOCAB_SIZE: usize = 178;

const SYMBOLS: &[(char, i64)] = &[
    ('$', 0),
    (';', 1),
    (':', 2),
    (',', 3),
    ('.', 4),
    ('!', 5),
    ('?', 6),
    ('\u{2014}', 9),
    ('\u{2026}', 10),
    ('"', 11),
    ('(', 12),
    (')', 13),
    ('\u{201C}', 14),
    ('\u{201D}', 15),
    (' ', 16),
    ('\u{0303}', 17),
    ('ʣ', 18),
    ('ʥ', 19),
    ('ʦ', 20),
    ('ʨ', 21),
    ('ᵝ', 22),
    ('\u{AB67}', 23),
    ('A', 24),
    ('I', 25),
    ('O', 31),
    ('Q', 33),
    ('S', 35),
    ('T', 36),
    ('W', 39),
    ('Y', 41),
    ('ᵊ', 42),
    ('a', 43),
    ('b', 44),
    ('c', 45),
    ('d', 46),
    ('e', 47),
    ('f', 48),
    ('g', 49),
    ('h', 50),
    ('i', 51),
    ('j', 52),
    ('k', 53),
    ('l', 54),
    ('m', 55),
    ('n', 56),
    ('o', 57),
    ('p', 58),
    ('q', 59),
    ('r', 60),
    ('s', 61),
    ('t', 62),
    ('u', 63),
    ('v', 64),
    ('w', 65),
    ('x', 66),
    ('y', 67),
    ('z', 68),
    ('ɑ', 69),
    ('ɐ', 70),
    ('ɒ', 71),
    ('æ', 72),
    ('β', 75),
    ('ɔ', 76),
    ('ɕ', 77),
    ('ç', 78),
    ('ɖ', 80),
    ('ð', 81),
    ('ʤ', 82),
    ('ə', 83),
    ('ɚ', 85),
    ('ɛ', 86),
    ('ɜ', 87),
    ('ɟ', 90),
    ('ɡ', 92),
    ('ɥ', 99),
    ('ɨ', 101),
    ('ɪ', 102),
    ('ʝ', 103),
    ('ɰ', 111),
    ('ŋ', 112),
    ('ɳ', 113),
    ('ɲ', 114),
    ('ɴ', 115),
    ('ø', 116),
    ('ɸ', 118),
    ('θ', 119),
    ('œ', 120),
    ('ɹ', 123),
    ('ɾ', 125),
    ('ɻ', 126),
    ('ʁ', 128),
    ('ɽ', 129),
    ('ʂ', 130),
    ('ʃ', 131),
    ('ʈ', 132),
    ('ʧ', 133),
    ('ʊ', 135),
    ('ʋ', 136),
    ('ʌ', 138),
    ('ɣ', 139),
    ('ɤ', 140),
    ('χ', 142),
    ('ʎ', 143),
    ('ʒ', 147),
    ('ˈ', 156),
    ('ˌ', 157),
    ('ː', 158),
    ('ʰ', 162),
    ('ʲ', 164),
    ('↓', 169),
    ('→', 171),
    ('↗', 172),
    ('↘', 173),
    ('ᵻ', 177),
];

// U+1D3B is a look-alike some phoneme sources emit in place of ᵻ (U+1D7B).
const ALIASES: &[(char, i64)] = &[('\u{1D3B}', 177)];

static CHAR_TO_ID: Lazy<HashMap<char, i64>> =
    Lazy::new(|| SYMBOLS.iter().chain(ALIASES.iter()).copied().collect());

static ID_TO_CHAR: Lazy<HashMap<i64, char>> =
    Lazy::new(|| SYMBOLS.iter().map(|&(c, id)| (id, c)).collect());

/// How an encoded sequence is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Wrapping {
    /// `[0, ids.., 0]`.
    #[default]
    Pad,
    /// `[0, ids.., marker, 0]`.
    EndMarker(i64),
}

/// Id of a single phoneme character.
pub fn id_of(c: char) -> Option<i64> {
    CHAR_TO_ID.get(&c).copied()
}

/// Encodes a phoneme string. Unknown characters map to [`PAD_ID`].
pub fn encode(phonemes: &str, wrapping: Wrapping) -> Vec<i64> {
    let mut ids = Vec::with_capacity(phonemes.len() + 3);
    ids.push(PAD_ID);
    ids.extend(phonemes.chars().map(|c| id_of(c).unwrap_or(PAD_ID)));
    if let Wrapping::EndMarker(marker) = wrapping {
        ids.push(marker);
    }
    ids.push(PAD_ID);
    ids
}

/// Maps ids back to phoneme characters. Pad and unused ids are dropped.
pub fn decode(ids: &[i64]) -> String {
    ids.iter()
        .filter(|&&id| id != PAD_ID)
        .filter_map(|id| ID_TO_CHAR.get(id))
        .collect()
}

/// Number of phoneme symbols (Unicode scalar values) in `phonemes`.
pub fn phoneme_count(phonemes: &str) -> usize {
    phonemes.chars().count()
}
