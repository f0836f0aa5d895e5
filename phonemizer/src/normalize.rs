//! Text normalization ahead of phonemization.
//!
//! Passes run in a fixed order: dotted abbreviations, ordinals, plain
//! numbers, then single-word abbreviations. The regex crate has no
//! look-around, so the "not followed by" checks are done by hand on the
//! character after each match.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::numbers;

static EG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\be\.g\.?").unwrap());
static IE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bi\.e\.?").unwrap());
static ETC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\betc\.?").unwrap());
static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([0-9]+(?:,[0-9]+)*)(st|nd|rd|th)\b").unwrap());
// Integers with thousands separators, optional fraction and minus sign.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]+(?:,[0-9]+)*(?:\.([0-9]+))?").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Za-z]+)\.?").unwrap());
static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?](?:\s+|$)").unwrap());

static ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mrs", "misess"),
        ("mr", "mister"),
        ("dr", "doctor"),
        ("st", "saint"),
        ("co", "company"),
        ("jr", "junior"),
        ("maj", "major"),
        ("gen", "general"),
        ("drs", "doctors"),
        ("rev", "reverend"),
        ("lt", "lieutenant"),
        ("hon", "honorable"),
        ("sgt", "sergeant"),
        ("capt", "captain"),
        ("esq", "esquire"),
        ("ltd", "limited"),
        ("col", "colonel"),
        ("ft", "foot"),
        ("pty", "proprietary"),
        ("vs", "versus"),
        ("approx", "approximately"),
        ("dept", "department"),
        ("prof", "professor"),
        ("etc", "et cetera"),
        ("eg", "for example"),
        ("ie", "that is"),
    ])
});

/// Expansion of a single-word abbreviation (case-insensitive), if known.
pub fn abbreviation(word: &str) -> Option<&'static str> {
    ABBREVIATIONS.get(word.to_lowercase().as_str()).copied()
}

/// Rewrites numbers and abbreviations as spoken English words.
///
/// ```
/// use parla_phonemizer::normalize;
///
/// assert_eq!(normalize("Dr. Smith arrived."), "doctor Smith arrived.");
/// assert_eq!(normalize("21st"), "twenty first");
/// ```
pub fn normalize(text: &str) -> String {
    let text = EG_RE.replace_all(text, "for example");
    let text = IE_RE.replace_all(&text, "that is");
    let text = ETC_RE.replace_all(&text, "et cetera");
    let text = expand_ordinals(&text);
    let text = expand_numbers(&text);
    expand_abbreviations(&text)
}

fn expand_ordinals(text: &str) -> String {
    ORDINAL_RE
        .replace_all(text, |caps: &Captures| {
            let raw = caps[1].replace(',', "");
            match raw.parse::<i64>() {
                Ok(n) => numbers::ordinal(n),
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn expand_numbers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in NUMBER_RE.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        // "10am", "3D": a number glued to a letter is left alone.
        if next_char(text, m.end()).is_some_and(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        let raw = m.as_str().replace(',', "");
        let words = match caps.get(1) {
            Some(frac) => {
                let int_part = &raw[..raw.len() - frac.as_str().len() - 1];
                numbers::decimal(int_part, frac.as_str())
            }
            None => raw.parse::<i64>().ok().map(numbers::cardinal),
        };
        if let Some(words) = words {
            out.push_str(&text[last..m.start()]);
            out.push_str(&words);
            last = m.end();
        }
    }
    out.push_str(&text[last..]);
    out
}

fn expand_abbreviations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in WORD_RE.captures_iter(text) {
        let (Some(m), Some(word)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let boundary = match next_char(text, m.end()) {
            None => true,
            Some(c) => c.is_whitespace() || matches!(c, ',' | ';' | ':' | '!' | '?'),
        };
        if !boundary {
            continue;
        }
        if let Some(expansion) = abbreviation(word.as_str()) {
            out.push_str(&text[last..m.start()]);
            out.push_str(expansion);
            last = m.end();
        }
    }
    out.push_str(&text[last..]);
    out
}

fn next_char(text: &str, at: usize) -> Option<char> {
    text[at..].chars().next()
}

/// Splits text after `.`, `!` or `?` followed by whitespace or the end.
///
/// Sentences keep their closing punctuation, are trimmed, and empty pieces
/// are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in SENTENCE_END_RE.find_iter(text) {
        // Keep the punctuation mark, drop the whitespace after it.
        push_sentence(&mut out, &text[last..m.start() + 1]);
        last = m.end();
    }
    push_sentence(&mut out, &text[last..]);
    out
}

fn push_sentence(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_literals() {
        assert_eq!(normalize("Dr. Smith arrived."), "doctor Smith arrived.");
        assert_eq!(normalize("3.14"), "three point one four");
        assert_eq!(normalize("21st"), "twenty first");
        assert_eq!(normalize("1,234"), "one thousand two hundred and thirty four");
        assert_eq!(normalize("e.g. apples"), "for example apples");
    }

    #[test]
    fn test_dotted_abbreviations() {
        assert_eq!(normalize("I.E. this"), "that is this");
        assert_eq!(normalize("eggs, milk, etc."), "eggs, milk, et cetera");
        assert_eq!(normalize("e.g apples"), "for example apples");
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(normalize("the 3rd time"), "the third time");
        assert_eq!(normalize("2ND place"), "second place");
        assert_eq!(normalize("0th"), "zeroth");
        assert_eq!(normalize("100th"), "one hundredth");
        assert_eq!(normalize("1,001st"), "one thousand first");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(normalize("0"), "zero");
        assert_eq!(normalize("-42 degrees"), "minus forty two degrees");
        assert_eq!(normalize("-2.5"), "minus two point five");
        assert_eq!(normalize("room 101, floor 7"), "room one hundred and one, floor seven");
        assert_eq!(normalize("It costs 3.50."), "It costs three point five zero.");
    }

    #[test]
    fn test_number_glued_to_letter_is_untouched() {
        assert_eq!(normalize("meet at 10am"), "meet at 10am");
        assert_eq!(normalize("a 3D print"), "a 3D print");
    }

    #[test]
    fn test_only_ascii_digits_are_numbers() {
        assert_eq!(normalize("3.\u{665}"), "three.\u{665}");
        assert_eq!(normalize("\u{663}rd"), "\u{663}rd");
        assert_eq!(normalize("\u{663}\u{664}"), "\u{663}\u{664}");
    }

    #[test]
    fn test_overflowing_number_is_untouched() {
        let huge = "123456789012345678901234567890";
        assert_eq!(normalize(huge), huge);
    }

    #[test]
    fn test_word_abbreviations() {
        assert_eq!(normalize("Mr. and Mrs. Jones"), "mister and misess Jones");
        assert_eq!(normalize("St Mary, Ltd"), "saint Mary, limited");
        assert_eq!(normalize("5 ft tall"), "five foot tall");
        assert_eq!(normalize("cats vs. dogs"), "cats versus dogs");
        assert_eq!(normalize("ask Prof."), "ask professor");
    }

    #[test]
    fn test_abbreviation_needs_boundary() {
        // Followed by a period then a letter, or by a hyphen: no match.
        assert_eq!(normalize("Dr.Who"), "Dr.Who");
        assert_eq!(normalize("co-op"), "co-op");
        // Inside a longer word.
        assert_eq!(normalize("doctors"), "doctors");
    }

    #[test]
    fn test_no_op_text() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("Hello, world!"), "Hello, world!");
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("Hello world. How are you? Fine!"),
            vec!["Hello world.", "How are you?", "Fine!"]
        );
        assert_eq!(split_sentences("No punctuation"), vec!["No punctuation"]);
        assert_eq!(split_sentences("Pi is 3.14 today."), vec!["Pi is 3.14 today."]);
        assert_eq!(split_sentences("Wait...  what?\n"), vec!["Wait...", "what?"]);
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("").is_empty());
    }
}
