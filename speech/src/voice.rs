//! Voice catalog and engine profiles.
//!
//! Voice ids follow `<lang>-<COUNTRY>-<name>-<engine>`, e.g.
//! `en-US-heart-kokoro` or `en-US-bella-kitten`. The engine is resolved once,
//! when a voice is picked; everything engine-specific after that comes from
//! its [`EngineProfile`].

use std::fmt;

use once_cell::sync::Lazy;
use parla_tokenizer::phoneme::{self, END_MARKER_ID};
use parla_tokenizer::Wrapping;
use serde::{Deserialize, Serialize};

/// Output sample rate of both synthesis engines.
pub const SYNTHESIS_SAMPLE_RATE: u32 = 24000;

/// Kokoro's phoneme length limit; style selection is capped one below it.
pub const KOKORO_MAX_PHONEMES: usize = 510;

/// Samples of trailing noise cut from every Kitten utterance.
pub const KITTEN_TAIL_TRIM: usize = 5000;

pub const DEFAULT_VOICE_ID: &str = "en-US-heart-kokoro";

/// Synthesis back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Kokoro,
    Kitten,
}

impl EngineKind {
    pub const ALL: [EngineKind; 2] = [EngineKind::Kokoro, EngineKind::Kitten];

    /// Engine named by a voice id's suffix; anything not `-kitten` is Kokoro.
    pub fn from_voice_id(id: &str) -> Self {
        if id.ends_with("-kitten") {
            EngineKind::Kitten
        } else {
            EngineKind::Kokoro
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Kokoro => "kokoro",
            EngineKind::Kitten => "kitten",
        }
    }

    pub fn profile(self) -> &'static EngineProfile {
        &PROFILES[self as usize]
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the style row is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSelector {
    /// Token count without the two wrapping pads.
    TokenCount,
    /// Number of phoneme symbols.
    PhonemeCount,
}

/// Engine-specific knobs of the synthesis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    pub kind: EngineKind,
    pub wrapping: Wrapping,
    pub selector: StyleSelector,
    /// Upper bound applied to the selector before the table clamps it.
    pub selector_cap: Option<usize>,
    pub tail_trim: usize,
    pub sample_rate: u32,
}

static PROFILES: [EngineProfile; 2] = [
    EngineProfile {
        kind: EngineKind::Kokoro,
        wrapping: Wrapping::Pad,
        selector: StyleSelector::TokenCount,
        selector_cap: Some(KOKORO_MAX_PHONEMES - 1),
        tail_trim: 0,
        sample_rate: SYNTHESIS_SAMPLE_RATE,
    },
    EngineProfile {
        kind: EngineKind::Kitten,
        wrapping: Wrapping::EndMarker(END_MARKER_ID),
        selector: StyleSelector::PhonemeCount,
        selector_cap: None,
        tail_trim: KITTEN_TAIL_TRIM,
        sample_rate: SYNTHESIS_SAMPLE_RATE,
    },
];

impl EngineProfile {
    /// Style selector length for an utterance.
    ///
    /// `tokens` is the wrapped sequence produced with this profile.
    pub fn style_length(&self, phonemes: &str, tokens: &[i64]) -> usize {
        let length = match self.selector {
            StyleSelector::TokenCount => tokens.len().saturating_sub(2),
            StyleSelector::PhonemeCount => phoneme::phoneme_count(phonemes),
        };
        match self.selector_cap {
            Some(cap) => length.min(cap),
            None => length,
        }
    }

    /// Drops the engine's trailing artefact samples. Short clips are kept.
    pub fn trim_tail(&self, samples: &mut Vec<f32>) {
        if samples.len() > self.tail_trim {
            samples.truncate(samples.len() - self.tail_trim);
        }
    }
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    /// BCP-47 style `lang-COUNTRY`.
    pub locale: String,
    pub engine: EngineKind,
}

impl Voice {
    /// Builds a voice from its id, parsing locale and engine.
    pub fn from_id(id: &str) -> Self {
        let mut parts = id.splitn(3, '-');
        let locale = match (parts.next(), parts.next()) {
            (Some(lang), Some(country))
                if lang.len() == 2
                    && lang.chars().all(|c| c.is_ascii_lowercase())
                    && country.len() == 2
                    && country.chars().all(|c| c.is_ascii_uppercase()) =>
            {
                format!("{}-{}", lang, country)
            }
            _ => String::new(),
        };
        Self {
            id: id.to_string(),
            locale,
            engine: EngineKind::from_voice_id(id),
        }
    }

    pub fn language(&self) -> &str {
        self.locale.split('-').next().unwrap_or("")
    }

    pub fn country(&self) -> &str {
        self.locale.split('-').nth(1).unwrap_or("")
    }

    /// Speaker name: the id without locale and engine.
    pub fn name(&self) -> &str {
        let rest = if self.locale.is_empty() {
            self.id.as_str()
        } else {
            self.id
                .strip_prefix(self.locale.as_str())
                .and_then(|s| s.strip_prefix('-'))
                .unwrap_or(&self.id)
        };
        rest.strip_suffix(&format!("-{}", self.engine.as_str()))
            .unwrap_or(rest)
    }

    pub fn profile(&self) -> &'static EngineProfile {
        self.engine.profile()
    }
}

const KOKORO_VOICES: &[(&str, &[&str])] = &[
    (
        "en-US",
        &[
            "alloy", "aoede", "bella", "heart", "jessica", "kore", "nicole", "nova", "river",
            "sarah", "sky", "adam", "echo", "eric", "fenrir", "liam", "michael", "onyx", "puck",
            "santa",
        ],
    ),
    (
        "en-GB",
        &["alice", "emma", "isabella", "lily", "daniel", "fable", "george", "lewis"],
    ),
    ("de-DE", &["dora", "alex", "santa"]),
    ("fr-FR", &["siwis"]),
    ("el-GR", &["alpha-f", "beta-f", "omega-m", "psi-m"]),
    ("it-IT", &["sara", "nicola"]),
    ("ja-JP", &["alpha-f", "gongitsune", "nezumi", "tebukuro", "kumo"]),
    ("pt-BR", &["dora", "alex", "santa"]),
    (
        "zh-CN",
        &[
            "xiaobei", "xiaoni", "xiaoxiao", "xiaoyi", "yunjian", "yunxi", "yunxia", "yunyang",
        ],
    ),
];

const KITTEN_VOICES: &[&str] = &[
    "bella", "jasper", "luna", "bruno", "rosie", "hugo", "kiki", "leo",
];

static CATALOG: Lazy<Vec<Voice>> = Lazy::new(|| {
    let kokoro = KOKORO_VOICES.iter().flat_map(|(locale, names)| {
        names.iter().map(move |name| Voice {
            id: format!("{}-{}-kokoro", locale, name),
            locale: locale.to_string(),
            engine: EngineKind::Kokoro,
        })
    });
    let kitten = KITTEN_VOICES.iter().map(|name| Voice {
        id: format!("en-US-{}-kitten", name),
        locale: "en-US".to_string(),
        engine: EngineKind::Kitten,
    });
    kokoro.chain(kitten).collect()
});

/// All built-in voices, Kokoro first.
pub fn catalog() -> &'static [Voice] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static Voice> {
    CATALOG.iter().find(|v| v.id == id)
}

pub fn default_voice() -> &'static Voice {
    // The default id is part of the catalog.
    find(DEFAULT_VOICE_ID).unwrap_or(&CATALOG[0])
}

/// Catalog entry for `id`, or a voice parsed from the id itself.
pub fn resolve(id: &str) -> Voice {
    find(id).cloned().unwrap_or_else(|| Voice::from_id(id))
}

// Three-letter (ISO 639-2 / 3166 alpha-3) codes for the catalog's locales.
const LANGUAGE_ALIASES: &[(&str, &[&str])] = &[
    ("en", &["eng"]),
    ("de", &["deu", "ger"]),
    ("fr", &["fra", "fre"]),
    ("el", &["ell", "gre"]),
    ("it", &["ita"]),
    ("ja", &["jpn"]),
    ("pt", &["por"]),
    ("zh", &["zho", "chi"]),
];

const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("US", "USA"),
    ("GB", "GBR"),
    ("DE", "DEU"),
    ("FR", "FRA"),
    ("GR", "GRC"),
    ("IT", "ITA"),
    ("JP", "JPN"),
    ("BR", "BRA"),
    ("CN", "CHN"),
];

fn language_matches(voice: &Voice, lang: &str) -> bool {
    let code = voice.language();
    code.eq_ignore_ascii_case(lang)
        || LANGUAGE_ALIASES
            .iter()
            .any(|(two, three)| *two == code && three.iter().any(|t| t.eq_ignore_ascii_case(lang)))
}

fn country_matches(voice: &Voice, country: &str) -> bool {
    let code = voice.country();
    code.eq_ignore_ascii_case(country)
        || COUNTRY_ALIASES
            .iter()
            .any(|(two, three)| *two == code && three.eq_ignore_ascii_case(country))
}

/// Voices for a language, optionally narrowed to a country.
///
/// Accepts two- or three-letter codes, case-insensitively.
pub fn by_locale(lang: &str, country: Option<&str>) -> Vec<&'static Voice> {
    CATALOG
        .iter()
        .filter(|v| language_matches(v, lang))
        .filter(|v| country.is_none_or(|c| c.is_empty() || country_matches(v, c)))
        .collect()
}

/// Preferred voice for a locale: exact language and country, then language
/// only, then the default voice.
pub fn best_for(lang: &str, country: &str) -> &'static Voice {
    let exact = (!country.is_empty())
        .then(|| {
            CATALOG
                .iter()
                .find(|v| language_matches(v, lang) && country_matches(v, country))
        })
        .flatten();
    exact
        .or_else(|| CATALOG.iter().find(|v| language_matches(v, lang)))
        .unwrap_or_else(default_voice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        assert_eq!(catalog().len(), 54 + 8);
        assert!(find("en-US-heart-kokoro").is_some());
        assert!(find("el-GR-omega-m-kokoro").is_some());
        assert!(find("en-US-leo-kitten").is_some());
        assert!(find("en-US-heart").is_none());

        let mut ids: Vec<&str> = catalog().iter().map(|v| v.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog().len(), "duplicate voice id");
    }

    #[test]
    fn test_default_voice() {
        let v = default_voice();
        assert_eq!(v.id, DEFAULT_VOICE_ID);
        assert_eq!(v.engine, EngineKind::Kokoro);
        assert_eq!(v.locale, "en-US");
    }

    #[test]
    fn test_engine_from_voice_id() {
        assert_eq!(EngineKind::from_voice_id("en-US-bella-kitten"), EngineKind::Kitten);
        assert_eq!(EngineKind::from_voice_id("en-US-bella-kokoro"), EngineKind::Kokoro);
        assert_eq!(EngineKind::from_voice_id("custom"), EngineKind::Kokoro);
    }

    #[test]
    fn test_profiles() {
        let kokoro = EngineKind::Kokoro.profile();
        assert_eq!(kokoro.kind, EngineKind::Kokoro);
        assert_eq!(kokoro.wrapping, Wrapping::Pad);
        assert_eq!(kokoro.tail_trim, 0);
        assert_eq!(kokoro.sample_rate, 24000);

        let kitten = EngineKind::Kitten.profile();
        assert_eq!(kitten.kind, EngineKind::Kitten);
        assert_eq!(kitten.wrapping, Wrapping::EndMarker(10));
        assert_eq!(kitten.tail_trim, 5000);
    }

    #[test]
    fn test_style_length() {
        let kokoro = EngineKind::Kokoro.profile();
        assert_eq!(kokoro.style_length("", &[0, 0]), 0);
        assert_eq!(kokoro.style_length("abc", &[0, 43, 44, 45, 0]), 3);
        let long = vec![16i64; 700];
        assert_eq!(kokoro.style_length("", &long), 509);

        let kitten = EngineKind::Kitten.profile();
        // Phoneme count, not token count.
        assert_eq!(kitten.style_length("hɛˈloʊ", &[0, 1, 2, 3, 4, 5, 6, 10, 0]), 6);
        assert_eq!(kitten.style_length(&"a".repeat(700), &[]), 700);
    }

    #[test]
    fn test_trim_tail() {
        let kitten = EngineKind::Kitten.profile();
        let mut long = vec![0.1f32; 12000];
        kitten.trim_tail(&mut long);
        assert_eq!(long.len(), 7000);

        let mut short = vec![0.1f32; 5000];
        kitten.trim_tail(&mut short);
        assert_eq!(short.len(), 5000);

        let mut kokoro = vec![0.1f32; 100];
        EngineKind::Kokoro.profile().trim_tail(&mut kokoro);
        assert_eq!(kokoro.len(), 100);
    }

    #[test]
    fn test_voice_parts() {
        let v = find("el-GR-alpha-f-kokoro").unwrap();
        assert_eq!(v.language(), "el");
        assert_eq!(v.country(), "GR");
        assert_eq!(v.name(), "alpha-f");

        let custom = resolve("en-AU-matilda-kitten");
        assert_eq!(custom.locale, "en-AU");
        assert_eq!(custom.engine, EngineKind::Kitten);
        assert_eq!(custom.name(), "matilda");

        let bare = resolve("narrator");
        assert_eq!(bare.locale, "");
        assert_eq!(bare.engine, EngineKind::Kokoro);
        assert_eq!(bare.name(), "narrator");
    }

    #[test]
    fn test_by_locale() {
        assert_eq!(by_locale("en", Some("GB")).len(), 8);
        assert_eq!(by_locale("eng", Some("gbr")).len(), 8);
        assert_eq!(by_locale("en", None).len(), 20 + 8 + 8);
        assert_eq!(by_locale("pt", Some("")).len(), 3);
        assert!(by_locale("ko", None).is_empty());
    }

    #[test]
    fn test_best_for() {
        assert_eq!(best_for("en", "GB").id, "en-GB-alice-kokoro");
        assert_eq!(best_for("deu", "").id, "de-DE-dora-kokoro");
        assert_eq!(best_for("en", "AU").id, "en-US-alloy-kokoro");
        assert_eq!(best_for("ko", "KR").id, DEFAULT_VOICE_ID);
    }
}
