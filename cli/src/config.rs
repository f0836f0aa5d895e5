//! Configuration for the parla command line.
//!
//! Configuration is stored in ~/.parla/config.yaml. A missing file means
//! defaults; relative asset paths resolve against the config directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use parla_audio::resampler::ResampleQuality;
use parla_phonemizer::PronunciationDictionary;
use parla_speech::{voice, DecoderConfig, StyleDir, Voice, DEFAULT_VOICE_ID};
use parla_tokenizer::{ByteLevelDecoder, Vocabulary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".parla";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assets: Assets,

    /// Special tokens and limits of the transcription decoder.
    #[serde(default)]
    pub decoder: DecoderConfig,

    /// Voice used when none is given.
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Converter used to bring audio to 16 kHz.
    #[serde(default)]
    pub resample: ResampleQuality,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

/// Locations of the static assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    /// Byte-level BPE vocabulary JSON (token -> id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocab: Option<PathBuf>,

    /// Pronunciation dictionary JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,

    /// Directory of per-voice `<id>.bin` style tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voices_dir: Option<PathBuf>,
}

fn default_voice() -> String {
    DEFAULT_VOICE_ID.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets: Assets::default(),
            decoder: DecoderConfig::default(),
            default_voice: default_voice(),
            resample: ResampleQuality::default(),
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Gets the default config directory.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
    }

    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the config directory path.
    pub fn dir(&self) -> Option<&Path> {
        self.config_path.parent()
    }

    /// Saves the configuration to its file, creating the directory.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.dir() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)
            .with_context(|| format!("write {}", self.config_path.display()))?;
        Ok(())
    }

    /// Resolves an asset path; relative paths are taken from the config
    /// directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match self.dir() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Loads the detokenizer vocabulary named by `assets.vocab`.
    pub fn load_detokenizer(&self) -> anyhow::Result<ByteLevelDecoder> {
        let path = self.asset(self.assets.vocab.as_deref(), "assets.vocab")?;
        let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let vocab = Vocabulary::from_json(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        debug!(path = %path.display(), tokens = vocab.len(), "config: vocabulary loaded");
        Ok(ByteLevelDecoder::new(vocab).with_eot(self.decoder.eot))
    }

    /// Loads the pronunciation dictionary named by `assets.dictionary`.
    pub fn load_dictionary(&self) -> anyhow::Result<Arc<PronunciationDictionary>> {
        let path = self.asset(self.assets.dictionary.as_deref(), "assets.dictionary")?;
        let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let dict = PronunciationDictionary::from_json(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        debug!(path = %path.display(), words = dict.len(), "config: dictionary loaded");
        Ok(Arc::new(dict))
    }

    /// Voice `id`, or the configured default voice when none is given.
    pub fn voice(&self, id: Option<&str>) -> Voice {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => voice::resolve(id),
            None if self.default_voice.is_empty() => voice::default_voice().clone(),
            None => voice::resolve(&self.default_voice),
        }
    }

    /// Style tables under `assets.voices_dir`.
    pub fn style_dir(&self) -> anyhow::Result<StyleDir> {
        let path = self.asset(self.assets.voices_dir.as_deref(), "assets.voices_dir")?;
        Ok(StyleDir::new(path))
    }

    fn asset(&self, path: Option<&Path>, key: &str) -> anyhow::Result<PathBuf> {
        let path = path.ok_or_else(|| anyhow::anyhow!("{} is not configured", key))?;
        Ok(self.resolve(path))
    }
}

/// Loads configuration from `custom_path`, or the default location.
///
/// A missing file yields the defaults; it is not created.
pub fn load_config(custom_path: Option<&Path>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => p.to_path_buf(),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("read {}", config_path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("parse {}", config_path.display()))?
    } else {
        debug!(path = %config_path.display(), "config: no file, using defaults");
        Config::default()
    };

    cfg.config_path = config_path;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.default_voice, DEFAULT_VOICE_ID);
        assert_eq!(cfg.decoder, DecoderConfig::default());
        assert_eq!(cfg.resample, ResampleQuality::Linear);
        assert_eq!(cfg.path(), path.as_path());
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "assets:\n  vocab: vocab.json\n  voices_dir: /opt/voices\ndecoder:\n  max_new_tokens: 64\nresample: fft\n",
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.decoder.max_new_tokens, 64);
        assert_eq!(cfg.decoder.eot, 50256);
        assert_eq!(cfg.resample, ResampleQuality::Fft);
        assert_eq!(cfg.default_voice, DEFAULT_VOICE_ID);
        assert_eq!(
            cfg.resolve(cfg.assets.vocab.as_deref().unwrap()),
            dir.path().join("vocab.json")
        );
        assert_eq!(cfg.style_dir().unwrap().dir(), Path::new("/opt/voices"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut cfg = load_config(Some(&path)).unwrap();
        cfg.default_voice = "en-US-luna-kitten".to_string();
        cfg.save().unwrap();

        let back = load_config(Some(&path)).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_asset_loading() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vocab.json"), r#"{"Hi": 17250, "Ġthere": 612}"#).unwrap();
        std::fs::write(dir.path().join("dict.json"), r#"{"en_us": {"hi": "hˈI"}}"#).unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "assets:\n  vocab: vocab.json\n  dictionary: dict.json\n").unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        let detok = cfg.load_detokenizer().unwrap();
        assert_eq!(detok.decode(&[17250, 612]), "Hi there");
        let dict = cfg.load_dictionary().unwrap();
        assert_eq!(dict.get("hi"), Some("hˈI"));

        let err = cfg.style_dir().unwrap_err();
        assert!(err.to_string().contains("assets.voices_dir"));
    }

    #[test]
    fn test_voice_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_voice: en-US-luna-kitten\n").unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.voice(None).id, "en-US-luna-kitten");
        assert_eq!(cfg.voice(Some("")).id, "en-US-luna-kitten");
        assert_eq!(cfg.voice(Some("en-GB-emma-kokoro")).id, "en-GB-emma-kokoro");

        let mut blank = cfg.clone();
        blank.default_voice.clear();
        assert_eq!(blank.voice(None).id, DEFAULT_VOICE_ID);
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_voice: [fast").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
