//! Per-voice style vectors.
//!
//! A voice file is a little-endian `f32` matrix of `[N, 256]`: one style
//! vector per utterance length. The synthesizer picks the row matching the
//! length of what it is about to say.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::StyleError;

/// Width of one style vector.
pub const STYLE_DIM: usize = 256;

const ROW_BYTES: usize = STYLE_DIM * 4;

/// Immutable `[rows, 256]` style matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceStyleTable {
    data: Vec<f32>,
}

impl VoiceStyleTable {
    /// Parses a little-endian `f32` buffer.
    ///
    /// A trailing partial row is ignored.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, StyleError> {
        if bytes.is_empty() {
            return Err(StyleError::Empty);
        }
        if bytes.len() % 4 != 0 {
            return Err(StyleError::Misaligned(bytes.len()));
        }
        if bytes.len() < ROW_BYTES {
            return Err(StyleError::TooShort(bytes.len()));
        }
        if bytes.len() % ROW_BYTES != 0 {
            warn!(bytes = bytes.len(), "style: ignoring trailing partial row");
        }

        let rows = bytes.len() / ROW_BYTES;
        let data = bytes[..rows * ROW_BYTES]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Ok(Self { data })
    }

    /// Builds a table from row-major values.
    pub fn from_rows(rows: Vec<[f32; STYLE_DIM]>) -> Result<Self, StyleError> {
        if rows.is_empty() {
            return Err(StyleError::Empty);
        }
        Ok(Self {
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.data.len() / STYLE_DIM
    }

    /// Row `index`, or the last row when `index` is out of range.
    pub fn row(&self, index: usize) -> &[f32] {
        let offset = index * STYLE_DIM;
        if offset + STYLE_DIM <= self.data.len() {
            &self.data[offset..offset + STYLE_DIM]
        } else {
            &self.data[self.data.len() - STYLE_DIM..]
        }
    }

    /// Style vector for an utterance of `length`: row `min(length, rows - 1)`.
    pub fn select(&self, length: usize) -> &[f32] {
        self.row(length.min(self.rows() - 1))
    }
}

/// Where the synthesizer gets style tables from.
pub trait StyleSource: Send + Sync {
    fn load(&self, voice_id: &str) -> Result<Arc<VoiceStyleTable>, StyleError>;
}

impl StyleSource for HashMap<String, Arc<VoiceStyleTable>> {
    fn load(&self, voice_id: &str) -> Result<Arc<VoiceStyleTable>, StyleError> {
        self.get(voice_id)
            .cloned()
            .ok_or_else(|| StyleError::NotFound(voice_id.to_string()))
    }
}

/// Reads `<dir>/<voice id>.bin` on first use and keeps it.
#[derive(Debug)]
pub struct StyleDir {
    dir: PathBuf,
    cache: Mutex<HashMap<String, Arc<VoiceStyleTable>>>,
}

impl StyleDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the style file for `voice_id`.
    pub fn path_for(&self, voice_id: &str) -> PathBuf {
        self.dir.join(format!("{}.bin", voice_id))
    }
}

impl StyleSource for StyleDir {
    fn load(&self, voice_id: &str) -> Result<Arc<VoiceStyleTable>, StyleError> {
        if let Some(table) = self.cache.lock().get(voice_id) {
            return Ok(table.clone());
        }

        let path = self.path_for(voice_id);
        let bytes = std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StyleError::NotFound(voice_id.to_string())
            } else {
                StyleError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let table = Arc::new(VoiceStyleTable::from_le_bytes(&bytes)?);
        debug!(voice = voice_id, rows = table.rows(), "style: loaded");

        self.cache
            .lock()
            .insert(voice_id.to_string(), table.clone());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `rows` rows where every value of row `i` is `i`.
    fn table_bytes(rows: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(rows * ROW_BYTES);
        for r in 0..rows {
            for _ in 0..STYLE_DIM {
                out.extend_from_slice(&(r as f32).to_le_bytes());
            }
        }
        out
    }

    #[test]
    fn test_select_clamps_to_last_row() {
        let table = VoiceStyleTable::from_le_bytes(&table_bytes(5)).unwrap();
        assert_eq!(table.rows(), 5);
        assert_eq!(table.select(0)[0], 0.0);
        assert_eq!(table.select(3)[255], 3.0);
        assert_eq!(table.select(4)[0], 4.0);
        assert_eq!(table.select(50)[0], 4.0);
        assert_eq!(table.select(50).len(), STYLE_DIM);
    }

    #[test]
    fn test_row_out_of_range_falls_back() {
        let table = VoiceStyleTable::from_le_bytes(&table_bytes(2)).unwrap();
        assert_eq!(table.row(509)[0], 1.0);
    }

    #[test]
    fn test_single_row() {
        let table = VoiceStyleTable::from_le_bytes(&table_bytes(1)).unwrap();
        assert_eq!(table.select(0)[0], 0.0);
        assert_eq!(table.select(100)[0], 0.0);
    }

    #[test]
    fn test_invalid_buffers() {
        assert!(matches!(VoiceStyleTable::from_le_bytes(&[]), Err(StyleError::Empty)));
        assert!(matches!(
            VoiceStyleTable::from_le_bytes(&[0u8; 1023]),
            Err(StyleError::Misaligned(1023))
        ));
        assert!(matches!(
            VoiceStyleTable::from_le_bytes(&[0u8; 1020]),
            Err(StyleError::TooShort(1020))
        ));
    }

    #[test]
    fn test_trailing_partial_row_is_ignored() {
        let mut bytes = table_bytes(3);
        bytes.extend_from_slice(&[0u8; 16]);
        let table = VoiceStyleTable::from_le_bytes(&bytes).unwrap();
        assert_eq!(table.rows(), 3);
        assert_eq!(table.select(10)[0], 2.0);
    }

    #[test]
    fn test_map_source() {
        let mut map = HashMap::new();
        map.insert(
            "en-US-heart-kokoro".to_string(),
            Arc::new(VoiceStyleTable::from_rows(vec![[0.5; STYLE_DIM]]).unwrap()),
        );
        assert_eq!(map.load("en-US-heart-kokoro").unwrap().rows(), 1);
        assert!(matches!(map.load("nope"), Err(StyleError::NotFound(_))));
    }

    #[test]
    fn test_dir_source_reads_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let source = StyleDir::new(dir.path());
        std::fs::write(source.path_for("en-US-bella-kitten"), table_bytes(4)).unwrap();

        let first = source.load("en-US-bella-kitten").unwrap();
        assert_eq!(first.rows(), 4);

        std::fs::remove_file(source.path_for("en-US-bella-kitten")).unwrap();
        let second = source.load("en-US-bella-kitten").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        assert!(matches!(source.load("missing"), Err(StyleError::NotFound(_))));
        assert!(format!("{:?}", source).contains("StyleDir"));
    }
}
