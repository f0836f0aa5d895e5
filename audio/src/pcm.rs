//! Linear PCM sample conversions.
//!
//! Everything downstream of capture works on normalized `f32` samples in
//! `[-1, 1]`; raw capture buffers and synthesized output are 16-bit signed
//! little-endian.

/// Floor applied to the RMS before converting to decibels.
const RMS_FLOOR: f32 = 1e-8;

/// Lowest level reported by [`rms_db`].
pub const SILENCE_DB: f32 = -160.0;

/// Converts 16-bit samples to normalized f32 (`s / 32768`).
pub fn i16_to_f32(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 32768.0).collect()
}

/// Decodes a little-endian byte buffer into 16-bit samples.
///
/// An odd trailing byte is ignored.
pub fn i16_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

/// Encodes 16-bit samples as a little-endian byte buffer.
pub fn i16_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Converts normalized f32 samples to 16-bit PCM.
///
/// Samples are clamped to `[-1, 1]`, scaled by 32767 and truncated toward zero.
pub fn f32_to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

/// Returns the RMS level of `samples` in dBFS, clamped to `[-160, 0]`.
///
/// An empty slice reports [`SILENCE_DB`].
pub fn rms_db(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return SILENCE_DB;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    let rms = (sum / samples.len() as f64).sqrt() as f32;
    (20.0 * rms.max(RMS_FLOOR).log10()).clamp(SILENCE_DB, 0.0)
}

/// Duration of `num_samples` mono samples at `sample_rate`, in milliseconds.
pub fn duration_ms(num_samples: usize, sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    num_samples as u64 * 1000 / sample_rate as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i16_to_f32() {
        let out = i16_to_f32(&[0, 16384, -32768, 32767]);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.5);
        assert_eq!(out[2], -1.0);
        assert!((out[3] - 0.999_969_5).abs() < 1e-6);
    }

    #[test]
    fn test_i16_from_le_bytes_ignores_odd_byte() {
        let samples = i16_from_le_bytes(&[0x01, 0x00, 0xff, 0xff, 0x7f]);
        assert_eq!(samples, vec![1, -1]);
    }

    #[test]
    fn test_le_bytes_roundtrip() {
        let samples = vec![0i16, 1, -1, i16::MAX, i16::MIN, 1234];
        assert_eq!(i16_from_le_bytes(&i16_to_le_bytes(&samples)), samples);
    }

    #[test]
    fn test_f32_to_i16_clamps_and_truncates() {
        let out = f32_to_i16(&[0.0, 1.0, -1.0, 2.0, -3.0, 0.5, -0.5]);
        assert_eq!(out, vec![0, 32767, -32767, 32767, -32767, 16383, -16383]);
    }

    #[test]
    fn test_rms_db() {
        assert_eq!(rms_db(&[]), SILENCE_DB);
        assert_eq!(rms_db(&[0.0; 160]), SILENCE_DB);

        let full = rms_db(&[1.0, -1.0, 1.0, -1.0]);
        assert!(full.abs() < 1e-5);

        // Half amplitude square wave: 20 * log10(0.5) ~= -6.02 dB.
        let half = rms_db(&[0.5, -0.5, 0.5, -0.5]);
        assert!((half + 6.0206).abs() < 1e-3, "got {}", half);
    }

    #[test]
    fn test_duration_ms() {
        assert_eq!(duration_ms(16000, 16000), 1000);
        assert_eq!(duration_ms(12000, 24000), 500);
        assert_eq!(duration_ms(100, 0), 0);
    }
}
