//! Slaney mel scale and filterbank generation.
//!
//! Matches librosa's `mel(htk=False, norm="slaney")`, which is what Whisper's
//! `mel_filters.npz` was generated with.

use std::f64::consts::PI;

const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Generates a symmetric Hann window of the given length.
pub fn hann_window(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / (n - 1) as f64).cos()))
        .collect()
}

/// Converts frequency in Hz to the Slaney mel scale.
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz < MIN_LOG_HZ {
        hz / F_SP
    } else {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    }
}

/// Converts a Slaney mel value back to Hz.
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel < MIN_LOG_MEL {
        mel * F_SP
    } else {
        MIN_LOG_HZ * ((mel - MIN_LOG_MEL) * log_step()).exp()
    }
}

/// Returns the `num_mels + 2` filter edge frequencies in Hz.
///
/// Filter `m` rises from `points[m]`, peaks at `points[m + 1]` and falls to
/// zero at `points[m + 2]`.
pub fn hz_points(num_mels: usize, f_min: f64, f_max: f64) -> Vec<f64> {
    let mel_min = hz_to_mel(f_min);
    let mel_max = hz_to_mel(f_max);
    let step = (mel_max - mel_min) / (num_mels + 1) as f64;
    (0..num_mels + 2)
        .map(|i| mel_to_hz(mel_min + i as f64 * step))
        .collect()
}

/// Centre frequency in Hz of each non-redundant FFT bin.
pub fn fft_frequencies(fft_size: usize, sample_rate: usize) -> Vec<f64> {
    (0..fft_size / 2 + 1)
        .map(|k| k as f64 * sample_rate as f64 / fft_size as f64)
        .collect()
}

/// Creates the mel filterbank matrix.
///
/// Returns `[num_mels][fft_size / 2 + 1]`. Each triangle is scaled by
/// `2 / (f_hi - f_lo)` so that its area in Hz is one.
pub fn mel_filter_bank(
    num_mels: usize,
    fft_size: usize,
    sample_rate: usize,
    f_min: f64,
    f_max: f64,
) -> Vec<Vec<f64>> {
    let freqs = fft_frequencies(fft_size, sample_rate);
    let points = hz_points(num_mels, f_min, f_max);

    let mut bank = Vec::with_capacity(num_mels);
    for m in 0..num_mels {
        let (f_lo, f_ctr, f_hi) = (points[m], points[m + 1], points[m + 2]);
        let enorm = 2.0 / (f_hi - f_lo);
        let filter = freqs
            .iter()
            .map(|&f| {
                let w = if f < f_lo || f > f_hi {
                    0.0
                } else if f < f_ctr {
                    (f - f_lo) / (f_ctr - f_lo)
                } else {
                    (f_hi - f) / (f_hi - f_ctr)
                };
                w * enorm
            })
            .collect();
        bank.push(filter);
    }
    bank
}
