//! In-place radix-2 Cooley-Tukey FFT.

use std::f64::consts::PI;

/// Performs an in-place forward FFT.
///
/// `real` and `imag` must have the same power-of-two length. Callers are
/// expected to zero-pad frames up to the transform size; anything else is a
/// programming error and panics.
pub fn fft(real: &mut [f64], imag: &mut [f64]) {
    check_len(real, imag);
    transform(real, imag);
}

/// Performs an in-place inverse FFT (scaled by `1/n`).
pub fn ifft(real: &mut [f64], imag: &mut [f64]) {
    check_len(real, imag);
    let n = real.len();
    for v in imag.iter_mut() {
        *v = -*v;
    }
    transform(real, imag);
    let scale = 1.0 / n as f64;
    for v in real.iter_mut() {
        *v *= scale;
    }
    for v in imag.iter_mut() {
        *v *= -scale;
    }
}

fn check_len(real: &[f64], imag: &[f64]) {
    assert_eq!(
        real.len(),
        imag.len(),
        "fft: real and imaginary parts differ in length"
    );
    assert!(
        real.is_empty() || real.len().is_power_of_two(),
        "fft: length {} is not a power of two",
        real.len()
    );
}

fn transform(real: &mut [f64], imag: &mut [f64]) {
    let n = real.len();
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            real.swap(i, j);
            imag.swap(i, j);
        }
    }

    // Butterflies, span doubling each pass
    let mut span = 2;
    while span <= n {
        let half = span >> 1;
        let angle = -PI / half as f64;
        let (step_i, step_r) = angle.sin_cos();

        for base in (0..n).step_by(span) {
            let (mut w_r, mut w_i) = (1.0f64, 0.0f64);
            for k in 0..half {
                let u = base + k;
                let v = u + half;

                let t_r = real[v] * w_r - imag[v] * w_i;
                let t_i = real[v] * w_i + imag[v] * w_r;

                real[v] = real[u] - t_r;
                imag[v] = imag[u] - t_i;
                real[u] += t_r;
                imag[u] += t_i;

                let next_r = w_r * step_r - w_i * step_i;
                w_i = w_r * step_i + w_i * step_r;
                w_r = next_r;
            }
        }
        span <<= 1;
    }
}
