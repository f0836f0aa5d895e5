//! Rubato-based resampler.
//!
//! Band-limited FFT conversion for callers that want better quality than the
//! linear reference path. Pure Rust, no FFI.

use rubato::{FftFixedInOut, Resampler};
use tracing::debug;

use super::ResampleError;

/// Input frames per rubato processing block.
const CHUNK_SIZE: usize = 1024;

/// One-shot mono FFT resampler.
pub struct FftResampler {
    src_rate: u32,
    dst_rate: u32,
    inner: FftFixedInOut<f32>,
}

impl FftResampler {
    /// Creates a mono resampler from `src_rate` to `dst_rate`.
    pub fn new(src_rate: u32, dst_rate: u32) -> Result<Self, ResampleError> {
        if src_rate == 0 || dst_rate == 0 {
            return Err(ResampleError::InvalidRate { src_rate, dst_rate });
        }
        let inner =
            FftFixedInOut::<f32>::new(src_rate as usize, dst_rate as usize, CHUNK_SIZE, 1)?;
        Ok(Self {
            src_rate,
            dst_rate,
            inner,
        })
    }

    /// Converts a whole buffer.
    ///
    /// The input is fed in fixed-size blocks (the last one zero-padded), the
    /// filter delay is dropped from the head and the result is truncated to
    /// `floor(len * dst / src)` samples, matching the linear path.
    pub fn process(&mut self, samples: &[f32]) -> Result<Vec<f32>, ResampleError> {
        if self.src_rate == self.dst_rate {
            return Ok(samples.to_vec());
        }
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let expected =
            (samples.len() as u64 * self.dst_rate as u64 / self.src_rate as u64) as usize;
        let delay = self.inner.output_delay();
        let mut out = Vec::with_capacity(expected + delay + CHUNK_SIZE);
        let mut block = Vec::with_capacity(CHUNK_SIZE);
        let mut pos = 0;

        while out.len() < expected + delay {
            let need = self.inner.input_frames_next();
            let end = (pos + need).min(samples.len());
            block.clear();
            block.extend_from_slice(&samples[pos..end]);
            block.resize(need, 0.0);
            pos = end;

            let frames = self.inner.process(&[&block[..]], None)?;
            match frames.first() {
                Some(ch) if !ch.is_empty() => out.extend_from_slice(ch),
                _ => break,
            }
        }

        out.drain(..delay.min(out.len()));
        out.truncate(expected);
        debug!(
            src_rate = self.src_rate,
            dst_rate = self.dst_rate,
            input = samples.len(),
            output = out.len(),
            "resampler: fft pass done"
        );
        Ok(out)
    }
}
