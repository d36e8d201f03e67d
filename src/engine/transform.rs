//! Buffer Transforms
//!
//! Pure functions computing a new [`SampleBuffer`] from one or two inputs:
//! mute a time window, mix in a second buffer from an offset, and change
//! playback speed by linear-interpolation resampling.
//!
//! Times are given in seconds and mapped to frames with
//! `floor(seconds * sample_rate)`. Reads past the end of any input are
//! never performed:
//! - mute and mix clamp their frame bounds to `[0, len]`
//! - mix reads a secondary buffer shorter than the primary as silence
//! - speed change reads the sample after the last one as the last one

use log::debug;

use crate::engine::buffer::SampleBuffer;
use crate::error::{ProcessorError, Result};

/// Largest output a speed change may produce (frames)
///
/// Matches the largest data chunk a 16-bit mono WAV file can describe.
pub const MAX_OUTPUT_FRAMES: usize = (u32::MAX / 2) as usize;

/// Applies transforms at a fixed session sample rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformEngine {
    sample_rate: u32,
}

impl TransformEngine {
    /// Create an engine for the given sample rate (Hz)
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Sample rate the engine maps seconds with
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Map a time to a frame index clamped to `[0, len]`
    fn frame_at(&self, seconds: f64, len: usize) -> usize {
        let frame = (seconds * self.sample_rate as f64).floor();
        if frame.is_nan() || frame <= 0.0 {
            0
        } else if frame >= len as f64 {
            len
        } else {
            frame as usize
        }
    }

    /// Silence every frame in `[start, end)`
    ///
    /// The result has the same length as the input. A window whose start is
    /// at or after its end leaves the buffer unchanged.
    pub fn apply_mute(&self, buffer: SampleBuffer, start_secs: f64, end_secs: f64) -> SampleBuffer {
        let len = buffer.len();
        let start = self.frame_at(start_secs, len);
        let end = self.frame_at(end_secs, len);

        if start >= end {
            debug!("mute window [{}, {}) is empty, buffer unchanged", start, end);
            return buffer;
        }

        let mut samples = buffer.into_samples();
        samples[start..end].fill(0.0);
        SampleBuffer::new(samples)
    }

    /// Mix `secondary` into `primary` from `offset_secs` onward
    ///
    /// Every frame of the result is halved, including the frames before the
    /// offset that receive nothing from `secondary`:
    ///
    /// `out[f] = (f >= offset ? primary[f] + secondary[f] : primary[f]) / 2`
    ///
    /// The result has the length of `primary`.
    pub fn apply_mix(
        &self,
        primary: SampleBuffer,
        secondary: &SampleBuffer,
        offset_secs: f64,
    ) -> SampleBuffer {
        let offset = self.frame_at(offset_secs, primary.len());
        if secondary.len() < primary.len() {
            debug!(
                "secondary has {} frames, primary {}: padding with silence",
                secondary.len(),
                primary.len()
            );
        }

        let mut samples = primary.into_samples();
        for (frame, sample) in samples.iter_mut().enumerate() {
            if frame >= offset {
                *sample += secondary.get(frame).unwrap_or(0.0);
            }
            *sample /= 2.0;
        }
        SampleBuffer::new(samples)
    }

    /// Resample by linear interpolation to play `factor` times faster
    ///
    /// The output has `floor(len / factor)` frames. Factors above 1 shorten
    /// the buffer, factors below 1 lengthen it.
    ///
    /// # Errors
    /// * `InvalidParameter` - If `factor` is not a finite positive number, or
    ///   the output would exceed [`MAX_OUTPUT_FRAMES`]
    pub fn apply_speed_up(&self, buffer: &SampleBuffer, factor: f64) -> Result<SampleBuffer> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ProcessorError::InvalidParameter {
                reason: format!("speed factor must be a positive number, got {}", factor),
            });
        }

        let output_len = (buffer.len() as f64 / factor).floor();
        if output_len > MAX_OUTPUT_FRAMES as f64 {
            return Err(ProcessorError::InvalidParameter {
                reason: format!(
                    "speed factor {} would produce {} frames (maximum {})",
                    factor, output_len, MAX_OUTPUT_FRAMES
                ),
            });
        }
        let output_len = output_len as usize;

        let input = buffer.samples();
        let last = match input.last() {
            Some(&last) => last,
            None => return Ok(SampleBuffer::default()),
        };

        let mut output = Vec::with_capacity(output_len);
        for i in 0..output_len {
            let t = i as f64 * factor;
            let int_t = t.floor() as usize;
            let frac = t - int_t as f64;

            let current = input.get(int_t).copied().unwrap_or(last) as f64;
            let next = input.get(int_t + 1).copied().unwrap_or(last) as f64;

            output.push(((1.0 - frac) * current + frac * next) as f32);
        }

        Ok(SampleBuffer::new(output))
    }
}

// ============================================================================
// Tests
// ============================================================================
