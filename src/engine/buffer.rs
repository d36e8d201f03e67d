//! Sample Buffer Management
//!
//! Mono sample storage for the processing pipeline. Buffers carry no sample
//! rate of their own: the rate belongs to the session (see
//! [`SessionConfig`](crate::config::SessionConfig)).

use std::ops::Index;

// ============================================================================
// Sample Buffer
// ============================================================================

/// Ordered mono samples, conceptually in [-1.0, 1.0], indexed by frame
///
/// Transforms never mutate a buffer in place: each one returns a new buffer
/// that replaces the previous one in the pipeline.
///
/// # Example
/// ```
/// use sound_processor::engine::SampleBuffer;
///
/// let buffer = SampleBuffer::constant(1.0, 4);
/// assert_eq!(buffer.len(), 4);
/// assert_eq!(buffer[2], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer {
    samples: Vec<f32>,
}

impl SampleBuffer {
    /// Wrap existing samples
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    /// Create a buffer of `len` frames of silence
    pub fn silence(len: usize) -> Self {
        Self::constant(0.0, len)
    }

    /// Create a buffer of `len` frames all equal to `value`
    pub fn constant(value: f32, len: usize) -> Self {
        Self {
            samples: vec![value; len],
        }
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Take ownership of the samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Sample at `frame`, or `None` past the end
    pub fn get(&self, frame: usize) -> Option<f32> {
        self.samples.get(frame).copied()
    }

    /// Duration in seconds at the given sample rate
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / sample_rate as f64
    }

    /// Peak absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max)
    }
}

impl From<Vec<f32>> for SampleBuffer {
    fn from(samples: Vec<f32>) -> Self {
        Self::new(samples)
    }
}

impl Index<usize> for SampleBuffer {
    type Output = f32;

    fn index(&self, frame: usize) -> &f32 {
        &self.samples[frame]
    }
}

// ============================================================================
// Auxiliary Buffer Set
// ============================================================================

/// The auxiliary inputs of a session, in command-line order
///
/// Loaded once at startup and read-only afterwards. Script commands address
/// entries through [`InputRef`](crate::script::InputRef), never by raw index.
#[derive(Debug, Clone, Default)]
pub struct AuxiliaryBufferSet {
    buffers: Vec<SampleBuffer>,
}

impl AuxiliaryBufferSet {
    /// Create the set from buffers in argument order
    pub fn new(buffers: Vec<SampleBuffer>) -> Self {
        Self { buffers }
    }

    /// Number of auxiliary buffers
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Check if there are no auxiliary buffers
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Buffer at zero-based `index`
    pub fn get(&self, index: usize) -> Option<&SampleBuffer> {
        self.buffers.get(index)
    }
}

impl FromIterator<SampleBuffer> for AuxiliaryBufferSet {
    fn from_iter<I: IntoIterator<Item = SampleBuffer>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
