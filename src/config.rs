//! Session configuration
//!
//! A session runs at one fixed sample rate shared by every input and the
//! output. The rate is carried as a value so the engine can be driven at
//! any rate in tests.

/// Sample rate every input must have, and the output is written at (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Bit depth of the written output (16-bit PCM)
pub const DEFAULT_BIT_DEPTH: u16 = 16;

/// Bit depths the WAV writer supports
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Comment marker for config script lines
pub const COMMENT_MARKER: char = '#';

/// Settings fixed for the lifetime of one processing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Output bit depth: 16, 24 or 32
    pub bit_depth: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
        }
    }
}

impl SessionConfig {
    /// Create a session configuration with an explicit sample rate
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }
}
