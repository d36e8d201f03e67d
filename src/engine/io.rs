//! Audio file I/O
//!
//! WAV import and export for the processing pipeline. Inputs must be mono
//! at the session sample rate; they are never converted. Integer PCM of any
//! common bit depth and 32-bit float are normalised to [-1.0, 1.0].
//!
//! Output is mono at the session rate, 16-bit PCM unless configured
//! otherwise.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};

use crate::config::{SessionConfig, DEFAULT_BIT_DEPTH, DEFAULT_SAMPLE_RATE};
use crate::engine::buffer::SampleBuffer;
use crate::error::{ProcessorError, Result};

/// Export format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormat {
    /// Sample rate written to the header (default: 44100)
    pub sample_rate: u32,
    /// Bit depth: 16, 24, or 32 (default: 16)
    pub bit_depth: u16,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
        }
    }
}

impl ExportFormat {
    /// Create a new export format with the given sample rate and bit depth
    pub fn new(sample_rate: u32, bit_depth: u16) -> Self {
        ExportFormat {
            sample_rate,
            bit_depth,
        }
    }
}

impl From<&SessionConfig> for ExportFormat {
    fn from(config: &SessionConfig) -> Self {
        ExportFormat::new(config.sample_rate, config.bit_depth)
    }
}

/// Import a mono WAV file at the expected sample rate
///
/// # Arguments
/// * `path` - Path to the WAV file to import
/// * `sample_rate` - Session sample rate the file must have
///
/// # Errors
/// * `FileOpen` - If the file cannot be opened or decoded
/// * `FileParameters` - If the file is not mono or has another sample rate
/// * `UnsupportedFormat` - If the integer bit depth is not 8, 16, 24 or 32
pub fn import_audio(path: &Path, sample_rate: u32) -> Result<SampleBuffer> {
    let open_error = |source| ProcessorError::FileOpen {
        path: path.to_path_buf(),
        source,
    };

    let reader = WavReader::open(path).map_err(open_error)?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.sample_rate != sample_rate {
        return Err(ProcessorError::FileParameters {
            path: path.to_path_buf(),
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            expected_rate: sample_rate,
        });
    }

    let samples = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)
        .map_err(|err| match err {
            ReadError::Decode(source) => open_error(source),
            ReadError::BitDepth(bits) => ProcessorError::UnsupportedFormat {
                format: format!("{}-bit integer audio", bits),
            },
        })?;

    info!("Loaded '{}' ({} frames)", path.display(), samples.len());
    Ok(SampleBuffer::new(samples))
}

/// Export a SampleBuffer to a mono WAV file
///
/// Samples are clamped to [-1.0, 1.0] before integer quantization.
///
/// # Errors
/// * `FileWrite` - If the file cannot be created or written
/// * `UnsupportedFormat` - If the bit depth is not 16, 24 or 32
pub fn export_audio(buffer: &SampleBuffer, path: &Path, format: ExportFormat) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format: if format.bit_depth == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };

    let scale = match format.bit_depth {
        16 => Some(32767.0),
        24 => Some(8388607.0),
        32 => None,
        _ => {
            return Err(ProcessorError::UnsupportedFormat {
                format: format!("{}-bit audio (only 16, 24, 32 supported)", format.bit_depth),
            });
        }
    };

    let write_error = |source| ProcessorError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WavWriter::create(path, spec).map_err(write_error)?;

    for &sample in buffer.samples() {
        let sample = sample.clamp(-1.0, 1.0);
        match (format.bit_depth, scale) {
            (16, Some(scale)) => writer.write_sample((sample * scale) as i16),
            (_, Some(scale)) => writer.write_sample((sample * scale) as i32),
            (_, None) => writer.write_sample(sample),
        }
        .map_err(write_error)?;
    }

    writer.finalize().map_err(write_error)?;

    info!(
        "Saved '{}' ({} frames, {}-bit)",
        path.display(),
        buffer.len(),
        format.bit_depth
    );
    Ok(())
}

// ============================================================================
// Internal helper functions
// ============================================================================

enum ReadError {
    Decode(hound::Error),
    BitDepth(u16),
}

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> std::result::Result<Vec<f32>, ReadError> {
    debug!("decoding {:?} samples at {} bits", sample_format, bits_per_sample);

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(ReadError::Decode),
        SampleFormat::Int => {
            let scale = match bits_per_sample {
                8 => 128.0,
                16 => 32768.0,
                24 => 8388608.0,
                32 => 2147483648.0,
                other => return Err(ReadError::BitDepth(other)),
            };
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(ReadError::Decode)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    const RATE: u32 = DEFAULT_SAMPLE_RATE;

    fn sine(frequency: f32, len: usize) -> SampleBuffer {
        let angular = 2.0 * std::f32::consts::PI * frequency / RATE as f32;
        SampleBuffer::new((0..len).map(|i| 0.8 * (angular * i as f32).sin()).collect())
    }

    fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for _ in 0..frames * channels as usize {
            writer.write_sample(1000_i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_round_trip_16bit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let original = sine(440.0, 4410);

        export_audio(&original, &path, ExportFormat::default()).unwrap();
        let imported = import_audio(&path, RATE).unwrap();

        assert_eq!(original.len(), imported.len());
        for (orig, imp) in original.samples().iter().zip(imported.samples()) {
            assert_abs_diff_eq!(*orig, *imp, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_export_writes_mono_16bit_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");

        export_audio(&SampleBuffer::silence(100), &path, ExportFormat::default()).unwrap();

        let reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);
        assert_eq!(reader.duration(), 100);
    }

    #[test]
    fn test_export_clamps_out_of_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loud.wav");
        let buffer = SampleBuffer::new(vec![1.5, -2.0, 0.0]);

        export_audio(&buffer, &path, ExportFormat::default()).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let written: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(written, vec![32767, -32767, 0]);
    }

    #[test]
    fn test_round_trip_24bit_and_float() {
        let dir = tempdir().unwrap();
        let original = sine(1000.0, 2000);

        for (bits, tolerance) in [(24_u16, 1e-6_f32), (32, 1e-7)] {
            let path = dir.path().join(format!("tone_{}.wav", bits));
            export_audio(&original, &path, ExportFormat::new(RATE, bits)).unwrap();
            let imported = import_audio(&path, RATE).unwrap();

            for (orig, imp) in original.samples().iter().zip(imported.samples()) {
                assert_abs_diff_eq!(*orig, *imp, epsilon = tolerance);
            }
        }
    }

    #[test]
    fn test_export_unsupported_bit_depth() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.wav");

        let result = export_audio(&SampleBuffer::silence(10), &path, ExportFormat::new(RATE, 12));

        assert!(matches!(result, Err(ProcessorError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_export_to_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.wav");

        let result = export_audio(&SampleBuffer::silence(10), &path, ExportFormat::default());

        match result {
            Err(ProcessorError::FileWrite { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected FileWrite error, got: {:?}", other),
        }
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_audio(Path::new("/nonexistent/path/audio.wav"), RATE);

        match result {
            Err(ProcessorError::FileOpen { path, .. }) => {
                assert!(path.to_string_lossy().contains("nonexistent"));
            }
            other => panic!("Expected FileOpen error, got: {:?}", other),
        }
    }

    #[test]
    fn test_import_not_a_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.wav");
        std::fs::write(&path, "definitely not RIFF data").unwrap();

        let result = import_audio(&path, RATE);

        assert!(matches!(result, Err(ProcessorError::FileOpen { .. })));
    }

    #[test]
    fn test_import_rejects_stereo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, RATE, 10);

        let result = import_audio(&path, RATE);

        match result {
            Err(ProcessorError::FileParameters { channels, .. }) => assert_eq!(channels, 2),
            other => panic!("Expected FileParameters error, got: {:?}", other),
        }
    }

    #[test]
    fn test_import_rejects_other_sample_rate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("48k.wav");
        write_wav(&path, 1, 48000, 10);

        let result = import_audio(&path, RATE);

        match result {
            Err(ProcessorError::FileParameters {
                sample_rate,
                expected_rate,
                ..
            }) => {
                assert_eq!(sample_rate, 48000);
                assert_eq!(expected_rate, 44100);
            }
            other => panic!("Expected FileParameters error, got: {:?}", other),
        }
    }

    #[test]
    fn test_import_normalises_16bit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_wav(&path, 1, RATE, 3);

        let imported = import_audio(&path, RATE).unwrap();

        assert_eq!(imported.len(), 3);
        assert_abs_diff_eq!(imported[0], 1000.0 / 32768.0, epsilon = 1e-7);
    }

    #[test]
    fn test_export_format_from_session() {
        let format = ExportFormat::from(&SessionConfig::with_sample_rate(22050));
        assert_eq!(format, ExportFormat::new(22050, 16));
    }
}
