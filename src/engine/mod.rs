//! Audio Engine Module
//!
//! Core audio processing engine including:
//! - Sample buffer storage
//! - Mute, mix and speed-change transforms
//! - File I/O operations

pub mod buffer;
pub mod io;
pub mod transform;

pub use buffer::{AuxiliaryBufferSet, SampleBuffer};
pub use io::{export_audio, import_audio, ExportFormat};
pub use transform::TransformEngine;
