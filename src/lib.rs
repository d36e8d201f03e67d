//! Sound Processor - script-driven offline audio editing
//!
//! Loads one primary mono WAV stream and any number of auxiliary mono
//! streams at a shared sample rate, applies the commands of a small text
//! script, and writes the result.
//!
//! # Architecture
//!
//! - `engine`: sample buffers, the transform engine (mute, mix, speed
//!   change) and WAV I/O
//! - `script`: script parsing and the interpreter that threads the main
//!   buffer through the commands
//! - `cli`: argument parsing and the load / run / save pipeline

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod script;

pub use config::SessionConfig;
pub use engine::{AuxiliaryBufferSet, SampleBuffer, TransformEngine};
pub use error::{ProcessorError, Result, ScriptError};
pub use script::{Command, Script, ScriptInterpreter};
