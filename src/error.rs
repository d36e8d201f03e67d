//! Error handling for the sound processor
//!
//! Every failure is terminal for a run. Errors propagate up to `main`,
//! which alone decides on the message and the exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sound processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Main error type for sound processor operations
#[derive(Error, Debug)]
pub enum ProcessorError {
    // File Errors
    #[error("Cannot open file '{}': {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error(
        "Wrong parameters in file '{}': {channels} channel(s) at {sample_rate} Hz (expected mono at {expected_rate} Hz)",
        path.display()
    )]
    FileParameters {
        path: PathBuf,
        channels: u16,
        sample_rate: u32,
        expected_rate: u32,
    },

    #[error("Cannot write file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Processing Errors
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    // Script Errors
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Errors raised while reading, parsing or executing a config script
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Cannot read config file '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' is missing its {argument} argument")]
    MissingArgument {
        line: usize,
        command: &'static str,
        argument: &'static str,
    },

    #[error("line {line}: '{token}' is not a valid number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: '{token}' is not an input reference (expected $N)")]
    InvalidReference { line: usize, token: String },

    #[error("line {line}: input ${index} does not exist ({available} auxiliary input(s) loaded)")]
    ReferenceOutOfRange {
        line: usize,
        index: u32,
        available: usize,
    },

    #[error("line {line}: unexpected argument '{token}'")]
    TrailingArgument { line: usize, token: String },

    #[error("line {line}: {reason}")]
    Rejected { line: usize, reason: String },
}

impl ScriptError {
    /// Script line (1-based) the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ScriptError::Unreadable { .. } => None,
            ScriptError::UnknownCommand { line, .. }
            | ScriptError::MissingArgument { line, .. }
            | ScriptError::InvalidNumber { line, .. }
            | ScriptError::InvalidReference { line, .. }
            | ScriptError::ReferenceOutOfRange { line, .. }
            | ScriptError::TrailingArgument { line, .. }
            | ScriptError::Rejected { line, .. } => Some(*line),
        }
    }
}

impl ProcessorError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ProcessorError::FileOpen { .. } => "FILE_OPEN_ERROR",
            ProcessorError::FileParameters { .. } => "FILE_PARAMETERS_ERROR",
            ProcessorError::FileWrite { .. } => "FILE_WRITE_ERROR",
            ProcessorError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ProcessorError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ProcessorError::Script(_) => "SCRIPT_ERROR",
        }
    }

    /// Process exit code reported for this error
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Whether the error comes from the config script rather than audio I/O
    pub fn is_script_error(&self) -> bool {
        matches!(self, ProcessorError::Script(_))
    }
}
