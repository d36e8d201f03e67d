//! CLI Command Implementations
//!
//! The processing pipeline behind the command line: load every input, run
//! the config script, save the result.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::config::SessionConfig;
use crate::engine::{
    export_audio, import_audio, AuxiliaryBufferSet, ExportFormat, SampleBuffer, TransformEngine,
};
use crate::error::{ProcessorError, Result};
use crate::script::ScriptInterpreter;

/// Everything one processing run needs
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    /// Config script path
    pub config: PathBuf,
    /// Output WAV path
    pub output: PathBuf,
    /// Primary input first, then auxiliary inputs
    pub inputs: Vec<PathBuf>,
    pub session: SessionConfig,
    /// Skip writing the output
    pub dry_run: bool,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub commands_executed: usize,
    pub lines_skipped: usize,
    pub auxiliary_inputs: usize,
    pub output_frames: usize,
    pub output_duration_secs: f64,
    pub peak: f32,
    /// Where the output was written, `None` for a dry run
    pub output: Option<PathBuf>,
}

/// Load the primary input and the auxiliary set
fn load_inputs(
    inputs: &[PathBuf],
    sample_rate: u32,
) -> Result<(SampleBuffer, AuxiliaryBufferSet)> {
    let (primary, auxiliary) = inputs
        .split_first()
        .ok_or_else(|| ProcessorError::InvalidParameter {
            reason: "at least one input file is required".to_string(),
        })?;

    let main = import_audio(primary, sample_rate)?;
    let auxiliary = auxiliary
        .iter()
        .map(|path| import_audio(path, sample_rate))
        .collect::<Result<AuxiliaryBufferSet>>()?;

    Ok((main, auxiliary))
}

/// Run the whole pipeline
///
/// Nothing is written unless every command of the script succeeds.
pub fn process(request: &RunRequest) -> Result<RunSummary> {
    let sample_rate = request.session.sample_rate;
    let (main, auxiliary) = load_inputs(&request.inputs, sample_rate)?;

    let mut interpreter = ScriptInterpreter::new(TransformEngine::new(sample_rate), &auxiliary);
    let script = interpreter.load(&request.config)?;
    info!(
        "Running '{}' ({} command(s)) with {} auxiliary input(s)",
        request.config.display(),
        script.commands().len(),
        auxiliary.len()
    );

    let result = interpreter.run(main, &script)?;

    let output = if request.dry_run {
        info!("Dry run: not writing '{}'", request.output.display());
        None
    } else {
        save(&result, &request.output, &request.session)?;
        Some(request.output.clone())
    };

    Ok(RunSummary {
        commands_executed: interpreter.executed(),
        lines_skipped: script.skipped_lines(),
        auxiliary_inputs: auxiliary.len(),
        output_frames: result.len(),
        output_duration_secs: result.duration_secs(sample_rate),
        peak: result.peak(),
        output,
    })
}

/// Write the final buffer as a mono file at the session rate
pub fn save(buffer: &SampleBuffer, path: &Path, session: &SessionConfig) -> Result<()> {
    export_audio(buffer, path, ExportFormat::from(session))
}
