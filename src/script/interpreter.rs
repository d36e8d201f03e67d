//! Script Interpreter
//!
//! Threads the main buffer through a script's commands in order. Each
//! command consumes the current main buffer and yields its replacement; the
//! auxiliary buffers are only ever read.
//!
//! ```text
//! Ready --(command ok)--> Ready
//! Ready --(unreadable script / bad line / unknown command)--> Failed   (load)
//! Ready --(bad reference / rejected parameter)--> Failed              (execute)
//! Ready --(end of script)--> Done
//! ```
//!
//! A failure drops the partially processed buffer: the caller only ever
//! sees the final buffer of a run that reached `Done`.

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::engine::buffer::{AuxiliaryBufferSet, SampleBuffer};
use crate::engine::transform::TransformEngine;
use crate::error::{ProcessorError, Result, ScriptError};
use crate::script::command::{Command, InputRef, Script, ScriptLine};

/// Interpreter states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpreterState {
    /// Inputs are loaded and commands may run
    #[default]
    Ready,
    /// Every command ran
    Done,
    /// A command failed and the run was abandoned
    Failed,
}

impl fmt::Display for InterpreterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpreterState::Ready => write!(f, "Ready"),
            InterpreterState::Done => write!(f, "Done"),
            InterpreterState::Failed => write!(f, "Failed"),
        }
    }
}

/// Executes scripts against a main buffer and a fixed auxiliary set
#[derive(Debug)]
pub struct ScriptInterpreter<'a> {
    engine: TransformEngine,
    auxiliary: &'a AuxiliaryBufferSet,
    state: InterpreterState,
    executed: usize,
}

impl<'a> ScriptInterpreter<'a> {
    /// Create an interpreter in the `Ready` state
    pub fn new(engine: TransformEngine, auxiliary: &'a AuxiliaryBufferSet) -> Self {
        Self {
            engine,
            auxiliary,
            state: InterpreterState::Ready,
            executed: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// Number of commands executed successfully so far
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Resolve a `$N` reference against the auxiliary set
    pub fn resolve(
        &self,
        line: usize,
        input: InputRef,
    ) -> std::result::Result<&'a SampleBuffer, ScriptError> {
        input
            .aux_index()
            .and_then(|index| self.auxiliary.get(index))
            .ok_or(ScriptError::ReferenceOutOfRange {
                line,
                index: input.number(),
                available: self.auxiliary.len(),
            })
    }

    /// Read and parse a script file
    ///
    /// A script that cannot be read or parsed moves the interpreter to
    /// `Failed`, so no command of it ever runs.
    pub fn load(&mut self, path: &Path) -> Result<Script> {
        match Script::from_file(path) {
            Ok(script) => Ok(script),
            Err(err) => {
                warn!("script '{}' rejected: {}", path.display(), err);
                self.state = InterpreterState::Failed;
                Err(err.into())
            }
        }
    }

    /// Run one command, consuming `main` and returning its replacement
    pub fn execute(&mut self, main: SampleBuffer, step: &ScriptLine) -> Result<SampleBuffer> {
        if self.state != InterpreterState::Ready {
            return Err(ProcessorError::InvalidParameter {
                reason: format!("interpreter is {}, cannot run line {}", self.state, step.line),
            });
        }

        match self.dispatch(main, step) {
            Ok(next) => {
                self.executed += 1;
                debug!("line {}: main buffer now {} frames", step.line, next.len());
                Ok(next)
            }
            Err(err) => {
                self.state = InterpreterState::Failed;
                Err(err)
            }
        }
    }

    fn dispatch(&self, main: SampleBuffer, step: &ScriptLine) -> Result<SampleBuffer> {
        match step.command {
            Command::Mute {
                start_secs,
                end_secs,
            } => {
                info!("Muting from {} seconds to {} seconds.", start_secs, end_secs);
                Ok(self.engine.apply_mute(main, start_secs, end_secs))
            }
            Command::Mix { input, offset_secs } => {
                let secondary = self.resolve(step.line, input)?;
                info!(
                    "Mixing with input{} starting from {} seconds.",
                    input.number(),
                    offset_secs
                );
                Ok(self.engine.apply_mix(main, secondary, offset_secs))
            }
            Command::SpeedUp { factor } => {
                info!("Speed up on {}", factor);
                self.engine
                    .apply_speed_up(&main, factor)
                    .map_err(|err| match err {
                        ProcessorError::InvalidParameter { reason } => ScriptError::Rejected {
                            line: step.line,
                            reason,
                        }
                        .into(),
                        other => other,
                    })
            }
        }
    }

    /// Run a whole script, returning the final main buffer
    ///
    /// Stops at the first failing command.
    pub fn run(&mut self, main: SampleBuffer, script: &Script) -> Result<SampleBuffer> {
        let mut main = main;
        for step in script.commands() {
            main = self.execute(main, step)?;
        }

        self.state = InterpreterState::Done;
        debug!(
            "script done: {} command(s), {} line(s) skipped",
            self.executed,
            script.skipped_lines()
        );
        Ok(main)
    }
}

// ============================================================================
// Tests
// ============================================================================
