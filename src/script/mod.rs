//! Config Script Module
//!
//! Parsing of edit scripts and the interpreter that runs them against the
//! transform engine.

pub mod command;
pub mod interpreter;

pub use command::{parse_line, Command, InputRef, Script, ScriptLine};
pub use interpreter::{InterpreterState, ScriptInterpreter};
