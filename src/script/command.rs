//! Script commands and parsing
//!
//! A script is UTF-8 text with one command per line. Empty lines and lines
//! starting with `#` are skipped. Every other line is split on whitespace:
//!
//! ```text
//! mute <start> <end>        # seconds
//! mix $N <offset>           # N >= 2 names the N-th input file
//! speed_up <factor>
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::COMMENT_MARKER;
use crate::error::ScriptError;

// ============================================================================
// Input references
// ============================================================================

/// A `$N` reference to an input file, as written in a script
///
/// Input files are numbered from 1 in command-line order. `$1` is the
/// primary input, which is the running buffer itself, so only `$2` and up
/// name auxiliary buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputRef(u32);

impl InputRef {
    /// Lowest number that names an auxiliary input
    pub const FIRST_AUXILIARY: u32 = 2;

    /// Create a reference to input number `n`
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    /// The `N` of `$N`
    pub fn number(&self) -> u32 {
        self.0
    }

    /// Zero-based position in the auxiliary buffer set
    ///
    /// `$2` maps to 0, `$3` to 1, and so on. Returns `None` for `$0` and
    /// `$1`, which never name an auxiliary buffer.
    pub fn aux_index(&self) -> Option<usize> {
        self.0
            .checked_sub(Self::FIRST_AUXILIARY)
            .map(|index| index as usize)
    }

    /// Parse a `$N` token
    pub fn parse(token: &str) -> Option<Self> {
        token.strip_prefix('$')?.parse().ok().map(Self)
    }
}

impl fmt::Display for InputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

// ============================================================================
// Commands
// ============================================================================

/// One executable script command
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Silence `[start_secs, end_secs)`
    Mute { start_secs: f64, end_secs: f64 },
    /// Mix an auxiliary input in from `offset_secs`
    Mix { input: InputRef, offset_secs: f64 },
    /// Change playback speed by `factor`
    SpeedUp { factor: f64 },
}

impl Command {
    /// Keyword that introduces the command in a script
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Mute { .. } => "mute",
            Command::Mix { .. } => "mix",
            Command::SpeedUp { .. } => "speed_up",
        }
    }
}

/// A parsed command together with the script line it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScriptLine {
    /// 1-based line number
    pub line: usize,
    pub command: Command,
}

/// Cursor over the arguments of one script line
struct Arguments<'a> {
    line: usize,
    command: &'static str,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Arguments<'a> {
    fn next(&mut self, argument: &'static str) -> Result<&'a str, ScriptError> {
        self.tokens.next().ok_or(ScriptError::MissingArgument {
            line: self.line,
            command: self.command,
            argument,
        })
    }

    fn number(&mut self, argument: &'static str) -> Result<f64, ScriptError> {
        let token = self.next(argument)?;
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ScriptError::InvalidNumber {
                line: self.line,
                token: token.to_string(),
            }),
        }
    }

    fn input_ref(&mut self, argument: &'static str) -> Result<InputRef, ScriptError> {
        let token = self.next(argument)?;
        InputRef::parse(token).ok_or_else(|| ScriptError::InvalidReference {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        match self.tokens.next() {
            Some(token) => Err(ScriptError::TrailingArgument {
                line: self.line,
                token: token.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Parse one script line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    if text.starts_with(COMMENT_MARKER) || text.trim().is_empty() {
        return Ok(None);
    }

    let mut tokens = text.split_whitespace();
    let keyword = tokens.next().unwrap_or_default();

    let command = match keyword {
        "mute" => {
            let mut args = Arguments {
                line,
                command: "mute",
                tokens,
            };
            let start_secs = args.number("start")?;
            let end_secs = args.number("end")?;
            args.finish()?;
            Command::Mute {
                start_secs,
                end_secs,
            }
        }
        "mix" => {
            let mut args = Arguments {
                line,
                command: "mix",
                tokens,
            };
            let input = args.input_ref("input")?;
            let offset_secs = args.number("offset")?;
            args.finish()?;
            Command::Mix { input, offset_secs }
        }
        "speed_up" => {
            let mut args = Arguments {
                line,
                command: "speed_up",
                tokens,
            };
            let factor = args.number("factor")?;
            args.finish()?;
            Command::SpeedUp { factor }
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    Ok(Some(command))
}

// ============================================================================
// Script
// ============================================================================

/// An ordered list of commands parsed from script text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Script {
    commands: Vec<ScriptLine>,
    skipped_lines: usize,
}

impl Script {
    /// Parse script text, stopping at the first malformed line
    ///
    /// Lines end at `\n` or `\r\n`; a final line terminator does not start
    /// another line.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut script = Script::default();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            match parse_line(line, raw)? {
                Some(command) => script.commands.push(ScriptLine { line, command }),
                None => script.skipped_lines += 1,
            }
        }

        Ok(script)
    }

    /// Read and parse a script file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Commands in execution order
    pub fn commands(&self) -> &[ScriptLine] {
        &self.commands
    }

    /// Number of blank and comment lines
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Check if the script has no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
