//! CLI Module
//!
//! Command-line interface for the sound processor.

pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{SessionConfig, DEFAULT_BIT_DEPTH, SUPPORTED_BIT_DEPTHS};

pub use commands::{process, RunRequest, RunSummary};

/// One-line usage shown by `-h` and on usage errors
pub const USAGE: &str =
    "sound_processor -c <config.txt> <output.wav> <input1.wav> [<input2.wav> ...]";

/// Sound Processor - script-driven mono WAV editor
#[derive(Parser, Debug)]
#[command(name = "sound_processor")]
#[command(version, about, long_about = None)]
#[command(override_usage = USAGE)]
pub struct Cli {
    /// Config script: one `mute`, `mix` or `speed_up` command per line
    #[arg(short = 'c', value_name = "config.txt")]
    pub config: PathBuf,

    /// Output WAV file
    #[arg(value_name = "output.wav")]
    pub output: PathBuf,

    /// Primary input, then auxiliary inputs referenced as $2, $3, ...
    #[arg(value_name = "input.wav", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output bit depth (16, 24 or 32)
    #[arg(long, default_value_t = DEFAULT_BIT_DEPTH, value_parser = parse_bit_depth)]
    pub bit_depth: u16,

    /// Run the script but skip writing the output; print a JSON summary
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Accept only bit depths the writer can produce
fn parse_bit_depth(value: &str) -> Result<u16, String> {
    let depth: u16 = value
        .parse()
        .map_err(|_| format!("'{}' is not a bit depth", value))?;
    if SUPPORTED_BIT_DEPTHS.contains(&depth) {
        Ok(depth)
    } else {
        Err(format!("unsupported bit depth {} (expected 16, 24 or 32)", depth))
    }
}

impl Cli {
    /// Session settings for this invocation
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            bit_depth: self.bit_depth,
            ..SessionConfig::default()
        }
    }

    /// Build the processing request for this invocation
    pub fn request(&self) -> RunRequest {
        RunRequest {
            config: self.config.clone(),
            output: self.output.clone(),
            inputs: self.inputs.clone(),
            session: self.session(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "sound_processor",
            "-c",
            "config.txt",
            "out.wav",
            "in1.wav",
            "in2.wav",
            "in3.wav",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("config.txt"));
        assert_eq!(cli.output, PathBuf::from("out.wav"));
        assert_eq!(
            cli.inputs,
            vec![
                PathBuf::from("in1.wav"),
                PathBuf::from("in2.wav"),
                PathBuf::from("in3.wav")
            ]
        );
        assert_eq!(cli.session(), SessionConfig::default());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_minimum_arguments() {
        let cli = Cli::try_parse_from(["sound_processor", "-c", "c.txt", "o.wav", "i.wav"]).unwrap();
        assert_eq!(cli.inputs.len(), 1);
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["sound_processor", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_too_few_arguments() {
        let err = Cli::try_parse_from(["sound_processor", "-c", "c.txt", "o.wav"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_missing_config_flag() {
        let err = Cli::try_parse_from(["sound_processor", "o.wav", "i.wav"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_request_carries_options() {
        let cli = Cli::try_parse_from([
            "sound_processor",
            "--dry-run",
            "--bit-depth",
            "24",
            "-c",
            "c.txt",
            "o.wav",
            "i.wav",
        ])
        .unwrap();

        let request = cli.request();
        assert!(request.dry_run);
        assert_eq!(request.session.bit_depth, 24);
        assert_eq!(request.session.sample_rate, 44100);
        assert_eq!(request.inputs, vec![PathBuf::from("i.wav")]);
    }

    #[test_case("8" ; "too shallow")]
    #[test_case("20" ; "between depths")]
    #[test_case("sixteen" ; "not a number")]
    fn test_bad_bit_depth_rejected_at_parse(depth: &str) {
        let err = Cli::try_parse_from([
            "sound_processor",
            "--bit-depth",
            depth,
            "-c",
            "c.txt",
            "o.wav",
            "i.wav",
        ])
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_parse_bit_depth() {
        assert_eq!(parse_bit_depth("16"), Ok(16));
        assert_eq!(parse_bit_depth("32"), Ok(32));
        assert!(parse_bit_depth("0").is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
