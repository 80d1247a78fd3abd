//! Command-line interface for overhear
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ambient question answering from short audio chunks
#[derive(Parser, Debug)]
#[command(
    name = "overhear",
    version = &*crate::version_string().leak(),
    about = "Records audio in chunks, finds the questions, answers them locally"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (the final log is still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: effective configuration and per-chunk progress)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of chunks to record before stopping
    #[arg(long, value_name = "COUNT")]
    pub chunks: Option<u32>,

    /// Chunk duration (default: 10s). Examples: 10, 30s, 2m
    #[arg(long, short = 'd', value_name = "DURATION", value_parser = parse_duration_secs)]
    pub chunk_duration: Option<u32>,

    /// Number of concurrent consumer workers
    #[arg(long, value_name = "COUNT")]
    pub consumers: Option<usize>,

    /// Directory chunk files are written to (and deleted from)
    #[arg(long, value_name = "DIR")]
    pub chunk_dir: Option<PathBuf>,

    /// Print the final question log as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Parse a chunk duration string into seconds.
///
/// Supports bare numbers (seconds) and any format accepted by `humantime`
/// (`30s`, `2m`, `1m30s`).
fn parse_duration_secs(s: &str) -> Result<u32, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<u32>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map_err(|e| e.to_string())
        .and_then(|d| u32::try_from(d.as_secs()).map_err(|_| "duration too large".to_string()))
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check system dependencies and configuration
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs_default_command() {
        let cli = Cli::try_parse_from(["overhear"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
        assert!(!cli.json);
        assert_eq!(cli.chunks, None);
    }

    #[test]
    fn test_check_subcommand() {
        let cli = Cli::try_parse_from(["overhear", "check"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn test_pipeline_overrides() {
        let cli = Cli::try_parse_from([
            "overhear",
            "--chunks",
            "6",
            "--chunk-duration",
            "30s",
            "--consumers",
            "4",
            "--chunk-dir",
            "/tmp/overhear",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.chunks, Some(6));
        assert_eq!(cli.chunk_duration, Some(30));
        assert_eq!(cli.consumers, Some(4));
        assert_eq!(cli.chunk_dir, Some(PathBuf::from("/tmp/overhear")));
        assert!(cli.json);
    }

    #[test]
    fn test_parse_duration_bare_number_is_seconds() {
        assert_eq!(parse_duration_secs("10"), Ok(10));
    }

    #[test]
    fn test_parse_duration_humantime_formats() {
        assert_eq!(parse_duration_secs("30s"), Ok(30));
        assert_eq!(parse_duration_secs("2m"), Ok(120));
        assert_eq!(parse_duration_secs("1m30s"), Ok(90));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration_secs("soon").is_err());
    }

    #[test]
    fn test_version_comes_from_version_string() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let expected = crate::version_string();
        assert_eq!(cmd.get_version(), Some(expected.as_str()));
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["overhear", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
