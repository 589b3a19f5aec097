//! CLI module for sbcut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

use crate::config_initialization::SettingsOverrides;
use crate::engine::StrategyKind;

pub mod commands;

/// sbcut - cut SponsorBlock chapters out of a video
///
/// Reads the chapters of INPUT with ffprobe, drops every chapter tagged
/// `[SponsorBlock]: <category>` whose category matches one of the configured
/// labels, and writes `<name>-SponsorBlocked.<ext>` next to the input.
#[derive(Parser, Debug)]
#[command(name = "sbcut")]
#[command(about = "Remove SponsorBlock-marked chapters from a video with ffmpeg")]
#[command(version)]
pub struct Cli {
    /// Input video file path
    pub input: PathBuf,

    /// Cutting strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyKind>,

    /// Category label to remove (repeatable; replaces the configured list)
    #[arg(short, long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    /// Configuration file (default: ./sbcut.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, env = "SBCUT_FFMPEG", value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long, env = "SBCUT_FFPROBE", value_name = "PATH")]
    pub ffprobe: Option<String>,

    /// Logging level
    #[arg(long, env = "SBCUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Overwrite an existing output file
    #[arg(long)]
    pub overwrite: bool,

    /// Remove part and list files even when the split strategy fails
    #[arg(long)]
    pub cleanup_on_failure: bool,
}

impl Cli {
    /// Settings overrides carried by the command line
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            config: self.config.clone(),
            categories: self.categories.clone(),
            strategy: self.strategy,
            ffmpeg: self.ffmpeg.clone(),
            ffprobe: self.ffprobe.clone(),
            log_level: self.log_level.clone(),
            json_logs: self.json_logs,
            overwrite: self.overwrite,
            cleanup_on_failure: self.cleanup_on_failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positional_only() {
        let cli = Cli::try_parse_from(["sbcut", "video.mkv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("video.mkv"));
        assert!(cli.strategy.is_none());
        assert!(cli.categories.is_empty());
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "sbcut",
            "--strategy",
            "split-concat",
            "-c",
            "Sponsor",
            "--category",
            "Outro",
            "--cleanup-on-failure",
            "video.mkv",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.strategy, Some(StrategyKind::SplitConcat));
        assert_eq!(overrides.categories, vec!["Sponsor", "Outro"]);
        assert!(overrides.cleanup_on_failure);
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Cli::try_parse_from(["sbcut"]).is_err());
    }
}
