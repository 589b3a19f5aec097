//! sbcut - SponsorBlock chapter cutter
//!
//! Removes chapters tagged `[SponsorBlock]: <category>` from a video by
//! driving ffmpeg, either in one filter-graph pass or by splitting the kept
//! ranges into part files and concatenating them.
//!
//! # Usage
//!
//! ```bash
//! sbcut "talk.mkv"
//! sbcut --strategy split-concat --category Sponsor --category Outro "talk.mkv"
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use sbcut::adapters::TracingLogAdapter;
use sbcut::cli::{commands, Cli};
use sbcut::config_initialization::initialize_settings;
use sbcut::error::SbCutError;

/// Main entry point for sbcut
fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    let settings = initialize_settings(cli.overrides()).context("Failed to load configuration")?;

    // Initialize logging
    TracingLogAdapter::init(&settings.log_level, settings.json_logs)?;

    match commands::remove(&cli, &settings) {
        Ok(outcome) => {
            info!("sbcut finished: {:?}", outcome);
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ SbCutError::InputFileNotFound { .. }) => {
            println!("{}", e);
            error!("{}", e);
            Ok(ExitCode::from(e.exit_code()))
        }
        Err(e) => Err(anyhow::Error::new(e).context("Sponsor removal failed")),
    }
}
