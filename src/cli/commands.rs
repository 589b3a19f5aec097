//! Command implementations

use tracing::info;

use crate::app::{DefaultAppContainer, RemovalOutcome, RemovalRequest};
use crate::cli::Cli;
use crate::config_initialization::Settings;
use crate::domain::errors::DomainError;
use crate::engine::CutJob;
use crate::error::{SbCutError, SbCutResult};

/// Execute the removal for the input named on the command line
pub fn remove(cli: &Cli, settings: &Settings) -> SbCutResult<RemovalOutcome> {
    println!("{}", cli.input.display());
    info!("Removing categories [{}] with {} strategy", settings.categories, settings.strategy);

    let container = DefaultAppContainer::new(settings);
    let request = RemovalRequest {
        input: cli.input.clone(),
        categories: settings.categories.clone(),
    };

    let outcome = container
        .removal_interactor()
        .execute_with(&request, announce_job)
        .map_err(|e| match e {
            DomainError::FileNotFound(path) => SbCutError::InputFileNotFound { path },
            other => SbCutError::Domain(other),
        })?;

    display_outcome(&outcome);
    Ok(outcome)
}

/// Print the segments being kept and where they go, before ffmpeg starts
fn announce_job(job: &CutJob) {
    for segment in &job.segments {
        println!("{}. Duration: {}", segment, segment.duration());
    }
    println!("Output path: {}", job.output.display());
}

/// Display the outcome in human-readable format
fn display_outcome(outcome: &RemovalOutcome) {
    match outcome {
        RemovalOutcome::NoChapters => println!("Chapters not defined, nothing to do."),
        RemovalOutcome::NoSegments => println!("SponsorBlock chapters not found, nothing to do"),
        RemovalOutcome::Completed { output, .. } => println!("Done: {}", output.display()),
    }
}
