// Removal interactor - Orchestrates the sponsor removal use case

use std::path::PathBuf;
use std::rc::Rc;

use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::{CutJob, CutStrategy};
use crate::ports::*;
use crate::utils::path::output_path;

/// Request to strip sponsor chapters from one file
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalRequest {
    pub input: PathBuf,
    pub categories: SponsorCategories,
}

/// How a removal run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalOutcome {
    /// Container defines no chapters
    NoChapters,
    /// Every keep-segment was zero length
    NoSegments,
    /// Output written
    Completed {
        output: PathBuf,
        segments: Vec<Segment>,
    },
}

/// Interactor for the sponsor removal use case
pub struct RemovalInteractor {
    probe_port: Rc<dyn ProbePort>,
    fs_port: Rc<dyn FsPort>,
    strategy: Rc<dyn CutStrategy>,
}

impl RemovalInteractor {
    /// Create new removal interactor with injected ports
    pub fn new(
        probe_port: Rc<dyn ProbePort>,
        fs_port: Rc<dyn FsPort>,
        strategy: Rc<dyn CutStrategy>,
    ) -> Self {
        Self {
            probe_port,
            fs_port,
            strategy,
        }
    }

    /// Execute sponsor removal
    pub fn execute(&self, request: &RemovalRequest) -> Result<RemovalOutcome, DomainError> {
        self.execute_with(request, |_| {})
    }

    /// Execute sponsor removal, handing the planned job to `announce` before any cutting starts
    pub fn execute_with(
        &self,
        request: &RemovalRequest,
        announce: impl FnOnce(&CutJob),
    ) -> Result<RemovalOutcome, DomainError> {
        let input = &request.input;
        info!("Input: {}", input.display());

        if !self.fs_port.file_exists(input) {
            return Err(DomainError::FileNotFound(input.display().to_string()));
        }

        let Some(chapters) = self.probe_port.video_chapters(input)? else {
            info!("Chapters not defined, nothing to do");
            return Ok(RemovalOutcome::NoChapters);
        };

        let duration = self.probe_port.video_duration(input)?;
        let segments = SegmentCalculator::keep_segments(&chapters, &request.categories, duration)?;

        if segments.is_empty() {
            info!("SponsorBlock chapters not found, nothing to do");
            return Ok(RemovalOutcome::NoSegments);
        }
        if segments.len() == 1 && segments[0] == Segment::new(0.0, duration) {
            warn!(
                "No chapter matched categories [{}]; output will contain the whole input",
                request.categories
            );
        }

        let job = CutJob {
            input: input.clone(),
            output: output_path(input),
            segments,
        };
        info!(
            "Output path: {} ({} segments, {} strategy)",
            job.output.display(),
            job.segments.len(),
            self.strategy.name()
        );
        for segment in &job.segments {
            info!("Keeping {} ({}s)", segment, segment.duration());
        }
        announce(&job);

        self.strategy.run(&job)?;

        Ok(RemovalOutcome::Completed {
            output: job.output,
            segments: job.segments,
        })
    }
}
