//! Single-pass strategy: trim every keep-segment and concat them in one filter graph

use std::rc::Rc;

use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::Segment;
use crate::engine::{run_to_completion, CutJob, CutStrategy, EngineCommand, EngineSettings};
use crate::ports::ExecutePort;

/// Re-encoding cutter driven by `-filter_complex`
pub struct FilterGraphStrategy {
    executor: Rc<dyn ExecutePort>,
    settings: EngineSettings,
}

impl FilterGraphStrategy {
    pub fn new(executor: Rc<dyn ExecutePort>, settings: EngineSettings) -> Self {
        Self { executor, settings }
    }

    /// Build the complete ffmpeg invocation for `job`
    pub fn build_command(&self, job: &CutJob) -> EngineCommand {
        let mut command = self.settings.base_command();
        if self.settings.overwrite {
            command = command.arg("-y");
        }

        command
            .arg("-i")
            .path_arg(&job.input)
            .arg("-filter_complex")
            .arg(filter_graph(&job.segments))
            .args(["-map", "[outv]", "-map", "[outa]"])
            .path_arg(&job.output)
    }
}

impl CutStrategy for FilterGraphStrategy {
    fn name(&self) -> &'static str {
        "filter-graph"
    }

    fn run(&self, job: &CutJob) -> Result<(), DomainError> {
        info!(
            "Trimming {} segments of {} in a single pass",
            job.segments.len(),
            job.input.display()
        );
        run_to_completion(self.executor.as_ref(), &self.build_command(job))
    }
}

/// Video and audio trim filters for segment `index`, writing pads `{index}v` / `{index}a`
pub fn trim_pair(index: usize, segment: &Segment) -> String {
    format!(
        "[0:v]trim=start={start}:end={end}[{index}v]; [0:a]atrim=start={start}:end={end}[{index}a];",
        start = segment.start,
        end = segment.end,
        index = index
    )
}

/// Concat filter joining `count` trimmed pad pairs into `[outv][outa]`
pub fn concat_filter(count: usize) -> String {
    let mut filter = String::new();
    for index in 0..count {
        filter.push_str(&format!("[{index}v][{index}a]"));
    }
    filter.push_str(&format!("concat=n={}:v=1:a=1[outv][outa]", count));
    filter
}

/// Full `-filter_complex` argument for `segments`
pub fn filter_graph(segments: &[Segment]) -> String {
    let mut graph = String::new();
    for (index, segment) in segments.iter().enumerate() {
        graph.push_str(&trim_pair(index, segment));
        graph.push(' ');
    }
    graph.push_str(&concat_filter(segments.len()));
    graph
}
