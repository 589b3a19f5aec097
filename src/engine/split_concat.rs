//! Two-phase strategy: stream-copy each keep-segment to a part file, then concat-demux the parts

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::Segment;
use crate::engine::{run_to_completion, CutJob, CutStrategy, EngineCommand, EngineSettings};
use crate::ports::{ExecutePort, FsPort};
use crate::utils::path::{forward_slashes, manifest_path, part_path, resolve_against};

/// Lossless cutter that never re-encodes
pub struct SplitConcatStrategy {
    executor: Rc<dyn ExecutePort>,
    fs: Rc<dyn FsPort>,
    settings: EngineSettings,
    cleanup_on_failure: bool,
}

impl SplitConcatStrategy {
    pub fn new(executor: Rc<dyn ExecutePort>, fs: Rc<dyn FsPort>, settings: EngineSettings) -> Self {
        Self {
            executor,
            fs,
            settings,
            cleanup_on_failure: false,
        }
    }

    /// Delete part and manifest files even when a step fails
    pub fn with_cleanup_on_failure(mut self, enabled: bool) -> Self {
        self.cleanup_on_failure = enabled;
        self
    }

    /// One invocation with an input clause per segment and a part output per input
    pub fn build_split_command(&self, job: &CutJob) -> EngineCommand {
        let mut command = self.settings.base_command().arg("-y");

        for segment in &job.segments {
            command = command.args(seek_clause(segment)).arg("-i").path_arg(&job.input);
        }

        for index in 0..job.segments.len() {
            command = command
                .args(output_map_clause(index))
                .path_arg(&part_path(&job.input, index));
        }

        command
    }

    /// Concat-demuxer invocation reading the manifest written for `job`
    pub fn build_concat_command(&self, job: &CutJob) -> EngineCommand {
        self.settings
            .base_command()
            .args(["-y", "-safe", "0", "-f", "concat", "-i"])
            .path_arg(&manifest_path(&job.input))
            .args(["-c", "copy"])
            .path_arg(&job.output)
    }

    fn cut(&self, job: &CutJob, manifest: &Path, parts: &[PathBuf]) -> Result<(), DomainError> {
        info!(
            "Splitting {} into {} parts",
            job.input.display(),
            job.segments.len()
        );
        run_to_completion(self.executor.as_ref(), &self.build_split_command(job))?;

        // The concat demuxer resolves relative entries against the manifest's directory
        let cwd = std::env::current_dir()
            .map_err(|e| DomainError::FsFail(format!("Cannot resolve working directory: {}", e)))?;
        self.fs.write_file(manifest, &manifest_for(&cwd, parts))?;

        info!("Joining parts into {}", job.output.display());
        run_to_completion(self.executor.as_ref(), &self.build_concat_command(job))
    }

    fn remove_artifacts(&self, manifest: &Path, parts: &[PathBuf]) -> Result<(), DomainError> {
        self.fs.delete_file(manifest)?;
        for part in parts {
            self.fs.delete_file(part)?;
        }
        Ok(())
    }

    /// Best-effort removal of whatever a failed run left behind
    fn discard_artifacts(&self, manifest: &Path, parts: &[PathBuf]) {
        for path in std::iter::once(manifest).chain(parts.iter().map(PathBuf::as_path)) {
            if !self.fs.file_exists(path) {
                continue;
            }
            if let Err(e) = self.fs.delete_file(path) {
                warn!("Could not remove {}: {}", path.display(), e);
            }
        }
    }
}

impl CutStrategy for SplitConcatStrategy {
    fn name(&self) -> &'static str {
        "split-concat"
    }

    fn run(&self, job: &CutJob) -> Result<(), DomainError> {
        let manifest = manifest_path(&job.input);
        let parts: Vec<PathBuf> = (0..job.segments.len())
            .map(|index| part_path(&job.input, index))
            .collect();

        match self.cut(job, &manifest, &parts) {
            Ok(()) => self.remove_artifacts(&manifest, &parts),
            Err(e) if self.cleanup_on_failure => {
                self.discard_artifacts(&manifest, &parts);
                Err(e)
            }
            Err(e) => {
                warn!(
                    "Leaving part files and {} in place after failure",
                    manifest.display()
                );
                Err(e)
            }
        }
    }
}

/// Input seek options for one segment; `-ss` is omitted for segments starting at zero
pub fn seek_clause(segment: &Segment) -> Vec<String> {
    let mut clause = Vec::with_capacity(4);
    if !segment.starts_at_origin() {
        clause.push("-ss".to_string());
        clause.push(segment.start.to_string());
    }
    clause.push("-to".to_string());
    clause.push(segment.end.to_string());
    clause
}

/// Stream-copy mapping of input `index` (its video and audio) to a part output
pub fn output_map_clause(index: usize) -> Vec<String> {
    vec![
        "-map".to_string(),
        format!("{}:v", index),
        "-map".to_string(),
        format!("{}:a", index),
        "-c".to_string(),
        "copy".to_string(),
    ]
}

/// Concat demuxer manifest: one `file <path>` line per part, forward slashes only
pub fn manifest_contents(parts: &[PathBuf]) -> String {
    parts
        .iter()
        .map(|part| format!("file {}\n", forward_slashes(part)))
        .collect()
}

/// Manifest with every part made absolute against `base`
pub fn manifest_for(base: &Path, parts: &[PathBuf]) -> String {
    let entries: Vec<PathBuf> = parts.iter().map(|part| resolve_against(base, part)).collect();
    manifest_contents(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UnusedPorts;

    impl ExecutePort for UnusedPorts {
        fn execute(&self, _command: &EngineCommand) -> Result<crate::ports::OutputLines, DomainError> {
            unreachable!("command building never executes")
        }
    }

    impl FsPort for UnusedPorts {
        fn file_exists(&self, _path: &Path) -> bool {
            false
        }

        fn write_file(&self, _path: &Path, _contents: &str) -> Result<(), DomainError> {
            unreachable!()
        }

        fn delete_file(&self, _path: &Path) -> Result<(), DomainError> {
            unreachable!()
        }
    }

    fn strategy() -> SplitConcatStrategy {
        SplitConcatStrategy::new(Rc::new(UnusedPorts), Rc::new(UnusedPorts), EngineSettings::default())
    }

    fn job() -> CutJob {
        CutJob {
            input: PathBuf::from("media/in.mp4"),
            output: PathBuf::from("media/in-SponsorBlocked.mp4"),
            segments: vec![Segment::new(0.0, 5.0), Segment::new(8.0, 12.0)],
        }
    }

    #[test]
    fn test_seek_clause_from_origin_omits_ss() {
        assert_eq!(seek_clause(&Segment::new(0.0, 5.0)), vec!["-to", "5"]);
    }

    #[test]
    fn test_seek_clause_with_start() {
        assert_eq!(seek_clause(&Segment::new(8.0, 12.0)), vec!["-ss", "8", "-to", "12"]);
        assert_eq!(
            seek_clause(&Segment::new(0.25, 12.75)),
            vec!["-ss", "0.25", "-to", "12.75"]
        );
    }

    #[test]
    fn test_split_command() {
        let command = strategy().build_split_command(&job());
        assert_eq!(
            command.to_string(),
            "ffmpeg -loglevel error -y \
             -to 5 -i media/in.mp4 \
             -ss 8 -to 12 -i media/in.mp4 \
             -map 0:v -map 0:a -c copy media/in-part0.mp4 \
             -map 1:v -map 1:a -c copy media/in-part1.mp4"
        );
    }

    #[test]
    fn test_concat_command() {
        let command = strategy().build_concat_command(&job());
        assert_eq!(
            command.to_string(),
            "ffmpeg -loglevel error -y -safe 0 -f concat -i media/in.mp4.list.txt \
             -c copy media/in-SponsorBlocked.mp4"
        );
    }

    #[test]
    fn test_manifest_contents() {
        let parts = vec![PathBuf::from(r"C:\v\in-part0.mp4"), PathBuf::from("/v/in-part1.mp4")];
        assert_eq!(
            manifest_contents(&parts),
            "file C:/v/in-part0.mp4\nfile /v/in-part1.mp4\n"
        );
    }

    #[test]
    fn test_manifest_entries_do_not_repeat_input_directory() {
        let parts: Vec<PathBuf> = (0..2)
            .map(|index| part_path(Path::new("videos/talk.mp4"), index))
            .collect();
        assert_eq!(
            manifest_for(Path::new("/home/user"), &parts),
            "file /home/user/videos/talk-part0.mp4\nfile /home/user/videos/talk-part1.mp4\n"
        );
    }
}
