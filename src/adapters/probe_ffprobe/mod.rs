//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` through an [`ExecutePort`] and parses its output.

use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::EngineCommand;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    executor: Rc<dyn ExecutePort>,
    ffprobe: String,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using the given executable
    pub fn new(executor: Rc<dyn ExecutePort>, ffprobe: impl Into<String>) -> Self {
        Self {
            executor,
            ffprobe: ffprobe.into(),
        }
    }

    /// `ffprobe -v error -show_entries format=duration -of default=noprint_wrappers=1:nokey=1 <path>`
    pub fn duration_command(&self, path: &Path) -> EngineCommand {
        EngineCommand::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .path_arg(path)
    }

    /// `ffprobe -i <path> -print_format json -show_chapters -loglevel error`
    pub fn chapters_command(&self, path: &Path) -> EngineCommand {
        EngineCommand::new(&self.ffprobe)
            .arg("-i")
            .path_arg(path)
            .args(["-print_format", "json", "-show_chapters", "-loglevel", "error"])
    }
}

impl ProbePort for FFprobeAdapter {
    fn video_duration(&self, path: &Path) -> Result<f64, DomainError> {
        let output = self.executor.capture(&self.duration_command(path))?;
        let duration = parse_duration(&output)?;
        info!("Video duration: {}s", duration);
        Ok(duration)
    }

    fn video_chapters(&self, path: &Path) -> Result<Option<Vec<Chapter>>, DomainError> {
        let output = self.executor.capture(&self.chapters_command(path))?;
        let chapters = parse_chapters(&output)?;
        debug!(
            "Found {} chapters in {}",
            chapters.as_ref().map_or(0, Vec::len),
            path.display()
        );
        Ok(chapters)
    }
}

/// Parse the plain-text duration printed by ffprobe
pub fn parse_duration(output: &str) -> Result<f64, DomainError> {
    let text = output.trim();
    text.parse::<f64>()
        .map_err(|e| DomainError::ParseFailed(format!("Invalid duration '{}': {}", text, e)))
}

/// Parse the JSON chapter listing; only a missing `chapters` key yields `None`
pub fn parse_chapters(output: &str) -> Result<Option<Vec<Chapter>>, DomainError> {
    let listing: ChapterListing = serde_json::from_str(output)
        .map_err(|e| DomainError::ParseFailed(format!("Invalid chapter JSON: {}", e)))?;

    Ok(listing.chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Returns canned output and remembers every command it was asked to run
    struct CannedExecutor {
        output: Result<String, DomainError>,
        seen: RefCell<Vec<EngineCommand>>,
    }

    impl ExecutePort for CannedExecutor {
        fn execute(&self, command: &EngineCommand) -> Result<OutputLines, DomainError> {
            self.seen.borrow_mut().push(command.clone());
            let lines: Vec<Result<String, DomainError>> = match &self.output {
                Ok(text) => text.lines().map(|line| Ok(line.to_string())).collect(),
                Err(e) => vec![Err(e.clone())],
            };
            Ok(Box::new(lines.into_iter()))
        }
    }

    fn adapter(output: Result<&str, DomainError>) -> (FFprobeAdapter, Rc<CannedExecutor>) {
        let executor = Rc::new(CannedExecutor {
            output: output.map(str::to_string),
            seen: RefCell::new(Vec::new()),
        });
        (FFprobeAdapter::new(executor.clone(), "ffprobe"), executor)
    }

    #[test]
    fn test_duration_command() {
        let (probe, _) = adapter(Ok(""));
        assert_eq!(
            probe.duration_command(Path::new("a b.mkv")).to_string(),
            "ffprobe -v error -show_entries format=duration -of default=noprint_wrappers=1:nokey=1 \"a b.mkv\""
        );
    }

    #[test]
    fn test_chapters_command() {
        let (probe, _) = adapter(Ok(""));
        assert_eq!(
            probe.chapters_command(Path::new("a.mkv")).to_string(),
            "ffprobe -i a.mkv -print_format json -show_chapters -loglevel error"
        );
    }

    #[test]
    fn test_video_duration() {
        let (probe, executor) = adapter(Ok("634.221000\n"));
        assert_eq!(probe.video_duration(Path::new("a.mkv")).unwrap(), 634.221);
        assert_eq!(executor.seen.borrow().len(), 1);
    }

    #[test]
    fn test_video_duration_not_a_number() {
        let (probe, _) = adapter(Ok("N/A\n"));
        assert!(matches!(
            probe.video_duration(Path::new("a.mkv")),
            Err(DomainError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_video_duration_process_failure() {
        let (probe, _) = adapter(Err(DomainError::ProcessFailed("exit 1".to_string())));
        assert!(matches!(
            probe.video_duration(Path::new("a.mkv")),
            Err(DomainError::ProcessFailed(_))
        ));
    }

    #[test]
    fn test_video_chapters() {
        let json = r#"{
            "chapters": [
                { "start_time": "0.000000", "end_time": "4.000000", "tags": { "title": "[SponsorBlock]: Intro" } }
            ]
        }"#;
        let (probe, _) = adapter(Ok(json));
        let chapters = probe.video_chapters(Path::new("a.mkv")).unwrap().unwrap();
        assert_eq!(chapters, vec![Chapter::new("0.000000", "4.000000", "[SponsorBlock]: Intro")]);
    }

    #[test]
    fn test_no_chapters_key() {
        assert_eq!(parse_chapters("{}").unwrap(), None);
    }

    #[test]
    fn test_empty_chapter_array_is_kept() {
        assert_eq!(parse_chapters(r#"{ "chapters": [ ] }"#).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_malformed_chapter_json() {
        assert!(matches!(parse_chapters("{ chapters"), Err(DomainError::ParseFailed(_))));
        assert!(matches!(parse_chapters(""), Err(DomainError::ParseFailed(_))));
    }
}
