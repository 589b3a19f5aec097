//! Cutting engine: ffmpeg command construction and the two cut strategies

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::Segment;
use crate::ports::ExecutePort;

pub mod filter_graph;
pub mod split_concat;

pub use filter_graph::FilterGraphStrategy;
pub use split_concat::SplitConcatStrategy;

/// A single engine invocation as an argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EngineCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument
    pub fn path_arg(self, path: &Path) -> Self {
        let path = path.to_string_lossy().into_owned();
        self.arg(path)
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Engine-level settings shared by both strategies
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// ffmpeg executable
    pub ffmpeg: String,
    /// Value passed to `-loglevel`
    pub log_level: String,
    /// Pass `-y` to the single-pass transcode
    pub overwrite: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            log_level: "error".to_string(),
            overwrite: false,
        }
    }
}

impl EngineSettings {
    /// `ffmpeg -loglevel <level>` prefix every invocation starts with
    pub fn base_command(&self) -> EngineCommand {
        EngineCommand::new(&self.ffmpeg).args(["-loglevel", self.log_level.as_str()])
    }
}

/// Everything a strategy needs to produce the output file
#[derive(Debug, Clone, PartialEq)]
pub struct CutJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub segments: Vec<Segment>,
}

/// Interchangeable way of turning keep-segments into an output file
pub trait CutStrategy {
    fn name(&self) -> &'static str;

    fn run(&self, job: &CutJob) -> Result<(), DomainError>;
}

/// Available cut strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Trim and concatenate inside one ffmpeg filter graph (re-encodes)
    #[default]
    FilterGraph,
    /// Stream-copy each segment to a part file, then concat-demux the parts
    SplitConcat,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::FilterGraph => write!(f, "filter-graph"),
            StrategyKind::SplitConcat => write!(f, "split-concat"),
        }
    }
}

/// Run `command`, echoing the command and each output line to the console
pub fn run_to_completion(executor: &dyn ExecutePort, command: &EngineCommand) -> Result<(), DomainError> {
    info!("Running: {}", command);
    println!("{}", command);

    for line in executor.execute(command)? {
        println!("{}", line?);
    }

    Ok(())
}
