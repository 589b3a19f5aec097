// Domain models - Core types and data structures

use std::fmt;

use serde::Deserialize;

use crate::domain::errors::DomainError;

/// Literal prefix SponsorBlock-aware downloaders put in front of chapter titles
pub const SPONSORBLOCK_MARKER: &str = "[SponsorBlock]: ";

/// Chapter labels removed when nothing else is configured
pub const DEFAULT_SPONSOR_CATEGORIES: [&str; 2] = ["Sponsor", "Intro"];

/// Chapter record as reported by `ffprobe -show_chapters`
///
/// Times stay in their textual form until a chapter is actually used, so a
/// malformed time on an unrelated chapter never aborts a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chapter {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub tags: ChapterTags,
}

/// Chapter metadata tags
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChapterTags {
    #[serde(default)]
    pub title: String,
}

impl Chapter {
    /// Create a chapter from already-formatted times and a title
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            tags: ChapterTags { title: title.into() },
        }
    }

    pub fn title(&self) -> &str {
        &self.tags.title
    }

    /// Chapter start in seconds
    pub fn start_seconds(&self) -> Result<f64, DomainError> {
        parse_seconds(&self.start_time, "start_time")
    }

    /// Chapter end in seconds
    pub fn end_seconds(&self) -> Result<f64, DomainError> {
        parse_seconds(&self.end_time, "end_time")
    }

    /// Classify this chapter by its title
    pub fn marker(&self) -> ChapterMarker<'_> {
        ChapterMarker::parse(self.title())
    }
}

fn parse_seconds(value: &str, field: &str) -> Result<f64, DomainError> {
    value.trim().parse::<f64>().map_err(|e| {
        DomainError::ParseFailed(format!("Invalid chapter {} '{}': {}", field, value, e))
    })
}

/// Top-level document printed by `ffprobe -print_format json -show_chapters`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterListing {
    #[serde(default)]
    pub chapters: Option<Vec<Chapter>>,
}

/// Result of parsing a chapter title
///
/// Grammar: `marker := "[SponsorBlock]: " category`. Anything else is `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterMarker<'a> {
    /// Title carried the SponsorBlock marker; holds the category text after it
    Sponsor(&'a str),
    /// Ordinary chapter
    Plain,
}

impl<'a> ChapterMarker<'a> {
    pub fn parse(title: &'a str) -> Self {
        match title.strip_prefix(SPONSORBLOCK_MARKER) {
            Some(category) => ChapterMarker::Sponsor(category),
            None => ChapterMarker::Plain,
        }
    }

    /// Category text, if this is a SponsorBlock chapter
    pub fn category(&self) -> Option<&'a str> {
        match self {
            ChapterMarker::Sponsor(category) => Some(category),
            ChapterMarker::Plain => None,
        }
    }
}

/// Ordered list of category labels whose chapters get cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SponsorCategories {
    labels: Vec<String>,
}

impl SponsorCategories {
    /// Create a category set, rejecting an empty or blank list
    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(DomainError::BadArgs(
                "At least one sponsor category is required".to_string(),
            ));
        }
        if labels.iter().any(|label| label.is_empty()) {
            return Err(DomainError::BadArgs(
                "Sponsor categories cannot be empty strings".to_string(),
            ));
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// First configured label contained in `category` (case-sensitive substring match)
    pub fn first_match(&self, category: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| category.contains(label.as_str()))
            .map(String::as_str)
    }
}

impl Default for SponsorCategories {
    fn default() -> Self {
        Self {
            labels: DEFAULT_SPONSOR_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for SponsorCategories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join(", "))
    }
}

/// Time range of the input to keep, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Exact zero-length check; no epsilon
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.duration() == 0.0
    }

    /// Segment starts at the very beginning of the input
    #[allow(clippy::float_cmp)]
    pub fn starts_at_origin(&self) -> bool {
        self.start == 0.0
    }
}

impl From<(f64, f64)> for Segment {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}
