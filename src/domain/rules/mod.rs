// Domain rules - Business logic and policies

use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for turning tagged chapters into keep-segments
pub struct SegmentCalculator;

impl SegmentCalculator {
    /// Compute the ordered ranges of the input to keep
    ///
    /// Every chapter whose SponsorBlock category contains one of `categories`
    /// closes the current keep-segment at its start and reopens the cursor at
    /// its end. The tail up to `total_duration` is always appended, then
    /// zero-length segments are dropped. An empty result means nothing is left
    /// to keep.
    ///
    /// Chapter ordering is not validated: overlapping or reversed chapters
    /// produce segments exactly as the arithmetic dictates.
    pub fn keep_segments(
        chapters: &[Chapter],
        categories: &SponsorCategories,
        total_duration: f64,
    ) -> Result<Vec<Segment>, DomainError> {
        let mut segments = Vec::new();
        let mut timestamp = 0.0;

        for chapter in chapters {
            let Some(category) = chapter.marker().category() else {
                continue;
            };
            let Some(label) = categories.first_match(category) else {
                debug!("Keeping SponsorBlock chapter '{}'", chapter.title());
                continue;
            };

            let start = chapter.start_seconds()?;
            let end = chapter.end_seconds()?;
            info!(
                "Removing chapter '{}' ({} - {}) matched by '{}'",
                chapter.title(),
                chapter.start_time,
                chapter.end_time,
                label
            );

            segments.push(Segment::new(timestamp, start));
            timestamp = end;
        }

        segments.push(Segment::new(timestamp, total_duration));

        Ok(Self::drop_degenerate(segments))
    }

    /// Remove segments whose duration is exactly zero
    pub fn drop_degenerate(segments: Vec<Segment>) -> Vec<Segment> {
        segments
            .into_iter()
            .filter(|segment| {
                debug!("Segment {} duration {}", segment, segment.duration());
                !segment.is_degenerate()
            })
            .collect()
    }
}
