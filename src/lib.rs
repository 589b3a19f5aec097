//! sbcut library
//!
//! Computes which parts of a video to keep from its SponsorBlock-tagged
//! chapters and drives ffmpeg to produce the trimmed file.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{Chapter, ChapterMarker, Segment, SponsorCategories};
pub use error::{SbCutError, SbCutResult};
