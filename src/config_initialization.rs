//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use tracing::debug;

use crate::adapters::toml_config::{FileSettings, TomlConfigAdapter};
use crate::domain::model::SponsorCategories;
use crate::engine::{EngineSettings, StrategyKind};
use crate::error::{SbCutError, SbCutResult};

/// Log levels accepted for sbcut's own logging
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Values accepted by ffmpeg's `-loglevel`
pub const ENGINE_LOG_LEVELS: [&str; 9] = [
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub categories: SponsorCategories,
    pub strategy: StrategyKind,
    pub engine: EngineSettings,
    pub ffprobe: String,
    pub log_level: String,
    pub json_logs: bool,
    pub cleanup_on_failure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            categories: SponsorCategories::default(),
            strategy: StrategyKind::default(),
            engine: EngineSettings::default(),
            ffprobe: "ffprobe".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            cleanup_on_failure: false,
        }
    }
}

/// Overrides collected from command-line flags and their environment fallbacks
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub config: Option<PathBuf>,
    pub categories: Vec<String>,
    pub strategy: Option<StrategyKind>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub log_level: Option<String>,
    pub json_logs: bool,
    pub overwrite: bool,
    pub cleanup_on_failure: bool,
}

impl Settings {
    /// Apply values from a config file on top of the current settings
    pub fn merge_file(&mut self, file: FileSettings) -> SbCutResult<()> {
        if let Some(categories) = file.categories {
            self.categories = SponsorCategories::new(categories)?;
        }
        if let Some(strategy) = file.strategy {
            self.strategy = strategy;
        }
        if let Some(ffmpeg) = file.ffmpeg {
            self.engine.ffmpeg = ffmpeg;
        }
        if let Some(ffprobe) = file.ffprobe {
            self.ffprobe = ffprobe;
        }
        if let Some(level) = file.engine_log_level {
            self.engine.log_level = level;
        }
        if let Some(level) = file.log_level {
            self.log_level = level;
        }
        if let Some(json_logs) = file.json_logs {
            self.json_logs = json_logs;
        }
        if let Some(overwrite) = file.overwrite {
            self.engine.overwrite = overwrite;
        }
        if let Some(cleanup) = file.cleanup_on_failure {
            self.cleanup_on_failure = cleanup;
        }
        Ok(())
    }

    /// Apply command-line and environment overrides; flags only ever switch features on
    pub fn merge_overrides(&mut self, overrides: SettingsOverrides) -> SbCutResult<()> {
        if !overrides.categories.is_empty() {
            self.categories = SponsorCategories::new(overrides.categories)?;
        }
        if let Some(strategy) = overrides.strategy {
            self.strategy = strategy;
        }
        if let Some(ffmpeg) = overrides.ffmpeg {
            self.engine.ffmpeg = ffmpeg;
        }
        if let Some(ffprobe) = overrides.ffprobe {
            self.ffprobe = ffprobe;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self.json_logs |= overrides.json_logs;
        self.engine.overwrite |= overrides.overwrite;
        self.cleanup_on_failure |= overrides.cleanup_on_failure;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SbCutResult<()> {
        let level = self.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SbCutError::ConfigError {
                message: format!(
                    "Invalid log level: {}. Valid levels: {}",
                    self.log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if !ENGINE_LOG_LEVELS.contains(&self.engine.log_level.as_str()) {
            return Err(SbCutError::ConfigError {
                message: format!(
                    "Invalid engine log level: {}. Valid levels: {}",
                    self.engine.log_level,
                    ENGINE_LOG_LEVELS.join(", ")
                ),
            });
        }

        if self.engine.ffmpeg.is_empty() || self.ffprobe.is_empty() {
            return Err(SbCutError::ConfigError {
                message: "ffmpeg and ffprobe executables cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Resolve settings following precedence: CLI > Env > File > Defaults
///
/// Environment fallbacks are handled by clap, so by the time overrides arrive
/// here CLI and environment are already folded together.
pub fn initialize_settings(overrides: SettingsOverrides) -> SbCutResult<Settings> {
    let mut settings = Settings::default();

    let file = TomlConfigAdapter::discover(overrides.config.as_deref())?;
    settings.merge_file(file)?;
    settings.merge_overrides(overrides)?;
    settings.validate()?;

    debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}
