// TOML config adapter - Configuration file loading

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::engine::StrategyKind;
use crate::error::{SbCutError, SbCutResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "sbcut.toml";

/// Layout of the configuration file: everything lives under `[sbcut]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub sbcut: FileSettings,
}

/// Settings a config file may set; absent keys keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub categories: Option<Vec<String>>,
    pub strategy: Option<StrategyKind>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub engine_log_level: Option<String>,
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
    pub overwrite: Option<bool>,
    pub cleanup_on_failure: Option<bool>,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from a TOML string
    pub fn parse(content: &str, origin: &Path) -> SbCutResult<FileSettings> {
        let parsed: ConfigFile =
            toml::from_str(content).map_err(|source| SbCutError::ConfigParseError {
                path: origin.display().to_string(),
                source,
            })?;
        Ok(parsed.sbcut)
    }

    /// Load configuration from `path`, which must exist
    pub fn load(path: &Path) -> SbCutResult<FileSettings> {
        let content = std::fs::read_to_string(path).map_err(|e| SbCutError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        info!("Loaded configuration from: {}", path.display());
        Self::parse(&content, path)
    }

    /// Load the explicit config file, or `sbcut.toml` when it exists, or nothing
    pub fn discover(explicit: Option<&Path>) -> SbCutResult<FileSettings> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            Ok(FileSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_file() {
        let content = r#"
            [sbcut]
            categories = ["Sponsor", "Self Promotion"]
            strategy = "split-concat"
            ffmpeg = "/usr/local/bin/ffmpeg"
            ffprobe = "/usr/local/bin/ffprobe"
            engine_log_level = "warning"
            log_level = "debug"
            json_logs = true
            overwrite = true
            cleanup_on_failure = true
        "#;

        let settings = TomlConfigAdapter::parse(content, Path::new("sbcut.toml")).unwrap();
        assert_eq!(
            settings.categories,
            Some(vec!["Sponsor".to_string(), "Self Promotion".to_string()])
        );
        assert_eq!(settings.strategy, Some(StrategyKind::SplitConcat));
        assert_eq!(settings.ffmpeg.as_deref(), Some("/usr/local/bin/ffmpeg"));
        assert_eq!(settings.engine_log_level.as_deref(), Some("warning"));
        assert_eq!(settings.json_logs, Some(true));
        assert_eq!(settings.cleanup_on_failure, Some(true));
    }

    #[test]
    fn test_parse_empty_file() {
        let settings = TomlConfigAdapter::parse("", Path::new("sbcut.toml")).unwrap();
        assert_eq!(settings, FileSettings::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = TomlConfigAdapter::parse("[sbcut]\ncrf = 18\n", Path::new("sbcut.toml"));
        assert!(matches!(result, Err(SbCutError::ConfigParseError { .. })));
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        let result = TomlConfigAdapter::parse(
            "[sbcut]\nstrategy = \"hybrid\"\n",
            Path::new("sbcut.toml"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[sbcut]\ncategories = [\"Outro\"]\n").unwrap();

        let settings = TomlConfigAdapter::discover(Some(&path)).unwrap();
        assert_eq!(settings.categories, Some(vec!["Outro".to_string()]));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let result = TomlConfigAdapter::discover(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(SbCutError::ConfigError { .. })));
    }
}
