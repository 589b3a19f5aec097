// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::error::{SbCutError, SbCutResult};

/// Tracing log adapter
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Install the global subscriber
    ///
    /// `RUST_LOG` wins when set; otherwise `level` applies to this crate only so
    /// engine chatter from dependencies stays quiet.
    pub fn init(level: &str, json_output: bool) -> SbCutResult<()> {
        let filter = Self::filter(level)?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let result = if json_output {
            builder.json().try_init()
        } else {
            builder.try_init()
        };

        result.map_err(|e| SbCutError::LoggingError {
            message: e.to_string(),
        })
    }

    /// Filter used when `RUST_LOG` is absent
    pub fn filter(level: &str) -> SbCutResult<EnvFilter> {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return Ok(EnvFilter::from_default_env());
        }

        EnvFilter::try_new(format!("sbcut={}", level.to_lowercase())).map_err(|e| {
            SbCutError::LoggingError {
                message: format!("Invalid log level '{}': {}", level, e),
            }
        })
    }
}
