//! Tracing subscriber bootstrap.

use anyhow::Context;
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` wins, then the configured level, then `info`.
pub fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global fmt subscriber in pretty or JSON form.
///
/// Fails if a global subscriber is already set.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings);

    match settings.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
    .with_context(|| "failed to install tracing subscriber")?;

    tracing::debug!(
        target: "bookshelf-telemetry",
        format = ?settings.log_format,
        level = %settings.level,
        "telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_falls_back_to_a_usable_filter() {
        let settings = TelemetrySettings {
            log_format: LogFormat::Pretty,
            level: "not a [valid directive".to_string(),
        };
        // Must not panic regardless of RUST_LOG in the test environment.
        let _ = env_filter(&settings);
    }

    #[test]
    fn second_init_reports_an_error() {
        let settings = TelemetrySettings::default();
        // The first call may fail too if another test already installed one.
        let _ = init(&settings);
        assert!(init(&settings).is_err());
    }
}
