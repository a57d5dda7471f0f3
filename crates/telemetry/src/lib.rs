//! Tracing subscriber bootstrap.

use anyhow::Context;
use ormkit_kernel::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Logs go to stderr. `RUST_LOG` wins over the configured filter. Calling this
/// twice is harmless: the second subscriber is dropped.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = build_filter(settings)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };

    if installed {
        tracing::debug!(format = ?settings.log_format, "telemetry initialized");
    }

    Ok(())
}

fn build_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid log filter '{}'", settings.filter)),
    }
}
