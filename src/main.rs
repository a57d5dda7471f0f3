use anyhow::Context;
use ormkit_kernel::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load ormkit settings")?;

    ormkit_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        provider = %settings.database.provider,
        "ormkit-app bootstrap starting"
    );

    let started = ormkit_app::bootstrap(&settings).await?;

    tracing::info!(
        connected = started.probe.is_connected(),
        "ormkit-app bootstrap complete"
    );

    Ok(())
}
