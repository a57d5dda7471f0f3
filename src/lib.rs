//! ormkit application library
//!
//! Startup wiring for a generated project: one database client, built from
//! settings, probed once and shared with the rest of the application.

use anyhow::{bail, Context};
use ormkit_db::{connect_and_probe, shared, ClientSlot, DbClient, ProbeOutcome, SlotError};
use ormkit_kernel::Settings;

/// Everything downstream code needs after startup.
///
/// `client` is `None` when the settings could not produce one (malformed
/// `DATABASE_URL`, provider without a driver); `probe` then carries the reason.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub client: Option<DbClient>,
    pub probe: ProbeOutcome,
}

/// Build the client, publish it in the process-wide slot and probe it once.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<Bootstrap> {
    bootstrap_into(settings, shared::global()).await
}

/// [`bootstrap`] against an explicit slot.
///
/// Construction and connectivity failures are logged once and otherwise
/// ignored unless `database.require_probe` is set. Only a second bootstrap
/// into an occupied slot is always an error.
pub async fn bootstrap_into(settings: &Settings, slot: &ClientSlot) -> anyhow::Result<Bootstrap> {
    if slot.get().is_some() {
        return Err(SlotError::AlreadyInstalled)
            .with_context(|| "database client installed twice");
    }

    let (client, outcome) = connect_and_probe(&settings.database).await;

    if let Some(client) = &client {
        slot.install(client.clone())
            .with_context(|| "database client installed twice")?;

        tracing::info!(
            provider = %client.dialect(),
            "database client ready"
        );
    }

    if settings.database.require_probe {
        if let ProbeOutcome::Failed(reason) = &outcome {
            bail!("database probe failed: {}", reason);
        }
    }

    Ok(Bootstrap {
        client,
        probe: outcome,
    })
}
