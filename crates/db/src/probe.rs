//! Startup connectivity probe.
//!
//! A single ping against the configured database. The outcome is logged and
//! handed back; nothing here returns an error or panics, so the caller keeps
//! running whatever the database says.

use tokio::task::JoinHandle;

use crate::{DatabaseSettings, DbClient};

const FAILURE_MESSAGE: &str = "unable to connect to the database";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Connected,
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ProbeOutcome::Connected)
    }
}

/// Ping the database once and log the result.
pub async fn probe(client: &DbClient) -> ProbeOutcome {
    match client.ping().await {
        Ok(()) => {
            tracing::info!(
                provider = %client.dialect(),
                "connection to the database has been established successfully"
            );
            ProbeOutcome::Connected
        }
        Err(err) => {
            let reason = client.url().scrub(&err.to_string());
            tracing::error!(
                provider = %client.dialect(),
                url = %client.url(),
                error = %reason,
                "{}",
                FAILURE_MESSAGE
            );
            ProbeOutcome::Failed(reason)
        }
    }
}

/// Build the client and probe it, treating a rejected configuration like an
/// unreachable server: one error line, a `Failed` outcome and no client.
pub async fn connect_and_probe(settings: &DatabaseSettings) -> (Option<DbClient>, ProbeOutcome) {
    match DbClient::connect(settings).await {
        Ok(client) => {
            let outcome = probe(&client).await;
            (Some(client), outcome)
        }
        Err(err) => {
            let reason = err.to_string();
            tracing::error!(
                provider = %settings.provider,
                error = %reason,
                "{}",
                FAILURE_MESSAGE
            );
            (None, ProbeOutcome::Failed(reason))
        }
    }
}

/// Run [`probe`] in the background so startup is not held up.
pub fn spawn_probe(client: DbClient) -> JoinHandle<ProbeOutcome> {
    tokio::spawn(async move { probe(&client).await })
}
