use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ormkit_db::{connect_and_probe, ProbeOutcome};
use ormkit_kernel::Settings;

#[derive(Debug, Parser)]
#[command(name = "ormkit", version, about = "Database bootstrap tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ping the configured database once; exits non-zero when unreachable.
    Probe,
    /// Print the resolved database settings with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load ormkit settings")?;
    ormkit_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Probe => run_probe(&settings).await,
        Command::Config => print_config(&settings),
    }
}

async fn run_probe(settings: &Settings) -> anyhow::Result<()> {
    let (client, outcome) = connect_and_probe(&settings.database).await;

    if let Some(client) = client {
        if let Err(err) = client.close().await {
            tracing::warn!(error = %err, "failed to close database client");
        }
    }

    match outcome {
        ProbeOutcome::Connected => Ok(()),
        ProbeOutcome::Failed(reason) => bail!("database probe failed: {}", reason),
    }
}

fn print_config(settings: &Settings) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(&serde_json::json!({
        "environment": settings.environment,
        "database": settings.database,
    }))
    .with_context(|| "failed to render settings")?;

    println!("{rendered}");
    Ok(())
}
