use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use ormkit_db::DatabaseSettings;
use serde::{Deserialize, Serialize};

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "ORMKIT_ENV";
const CONFIG_DIR_ENV: &str = "ORMKIT_CONFIG_DIR";
const ENV_PREFIX: &str = "ORMKIT";

/// Unprefixed variables generated projects document for their users.
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DATABASE_PROVIDER_ENV: &str = "DATABASE_PROVIDER";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// `ORMKIT_*` variables and finally `DATABASE_URL` / `DATABASE_PROVIDER`.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let environment = Environment::parse(&environment)?;

        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to repo root `config` directory.
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, environment)
    }

    /// Same layering as [`Settings::load`] against an explicit config directory.
    /// Does not read `.env`.
    pub fn load_from(config_dir: &Path, environment: Environment) -> anyhow::Result<Self> {
        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment.as_str()));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var(DATABASE_URL_ENV).ok())
            .with_context(|| format!("failed to apply {}", DATABASE_URL_ENV))?
            .set_override_option(
                "database.provider",
                std::env::var(DATABASE_PROVIDER_ENV).ok(),
            )
            .with_context(|| format!("failed to apply {}", DATABASE_PROVIDER_ENV))?;

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = environment;

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// Fallback filter directive when `RUST_LOG` is unset.
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ormkit_db::Dialect;
    use serial_test::serial;

    use super::*;

    fn clear_database_env() {
        std::env::remove_var(DATABASE_URL_ENV);
        std::env::remove_var(DATABASE_PROVIDER_ENV);
        std::env::remove_var("ORMKIT_DATABASE__MAX_CONNECTIONS");
    }

    fn write_config(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_telemetry_is_pretty_info() {
        let settings = Settings::default();
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
        assert_eq!(settings.telemetry.filter, "info");
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = Environment::parse("qa").unwrap_err();
        assert!(err.to_string().contains("unsupported environment 'qa'"));
    }

    #[test]
    #[serial]
    fn reads_database_from_config_files() {
        clear_database_env();
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "base.toml",
            r#"
            [database]
            url = "sqlite::memory:"
            provider = "sqlite"
            max_connections = 3
            "#,
        );
        write_config(
            dir.path(),
            "staging.toml",
            r#"
            [database]
            require_probe = true
            "#,
        );

        let settings = Settings::load_from(dir.path(), Environment::Staging).unwrap();

        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.database.provider, Dialect::Sqlite);
        assert_eq!(
            settings.database.url.as_ref().map(|url| url.as_str()),
            Some("sqlite::memory:")
        );
        assert_eq!(settings.database.max_connections, Some(3));
        assert!(settings.database.require_probe);
    }

    #[test]
    #[serial]
    fn database_env_vars_override_config_files() {
        clear_database_env();
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "base.toml",
            r#"
            [database]
            url = "sqlite::memory:"
            provider = "sqlite"
            "#,
        );
        std::env::set_var(DATABASE_URL_ENV, "mysql://root:pw@localhost:3306/app");
        std::env::set_var(DATABASE_PROVIDER_ENV, "mariadb");
        std::env::set_var("ORMKIT_DATABASE__MAX_CONNECTIONS", "7");

        let result = Settings::load_from(dir.path(), Environment::Local);
        clear_database_env();
        let settings = result.unwrap();

        assert_eq!(settings.database.provider, Dialect::Mariadb);
        assert_eq!(
            settings.database.url.as_ref().map(|url| url.as_str()),
            Some("mysql://root:pw@localhost:3306/app")
        );
        assert_eq!(settings.database.max_connections, Some(7));
    }

    #[test]
    #[serial]
    fn unknown_provider_fails_to_load() {
        clear_database_env();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(DATABASE_PROVIDER_ENV, "oracle");

        let result = Settings::load_from(dir.path(), Environment::Local);
        clear_database_env();

        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("oracle"));
    }

    #[test]
    #[serial]
    fn missing_files_and_vars_yield_defaults() {
        clear_database_env();
        let dir = tempfile::tempdir().unwrap();

        let settings = Settings::load_from(dir.path(), Environment::Production).unwrap();

        assert_eq!(settings.environment, Environment::Production);
        assert!(settings.database.url.is_none());
        assert_eq!(settings.database.provider, Dialect::Postgres);
    }
}
