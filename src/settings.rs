use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::postgres::PgConnectOptions;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        // Get the path to the settings directory
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            // Include the base settings
            .add_source(File::from(base_path.join("base")).required(true))
            // Include the runtime settings
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Override/include any settings from environment variables
            // NOTE: Should be used for any prod secrets. Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,

    static_dir: PathBuf,
    #[serde(default, deserialize_with = "deserialize_bool_from_anything")]
    validate_email_format: bool,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
    /// The directory of publicly served files
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
    /// Whether submitted emails must pass the format check
    pub fn validate_email_format(&self) -> bool {
        self.validate_email_format
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    connection_string: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    connect_timeout_seconds: u64,
    #[serde(default, deserialize_with = "deserialize_bool_from_anything")]
    run_migrations: bool,
}

impl DatabaseSettings {
    /// The database connection options parsed from the connection string
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        use secrecy::ExposeSecret;

        PgConnectOptions::from_str(self.connection_string.expose_secret())
            .context("Failed to parse database connection string")
    }
    /// Upper bound on establishing the startup connection
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
    /// Whether pending migrations are applied at startup
    pub fn run_migrations(&self) -> bool {
        self.run_migrations
    }
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    filter: String,
}

impl LogSettings {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset
    pub fn filter(&self) -> &str {
        &self.filter
    }
}
