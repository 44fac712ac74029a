//! Process configuration: where the database lives and how long a pending
//! confirmation may take. The core itself never reads credentials or opens
//! connections; the binary resolves these settings and hands the core an
//! already-open connection.

use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub confirmation_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Path of the SQLite file, or ":memory:" for a transient store.
    pub path: String,
}

impl Settings {
    /// Defaults, overridden by an optional `spaceways.toml` next to the
    /// working directory, overridden in turn by `SPACEWAYS_*` environment
    /// variables (e.g. `SPACEWAYS_DATABASE__PATH`).
    pub fn load() -> Result<Settings> {
        let settings = Config::builder()
            .set_default("database.path", "spaceways.db")?
            .set_default("confirmation_timeout_seconds", 60)?
            .add_source(File::with_name("spaceways").required(false))
            .add_source(
                Environment::with_prefix("SPACEWAYS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                path: "spaceways.db".to_string(),
            },
            confirmation_timeout_seconds: 60,
        }
    }
}
