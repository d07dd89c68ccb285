//! # folio-config
//!
//! Layered configuration loading for Folio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOLIO_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `folio.toml` in the working directory
//! 4. User-level `~/.config/folio/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOLIO_SERVER__PORT` -> `server.port`,
//! `FOLIO_DATABASE__PATH` -> `database.path`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! The bare `FRONTEND_URL` variable (comma-separated origins) is also read
//! and appended to `cors.allowed_origins`.
//!
//! # Usage
//!
//! ```no_run
//! use folio_config::FolioConfig;
//!
//! let config = FolioConfig::load_with_dotenv(None).expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod cors;
mod database;
mod error;
mod general;
mod server;

pub use cors::{CorsConfig, split_origins};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    /// Comma-separated extra CORS origins.
    #[serde(default)]
    pub frontend_url: String,
}

impl FolioConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if any) before building the
    /// figment. This is the typical entry point for the server binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_file)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("folio.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment
            .merge(Env::raw().only(&["FRONTEND_URL"]))
            .merge(Env::prefixed("FOLIO_").split("__"))
    }

    /// All allowed CORS origins: the configured list plus `frontend_url`,
    /// without duplicates.
    #[must_use]
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = self.cors.allowed_origins.clone();
        for origin in split_origins(&self.frontend_url) {
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }
        origins
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path",
                reason: "must not be empty".into(),
            });
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.request_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.body_limit_bytes",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }
}
