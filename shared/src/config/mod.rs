//! Configuration module
//!
//! - `auth` - JWT secret, algorithm and token lifetimes
//! - `environment` - Environment detection and logging configuration
//!
//! Configuration can be assembled three ways: [`AppConfig::from_env`] for plain
//! environment variables (plus `.env` files), [`AppConfig::load`] for a TOML file
//! overlaid with `PIXEL_`-prefixed variables, and [`AppConfig::from_toml`] for an
//! in-memory document with the same overlay.

pub mod auth;
pub mod environment;

use std::path::Path;

use ::config::{Config, ConfigBuilder, File, FileFormat};
use ::config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Prefix for environment variable overrides, e.g. `PIXEL_JWT__SECRET`
pub const ENV_PREFIX: &str = "PIXEL";

/// Errors raised while assembling layered configuration
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to load configuration: {0}")]
    Source(#[from] ::config::ConfigError),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` and the environment specific `.env.<environment>` file when
    /// present; variables already set in the process take precedence.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();

        Self {
            environment,
            jwt: JwtConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from an optional TOML file overlaid with environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        Self::build(builder)
    }

    /// Load configuration from a TOML document overlaid with environment variables
    pub fn from_toml(contents: &str) -> Result<Self, ConfigLoadError> {
        Self::build(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigLoadError> {
        let config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
