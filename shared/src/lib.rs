//! Shared configuration and logging setup for the Pixel authentication layer
//!
//! This crate provides functionality used by the token service and by the
//! application that embeds it:
//! - Configuration types and loaders (`.env`, environment variables, TOML)
//! - Tracing subscriber initialization

pub mod config;
pub mod logging;

// Re-export commonly used items at crate root
pub use crate::config::{AppConfig, ConfigLoadError, Environment, JwtConfig, LogFormat, LoggingConfig};
pub use logging::init_tracing;
