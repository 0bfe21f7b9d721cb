//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Signing key derivation from the configured secret
//! - JWT access token generation and verification
//! - Refresh token issuance and persistence

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
