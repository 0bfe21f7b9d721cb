//! Authentication configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default access token lifetime: 1 hour
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 60 * 60;

/// Default refresh token lifetime: 7 days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 60 * 60 * 24 * 7;

/// JWT authentication configuration
///
/// The default secret is empty on purpose: the token service refuses to start
/// without one instead of signing with a placeholder key.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Shared HMAC secret; its UTF-8 bytes are the signing key
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing (default: HS256)
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
            algorithm: default_algorithm(),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// A missing `JWT_SECRET` leaves the secret empty; unparsable expiry values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRY);
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm());

        Self {
            secret,
            access_token_expiry,
            refresh_token_expiry,
            algorithm,
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Whether a non-blank secret has been supplied
    pub fn has_secret(&self) -> bool {
        !self.secret.trim().is_empty()
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
