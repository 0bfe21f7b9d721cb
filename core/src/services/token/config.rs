//! Configuration for the token service

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;
use pixel_shared::config::JwtConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_VALIDITY_SECONDS, REFRESH_TOKEN_VALIDITY_SECONDS};
use crate::errors::DomainError;

/// Longest accepted token lifetime (100 years)
pub const MAX_TOKEN_VALIDITY_DAYS: i64 = 36_525;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_validity: Duration,
    /// Refresh token lifetime
    pub refresh_token_validity: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            algorithm: Algorithm::HS256,
            access_token_validity: Duration::seconds(ACCESS_TOKEN_VALIDITY_SECONDS),
            refresh_token_validity: Duration::seconds(REFRESH_TOKEN_VALIDITY_SECONDS),
        }
    }
}

impl fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_validity", &self.access_token_validity)
            .field("refresh_token_validity", &self.refresh_token_validity)
            .finish()
    }
}

impl TokenServiceConfig {
    /// Default configuration signing with `secret`
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_token_validity(mut self, validity: Duration) -> Self {
        self.access_token_validity = validity;
        self
    }

    pub fn with_refresh_token_validity(mut self, validity: Duration) -> Self {
        self.refresh_token_validity = validity;
        self
    }

    /// Checks that the secret can serve as an HMAC key for the algorithm
    ///
    /// The secret must be non-blank and at least as long as the digest of the
    /// chosen HMAC algorithm (32, 48 or 64 bytes).
    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(DomainError::Config {
                message: "JWT secret is not configured".to_string(),
            });
        }

        let min_key_len = match self.algorithm {
            Algorithm::HS256 => 32,
            Algorithm::HS384 => 48,
            Algorithm::HS512 => 64,
            other => {
                return Err(DomainError::Config {
                    message: format!("{:?} is not an HMAC algorithm", other),
                })
            }
        };

        let key_len = self.jwt_secret.as_bytes().len();
        if key_len < min_key_len {
            return Err(DomainError::Config {
                message: format!(
                    "JWT secret is {} bytes; {:?} requires at least {} bytes",
                    key_len, self.algorithm, min_key_len
                ),
            });
        }

        check_validity("access", self.access_token_validity)?;
        check_validity("refresh", self.refresh_token_validity)?;

        Ok(())
    }
}

/// Rejects lifetimes whose expiry instant cannot be represented.
/// Negative lifetimes stay allowed; they produce already expired tokens.
fn check_validity(kind: &str, validity: Duration) -> Result<(), DomainError> {
    let max = Duration::days(MAX_TOKEN_VALIDITY_DAYS);
    if validity > max || validity < -max || Utc::now().checked_add_signed(validity).is_none() {
        return Err(DomainError::Config {
            message: format!(
                "{} token lifetime of {}s is out of range",
                kind,
                validity.num_seconds()
            ),
        });
    }
    Ok(())
}

/// Converts a configured lifetime in seconds, which must be positive
fn validity_from_seconds(kind: &str, seconds: i64) -> Result<Duration, DomainError> {
    if seconds <= 0 {
        return Err(DomainError::Config {
            message: format!("{} token expiry must be positive, got {}", kind, seconds),
        });
    }
    Duration::try_seconds(seconds).ok_or_else(|| DomainError::Config {
        message: format!("{} token expiry of {}s is out of range", kind, seconds),
    })
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Config {
            message: format!("Unknown JWT algorithm: {}", config.algorithm),
        })?;

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            access_token_validity: validity_from_seconds("access", config.access_token_expiry)?,
            refresh_token_validity: validity_from_seconds("refresh", config.refresh_token_expiry)?,
        })
    }
}
