//! Token entities for JWT-based authentication.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access token validity (1 hour)
pub const ACCESS_TOKEN_VALIDITY_SECONDS: i64 = 60 * 60;

/// Refresh token validity (7 days)
pub const REFRESH_TOKEN_VALIDITY_SECONDS: i64 = 60 * 60 * 24 * 7;

/// Claims structure for JWT payload
///
/// Access tokens carry a subject; refresh tokens do not, their owner is only
/// known through the stored [`RefreshToken`] row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `subject` - The user identifier placed in `sub`
    /// * `issued_at` - Issuance instant
    /// * `expires_at` - Expiry instant
    pub fn new_access_token(subject: &str, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: Some(subject.to_string()),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Creates new claims for a refresh token (no subject)
    pub fn new_refresh_token(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: None,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the subject; an empty `sub` counts as absent
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.is_empty())
    }
}

/// Refresh token row handed to the persistence layer
///
/// Several rows may exist for the same user; the store enforces no uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Database identifier of the owning user
    pub user_db_id: i64,

    /// Compact signed token string
    pub token: String,

    /// Expiry in server local time
    pub expiry_date: NaiveDateTime,
}

impl RefreshToken {
    /// Creates a refresh token row, converting `expires_at` to local time
    pub fn new(user_db_id: i64, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_db_id,
            token,
            expiry_date: expires_at.with_timezone(&Local).naive_local(),
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Local::now().naive_local() > self.expiry_date
    }
}

/// Token pair returned to the client on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, access_expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
        }
    }
}
