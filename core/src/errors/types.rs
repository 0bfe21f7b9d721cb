//! Token validation errors
//!
//! A `TokenError` names the reason a compact token string was rejected. It is
//! the inspectable counterpart of the boolean returned by
//! `TokenService::validate_token`.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid algorithm")]
    InvalidAlgorithm,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::InvalidAlgorithm
            }
            ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
                claim: claim.clone(),
            },
            _ => TokenError::InvalidTokenFormat,
        }
    }
}
