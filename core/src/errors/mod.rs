//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or unusable configuration; fatal at startup
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The refresh token store rejected a write
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Token generation failed: {message}")]
    TokenGeneration { message: String },

    /// A token could not be parsed, verified or read
    #[error(transparent)]
    TokenParse(#[from] TokenError),
}

impl DomainError {
    /// Reclassify any error coming out of a store as a persistence failure
    pub fn into_persistence(self) -> Self {
        match self {
            DomainError::Persistence { .. } => self,
            other => DomainError::Persistence {
                message: other.to_string(),
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
