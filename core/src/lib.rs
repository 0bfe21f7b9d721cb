//! # Pixel Core
//!
//! Token issuance and validation for the Pixel authentication layer.
//! This crate contains the token entities, the refresh token repository
//! interface, the token service and the error types they share.
//!
//! ```no_run
//! use pixel_core::{InMemoryRefreshTokenRepository, TokenService, TokenServiceConfig};
//!
//! # async fn example() -> Result<(), pixel_core::DomainError> {
//! let config = TokenServiceConfig::new("test-secret-key-that-is-long-enough-1234567890");
//! let service = TokenService::new(InMemoryRefreshTokenRepository::new(), config)?;
//!
//! let access_token = service.create_access_token("user-42")?;
//! let refresh_token = service.create_refresh_token(42).await?;
//!
//! assert!(service.validate_token(&access_token));
//! assert_eq!(service.user_id_from_token(&access_token)?, "user-42");
//! # let _ = refresh_token;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, RefreshToken, TokenPair,
    ACCESS_TOKEN_VALIDITY_SECONDS, REFRESH_TOKEN_VALIDITY_SECONDS,
};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
pub use services::{TokenService, TokenServiceConfig};
