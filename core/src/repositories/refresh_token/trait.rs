//! Refresh token repository trait defining the persistence capability used by
//! the token service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence
///
/// The token service only ever writes: lookups, rotation and expiry sweeps belong
/// to the embedding application. Implementations should report failures as
/// `DomainError::Persistence`; anything else is reclassified as one by the caller.
///
/// Timeouts and retries are the implementation's business; the token service
/// adds none of its own.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Save a newly issued refresh token
    ///
    /// # Arguments
    /// * `token` - The row to persist (user id, token string, expiry)
    ///
    /// # Returns
    /// * `Ok(())` - The row was written
    /// * `Err(DomainError)` - The write failed
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use pixel_core::repositories::RefreshTokenRepository;
    /// # use pixel_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl RefreshTokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token = RefreshToken::new(42, "header.payload.signature".to_string(), Utc::now() + Duration::days(7));
    /// repo.save(token).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn save(&self, token: RefreshToken) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: RefreshTokenRepository + ?Sized> RefreshTokenRepository for Arc<T> {
    async fn save(&self, token: RefreshToken) -> Result<(), DomainError> {
        (**self).save(token).await
    }
}
