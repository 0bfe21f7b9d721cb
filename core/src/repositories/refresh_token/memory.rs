//! In-memory implementation of RefreshTokenRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// In-memory refresh token store
///
/// Clones share the same rows, so a test can keep a handle while the service
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<Vec<RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the row holding exactly this token string
    pub async fn find_by_token(&self, token: &str) -> Option<RefreshToken> {
        let tokens = self.tokens.read().await;
        tokens.iter().find(|t| t.token == token).cloned()
    }

    /// All rows issued for a user, in insertion order
    pub async fn find_by_user_db_id(&self, user_db_id: i64) -> Vec<RefreshToken> {
        let tokens = self.tokens.read().await;
        tokens
            .iter()
            .filter(|t| t.user_db_id == user_db_id)
            .cloned()
            .collect()
    }

    /// Number of stored rows
    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<(), DomainError> {
        self.tokens.write().await.push(token);
        Ok(())
    }
}
