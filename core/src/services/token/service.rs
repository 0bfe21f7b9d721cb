//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pixel_shared::config::JwtConfig;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RefreshTokenRepository;

use super::config::TokenServiceConfig;

/// Service for issuing and validating JWT access and refresh tokens
///
/// A `TokenService` only exists once its signing key has been derived, so every
/// method can assume a usable key. The keys are immutable; share the service
/// across request handlers behind an `Arc`.
pub struct TokenService<R: RefreshTokenRepository> {
    repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: RefreshTokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// The UTF-8 bytes of the configured secret are used directly as HMAC key
    /// material.
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token store
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A ready `TokenService`, or `DomainError::Config` if the secret is missing,
    /// too short for the algorithm, or the algorithm is not HMAC based
    pub fn new(repository: R, config: TokenServiceConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        info!(
            algorithm = ?config.algorithm,
            access_token_validity_secs = config.access_token_validity.num_seconds(),
            refresh_token_validity_secs = config.refresh_token_validity.num_seconds(),
            "Token service initialized"
        );

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Creates a token service from the shared JWT configuration
    pub fn from_jwt_config(repository: R, config: &JwtConfig) -> Result<Self, DomainError> {
        Self::new(repository, TokenServiceConfig::try_from(config)?)
    }

    /// Generates a signed access token for a user
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The user identifier stored in the `sub` claim
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact JWT valid for the configured access token lifetime
    /// * `Err(DomainError)` - Empty subject or signing failure
    pub fn create_access_token(&self, subject_id: &str) -> Result<String, DomainError> {
        if subject_id.is_empty() {
            return Err(DomainError::Validation {
                message: "Access token subject must not be empty".to_string(),
            });
        }

        let now = Utc::now();
        let expires_at = expiry_after(now, self.config.access_token_validity)?;
        let claims = Claims::new_access_token(subject_id, now, expires_at);
        let token = self.encode_jwt(&claims)?;

        debug!(subject = subject_id, exp = claims.exp, "Issued access token");
        Ok(token)
    }

    /// Generates a refresh token and stores it
    ///
    /// The token carries no subject; the owning user is only recorded in the
    /// stored row. The row is written before the token is returned, and a store
    /// failure means no token is handed out.
    ///
    /// # Arguments
    ///
    /// * `user_db_id` - Database identifier of the user
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The persisted refresh token
    /// * `Err(DomainError::Persistence)` - The store rejected the row
    pub async fn create_refresh_token(&self, user_db_id: i64) -> Result<String, DomainError> {
        let now = Utc::now();
        let expires_at = expiry_after(now, self.config.refresh_token_validity)?;
        let claims = Claims::new_refresh_token(now, expires_at);
        let token = self.encode_jwt(&claims)?;

        let refresh_token = RefreshToken::new(user_db_id, token.clone(), expires_at);
        self.repository.save(refresh_token).await.map_err(|e| {
            warn!(user_db_id, error = %e, "Failed to persist refresh token");
            e.into_persistence()
        })?;

        debug!(user_db_id, exp = claims.exp, "Issued refresh token");
        Ok(token)
    }

    /// Issues the access and refresh tokens handed out on login
    pub async fn issue_tokens(
        &self,
        subject_id: &str,
        user_db_id: i64,
    ) -> Result<TokenPair, DomainError> {
        let access_token = self.create_access_token(subject_id)?;
        let refresh_token = self.create_refresh_token(user_db_id).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.access_token_validity_in_seconds(),
        ))
    }

    /// Parses a token and verifies its signature, algorithm and expiry
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Why the token was rejected
    pub fn parse_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }

    /// Checks whether a token is well formed, correctly signed and unexpired
    ///
    /// Every failure collapses to `false`; use [`parse_claims`](Self::parse_claims)
    /// to learn the reason.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.parse_claims(token) {
            Ok(_) => true,
            Err(e) => {
                debug!(reason = %e, "Token validation failed");
                false
            }
        }
    }

    /// Extracts the subject of a valid access token
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The `sub` claim
    /// * `Err(DomainError::TokenParse)` - The token is invalid or has no subject
    ///   (refresh tokens never do; an empty `sub` counts as none)
    pub fn user_id_from_token(&self, token: &str) -> Result<String, DomainError> {
        let claims = self.parse_claims(token)?;
        match claims.subject() {
            Some(subject) => Ok(subject.to_string()),
            None => Err(TokenError::MissingClaim {
                claim: "sub".to_string(),
            }
            .into()),
        }
    }

    /// Access token lifetime in whole seconds
    pub fn access_token_validity_in_seconds(&self) -> i64 {
        self.config.access_token_validity.num_seconds()
    }

    /// Refresh token lifetime in whole seconds
    pub fn refresh_token_validity_in_seconds(&self) -> i64 {
        self.config.refresh_token_validity.num_seconds()
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| DomainError::TokenGeneration {
            message: e.to_string(),
        })
    }
}

fn expiry_after(issued_at: DateTime<Utc>, validity: Duration) -> Result<DateTime<Utc>, DomainError> {
    issued_at
        .checked_add_signed(validity)
        .ok_or_else(|| DomainError::TokenGeneration {
            message: "token expiry is out of range".to_string(),
        })
}
