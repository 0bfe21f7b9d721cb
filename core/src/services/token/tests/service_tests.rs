//! Unit tests for token service

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Local};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use pixel_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, RefreshToken};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

const SECRET: &str = "test-secret-key-that-is-long-enough-1234567890";
const OTHER_SECRET: &str = "another-secret-key-that-is-long-enough-0987654321";

/// Repository whose writes always fail
struct FailingRepository {
    error: DomainError,
}

#[async_trait]
impl RefreshTokenRepository for FailingRepository {
    async fn save(&self, _token: RefreshToken) -> Result<(), DomainError> {
        Err(self.error.clone())
    }
}

fn create_test_service() -> (TokenService<InMemoryRefreshTokenRepository>, InMemoryRefreshTokenRepository) {
    let repository = InMemoryRefreshTokenRepository::new();
    let service = TokenService::new(repository.clone(), TokenServiceConfig::new(SECRET))
        .expect("Failed to create token service");
    (service, repository)
}

fn decode_payload(token: &str) -> serde_json::Value {
    let payload = token.split('.').nth(1).unwrap();
    let bytes = URL_SAFE_NO_PAD.decode(payload).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_empty_secret_is_config_error() {
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), TokenServiceConfig::new(""));
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_blank_secret_is_config_error() {
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), TokenServiceConfig::new("    "));
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_default_config_has_no_secret() {
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), TokenServiceConfig::default());
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_short_secret_is_config_error() {
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), TokenServiceConfig::new("too-short"));
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_key_length_follows_algorithm() {
    // 46 bytes: enough for HS256, not for HS384 or HS512
    let config = TokenServiceConfig::new(SECRET).with_algorithm(Algorithm::HS512);
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), config);
    assert!(matches!(result, Err(DomainError::Config { .. })));

    let config = TokenServiceConfig::new(SECRET.repeat(2)).with_algorithm(Algorithm::HS512);
    assert!(TokenService::new(InMemoryRefreshTokenRepository::new(), config).is_ok());
}

#[test]
fn test_asymmetric_algorithm_is_config_error() {
    let config = TokenServiceConfig::new(SECRET).with_algorithm(Algorithm::RS256);
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), config);
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_from_jwt_config() {
    let jwt = JwtConfig::new(SECRET).with_access_expiry_minutes(30);
    let service = TokenService::from_jwt_config(InMemoryRefreshTokenRepository::new(), &jwt).unwrap();

    assert_eq!(service.access_token_validity_in_seconds(), 1800);
    assert_eq!(service.refresh_token_validity_in_seconds(), 604800);
}

#[test]
fn test_from_jwt_config_unknown_algorithm() {
    let mut jwt = JwtConfig::new(SECRET);
    jwt.algorithm = "HS999".to_string();

    let result = TokenService::from_jwt_config(InMemoryRefreshTokenRepository::new(), &jwt);
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_from_jwt_config_rejects_oversized_expiry() {
    for expiry in [i64::MAX, 1_000_000_000_000_000] {
        let mut jwt = JwtConfig::new(SECRET);
        jwt.access_token_expiry = expiry;

        let result = TokenService::from_jwt_config(InMemoryRefreshTokenRepository::new(), &jwt);
        assert!(matches!(result, Err(DomainError::Config { .. })), "expiry {}", expiry);
    }

    let mut jwt = JwtConfig::new(SECRET);
    jwt.refresh_token_expiry = i64::MAX;
    let result = TokenService::from_jwt_config(InMemoryRefreshTokenRepository::new(), &jwt);
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_from_jwt_config_rejects_non_positive_expiry() {
    for expiry in [0, -3600] {
        let mut jwt = JwtConfig::new(SECRET);
        jwt.access_token_expiry = expiry;

        let result = TokenService::from_jwt_config(InMemoryRefreshTokenRepository::new(), &jwt);
        assert!(matches!(result, Err(DomainError::Config { .. })), "expiry {}", expiry);
    }
}

#[test]
fn test_oversized_builder_validity_is_config_error() {
    let config = TokenServiceConfig::new(SECRET).with_access_token_validity(Duration::days(40_000));
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), config);
    assert!(matches!(result, Err(DomainError::Config { .. })));

    let config = TokenServiceConfig::new(SECRET).with_refresh_token_validity(Duration::days(-40_000));
    let result = TokenService::new(InMemoryRefreshTokenRepository::new(), config);
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_long_but_representable_validity_issues_tokens() {
    let jwt = JwtConfig::new(SECRET).with_refresh_expiry_days(36_500);
    let service = TokenService::from_jwt_config(InMemoryRefreshTokenRepository::new(), &jwt).unwrap();

    let token = service.create_access_token("user-42").unwrap();
    assert!(service.validate_token(&token));
}

#[test]
fn test_config_debug_redacts_secret() {
    let debug = format!("{:?}", TokenServiceConfig::new(SECRET));
    assert!(!debug.contains(SECRET));
}

#[test]
fn test_access_token_round_trip() {
    let (service, _) = create_test_service();

    let token = service.create_access_token("user-42").unwrap();

    assert_eq!(token.split('.').count(), 3);
    assert!(service.validate_token(&token));
    assert_eq!(service.user_id_from_token(&token).unwrap(), "user-42");
}

#[test]
fn test_access_token_payload() {
    let (service, _) = create_test_service();

    let token = service.create_access_token("user-42").unwrap();
    let payload = decode_payload(&token);

    assert_eq!(payload["sub"], "user-42");
    let iat = payload["iat"].as_i64().unwrap();
    let exp = payload["exp"].as_i64().unwrap();
    assert_eq!(exp - iat, 3600);
}

#[test]
fn test_access_token_header_is_hs256() {
    let (service, _) = create_test_service();

    let token = service.create_access_token("user-42").unwrap();
    let header = jsonwebtoken::decode_header(&token).unwrap();

    assert_eq!(header.alg, Algorithm::HS256);
}

#[test]
fn test_empty_subject_rejected() {
    let (service, _) = create_test_service();

    let result = service.create_access_token("");
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_token_from_other_key_is_invalid() {
    let (service, _) = create_test_service();
    let other = TokenService::new(InMemoryRefreshTokenRepository::new(), TokenServiceConfig::new(OTHER_SECRET)).unwrap();

    let token = other.create_access_token("user-42").unwrap();

    assert!(!service.validate_token(&token));
    assert_eq!(service.parse_claims(&token), Err(TokenError::InvalidSignature));
    assert!(matches!(
        service.user_id_from_token(&token),
        Err(DomainError::TokenParse(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_expired_token_is_invalid() {
    let config = TokenServiceConfig::new(SECRET).with_access_token_validity(Duration::seconds(-60));
    let service = TokenService::new(InMemoryRefreshTokenRepository::new(), config).unwrap();

    let token = service.create_access_token("user-42").unwrap();

    assert!(!service.validate_token(&token));
    assert_eq!(service.parse_claims(&token), Err(TokenError::TokenExpired));
    assert!(matches!(
        service.user_id_from_token(&token),
        Err(DomainError::TokenParse(TokenError::TokenExpired))
    ));
}

#[test]
fn test_malformed_token_is_invalid() {
    let (service, _) = create_test_service();

    assert!(!service.validate_token(""));
    assert!(!service.validate_token("invalid_token"));
    assert!(!service.validate_token("a.b.c"));
    assert!(matches!(
        service.user_id_from_token("invalid_token"),
        Err(DomainError::TokenParse(TokenError::InvalidTokenFormat))
    ));
}

#[test]
fn test_tampered_payload_is_invalid() {
    let (service, _) = create_test_service();
    let token = service.create_access_token("user-42").unwrap();

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let forged = serde_json::json!({ "sub": "admin", "iat": 0, "exp": i64::MAX / 1000 });
    parts[1] = URL_SAFE_NO_PAD.encode(forged.to_string());
    let forged_token = parts.join(".");

    assert!(!service.validate_token(&forged_token));
}

#[test]
fn test_other_hmac_algorithm_is_invalid() {
    let (service, _) = create_test_service();
    let now = chrono::Utc::now();
    let claims = Claims::new_access_token("user-42", now, now + Duration::hours(1));
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(!service.validate_token(&token));
    assert_eq!(service.parse_claims(&token), Err(TokenError::InvalidAlgorithm));
}

#[test]
fn test_empty_subject_claim_has_no_user_id() {
    let (service, _) = create_test_service();
    let now = chrono::Utc::now();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "sub": "", "iat": now.timestamp(), "exp": now.timestamp() + 3600 }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(service.validate_token(&token));
    assert!(matches!(
        service.user_id_from_token(&token),
        Err(DomainError::TokenParse(TokenError::MissingClaim { ref claim })) if claim == "sub"
    ));
}

#[test]
fn test_token_without_expiry_is_invalid() {
    let (service, _) = create_test_service();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "sub": "user-42" }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(!service.validate_token(&token));
}

#[test]
fn test_access_token_validity_in_seconds() {
    let (service, _) = create_test_service();
    assert_eq!(service.access_token_validity_in_seconds(), 3600);
    assert_eq!(service.refresh_token_validity_in_seconds(), 7 * 24 * 60 * 60);
}

#[tokio::test]
async fn test_create_refresh_token_persists_row() {
    let (service, repository) = create_test_service();

    let token = service.create_refresh_token(99).await.unwrap();

    assert_eq!(repository.count().await, 1);
    let row = repository.find_by_token(&token).await.unwrap();
    assert_eq!(row.user_db_id, 99);
    assert_eq!(row.token, token);

    let expected = Local::now().naive_local() + Duration::days(7);
    let drift = (row.expiry_date - expected).num_seconds().abs();
    assert!(drift <= 5, "expiry drifted by {} seconds", drift);
}

#[tokio::test]
async fn test_refresh_token_has_no_subject() {
    let (service, _) = create_test_service();

    let token = service.create_refresh_token(99).await.unwrap();
    let payload = decode_payload(&token);

    assert!(payload.get("sub").is_none());
    let exp = payload["exp"].as_i64().unwrap();
    let iat = payload["iat"].as_i64().unwrap();
    assert_eq!(exp - iat, 7 * 24 * 60 * 60);

    // Valid signature, but no identity to extract
    assert!(service.validate_token(&token));
    assert!(matches!(
        service.user_id_from_token(&token),
        Err(DomainError::TokenParse(TokenError::MissingClaim { ref claim })) if claim == "sub"
    ));
}

#[tokio::test]
async fn test_refresh_token_persistence_failure() {
    let repository = FailingRepository {
        error: DomainError::Persistence {
            message: "connection refused".to_string(),
        },
    };
    let service = TokenService::new(repository, TokenServiceConfig::new(SECRET)).unwrap();

    let result = service.create_refresh_token(99).await;

    assert_eq!(
        result,
        Err(DomainError::Persistence {
            message: "connection refused".to_string()
        })
    );
}

#[tokio::test]
async fn test_store_errors_become_persistence_errors() {
    let repository = FailingRepository {
        error: DomainError::Validation {
            message: "row rejected".to_string(),
        },
    };
    let service = TokenService::new(repository, TokenServiceConfig::new(SECRET)).unwrap();

    let result = service.create_refresh_token(99).await;

    assert!(matches!(result, Err(DomainError::Persistence { .. })));
}

#[tokio::test]
async fn test_multiple_refresh_tokens_per_user() {
    let (service, repository) = create_test_service();

    service.create_refresh_token(7).await.unwrap();
    service.create_refresh_token(7).await.unwrap();

    assert_eq!(repository.find_by_user_db_id(7).await.len(), 2);
}

#[tokio::test]
async fn test_issue_tokens() {
    let (service, repository) = create_test_service();

    let pair = service.issue_tokens("user-42", 42).await.unwrap();

    assert_eq!(service.user_id_from_token(&pair.access_token).unwrap(), "user-42");
    assert_eq!(pair.access_expires_in, 3600);
    let row = repository.find_by_token(&pair.refresh_token).await.unwrap();
    assert_eq!(row.user_db_id, 42);
}

#[tokio::test]
async fn test_issue_tokens_fails_without_persistence() {
    let repository = FailingRepository {
        error: DomainError::Persistence {
            message: "disk full".to_string(),
        },
    };
    let service = TokenService::new(repository, TokenServiceConfig::new(SECRET)).unwrap();

    let result = service.issue_tokens("user-42", 42).await;

    assert!(matches!(result, Err(DomainError::Persistence { .. })));
}
