//! JWT access and refresh tokens
//!
//! Keys are derived once from the configured secret and shared through
//! `AppState`.

use anyhow::{anyhow, Result};
use aquatrack_shared::types::AuthTokens;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const ISSUER: &str = "aquatrack";

/// Purpose of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub kind: TokenKind,
    /// Unique per token so two refreshes in the same second differ
    pub jti: Uuid,
}

#[derive(Clone)]
struct Keys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

/// Issues and validates tokens with pre-computed keys
#[derive(Clone)]
pub struct JwtService {
    keys: Keys,
    validation: Arc<Validation>,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        Self {
            keys: Keys {
                encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
                decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            },
            validation: Arc::new(validation),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.generate(user_id, TokenKind::Access, self.access_ttl_secs)
    }

    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.generate(user_id, TokenKind::Refresh, self.refresh_ttl_secs)
    }

    /// Access and refresh token pair for a login, registration or refresh
    pub fn issue_tokens(&self, user_id: Uuid) -> Result<AuthTokens> {
        Ok(AuthTokens {
            access_token: self.generate_access_token(user_id)?,
            refresh_token: self.generate_refresh_token(user_id)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl_secs,
        })
    }

    fn generate(&self, user_id: Uuid, kind: TokenKind, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
            kind,
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow!("Failed to generate {:?} token: {}", kind, e))
    }

    /// Validate signature, expiry and issuer
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| anyhow!("Invalid token: {}", e))
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.validate_kind(token, TokenKind::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        self.validate_kind(token, TokenKind::Refresh)
    }

    fn validate_kind(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let claims = self.validate_token(token)?;
        if claims.kind != expected {
            return Err(anyhow!("Expected {:?} token, got {:?}", expected, claims.kind));
        }
        Ok(claims)
    }

    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 3600, 604800)
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(user_id).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.iss, "aquatrack");
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let service = service();
        let user_id = Uuid::new_v4();

        let access = service.generate_access_token(user_id).unwrap();
        let refresh = service.generate_refresh_token(user_id).unwrap();

        assert!(service.validate_refresh_token(&access).is_err());
        assert!(service.validate_access_token(&refresh).is_err());
        assert!(service.validate_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_issue_tokens() {
        let service = service();
        let tokens = service.issue_tokens(Uuid::new_v4()).unwrap();
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 3600);
        assert_ne!(tokens.access_token, tokens.refresh_token);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().generate_access_token(Uuid::new_v4()).unwrap();
        let other = JwtService::new("another-secret", 3600, 604800);
        assert!(other.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60 s leeway
        let service = JwtService::new("test-secret", -120, -120);
        let token = service.generate_access_token(Uuid::new_v4()).unwrap();
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(service().validate_token("invalid.token.here").is_err());
    }
}
