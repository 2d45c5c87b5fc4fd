use std::env;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::auth_dtos::SessionOut;
use crate::models::user::{JwtClaims, User};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("password hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// The identity a verified token resolves to.
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    pub user_id: Uuid,
    pub role: String,
}

#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
        }
    }

    pub fn new_from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET is required")
            .trim()
            .to_string();

        let ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24);

        Self::new(jwt_secret, Duration::hours(ttl_hours))
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    /// Ok(false) on mismatch; Err only when the stored hash is unreadable.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    pub fn issue_session(&self, user: &User) -> Result<SessionOut, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;
        let claims = JwtClaims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            exp: expires_at.timestamp() as u64,
            iat: now.timestamp() as u64,
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(SessionOut {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl.num_seconds(),
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenIdentity, AuthError> {
        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        let user_id =
            Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(TokenIdentity {
            user_id,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::ROLE_USER;

    fn service() -> AuthService {
        AuthService::new("test-secret", Duration::hours(1))
    }

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            role: ROLE_USER.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_roundtrip() {
        let svc = service();
        let hash = svc.hash_password("correct horse battery").unwrap();
        assert_ne!(hash, "correct horse battery");
        assert!(svc.verify_password("correct horse battery", &hash).unwrap());
        assert!(!svc.verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let svc = service();
        let a = svc.hash_password("pw-pw-pw-pw").unwrap();
        let b = svc.hash_password("pw-pw-pw-pw").unwrap();
        assert_ne!(a, b); // salted
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        let svc = service();
        assert!(svc.verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn token_roundtrip() {
        let svc = service();
        let user = sample_user();
        let session = svc.issue_session(&user).unwrap();
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.expires_in, 3600);

        let identity = svc.verify_token(&session.access_token).unwrap();
        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.role, ROLE_USER);
    }

    #[test]
    fn expired_token_is_rejected() {
        // TTL far enough in the past to clear the default leeway.
        let svc = AuthService::new("test-secret", Duration::hours(-2));
        let session = svc.issue_session(&sample_user()).unwrap();
        match svc.verify_token(&session.access_token) {
            Err(AuthError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.map(|i| i.user_id)),
        }
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let svc = service();
        let session = svc.issue_session(&sample_user()).unwrap();
        let other = AuthService::new("different-secret", Duration::hours(1));
        assert!(matches!(
            other.verify_token(&session.access_token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            service().verify_token("nonsense.token.here"),
            Err(AuthError::InvalidToken)
        ));
    }
}
