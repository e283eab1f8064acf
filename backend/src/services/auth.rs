//! Dashboard authentication
//!
//! The inventory has a single administrator account configured at startup.
//! A successful login issues an HS256 session token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::models::{Credentials, Session};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing or invalid Authorization header")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Account email
    pub sub: String,
    /// Session id
    pub sid: String,
    pub iat: i64,
    pub exp: i64,
}

/// Checks credentials and session tokens
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Authenticator backed by the one configured admin credential
#[derive(Clone)]
pub struct StaticCredentialAuthenticator {
    admin_email: String,
    admin_password: String,
    jwt_secret: String,
    session_ttl_secs: i64,
}

impl StaticCredentialAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
            jwt_secret: config.jwt_secret.clone(),
            session_ttl_secs: config.session_ttl_secs,
        }
    }

    fn issue_token(&self, email: &str) -> Result<Session, AuthError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.session_ttl_secs);
        let session_id = Uuid::new_v4();

        let claims = SessionClaims {
            sub: email.to_string(),
            sid: session_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(Session {
            session_id,
            email: email.to_string(),
            token,
            token_type: "Bearer".to_string(),
            expires_at,
        })
    }
}

impl Authenticator for StaticCredentialAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email_matches = credentials.email.trim().eq_ignore_ascii_case(&self.admin_email);
        if !email_matches || credentials.password != self.admin_password {
            return Err(AuthError::InvalidCredentials);
        }
        self.issue_token(&self.admin_email)
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}
