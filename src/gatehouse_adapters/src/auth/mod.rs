//! Stateless session tokens.
//!
//! HS256 JWTs carrying the account email and an absolute expiry. There is
//! no revocation list: a validly signed, unexpired token is always
//! accepted.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};
use thiserror::Error;

use gatehouse_core::Email;

/// Login-flow tokens are valid for 7 days from issuance.
pub const SESSION_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

#[derive(Clone)]
pub struct SessionTokenConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl SessionTokenConfig {
    pub fn new(jwt_secret: Secret<String>) -> Self {
        Self {
            jwt_secret,
            token_ttl_in_seconds: SESSION_TOKEN_TTL_SECONDS,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Mint a signed session token asserting `email` until now + TTL.
pub fn generate_session_token(
    email: &Email,
    config: &SessionTokenConfig,
) -> Result<String, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create token duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = Claims {
        sub: Clone::clone(email.as_ref()),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
    )
    .map_err(TokenAuthError::TokenError)
}

/// Verify signature and expiry; a bad signature, malformed input, or past
/// expiry all fail. No other state is consulted.
pub fn validate_session_token(
    token: &str,
    config: &SessionTokenConfig,
) -> Result<Claims, TokenAuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenAuthError::TokenError)
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?
        .to_str()
        .map_err(|_| TokenAuthError::InvalidToken)?;

    header
        .strip_prefix("Bearer ")
        .ok_or(TokenAuthError::InvalidToken)
}

#[derive(Debug, Deserialize, Clone)]
pub struct Claims {
    pub sub: Secret<String>,
    pub exp: usize,
}

impl Serialize for Claims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Claims", 2)?;
        state.serialize_field("sub", &self.sub.expose_secret())?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}
