use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};

use crate::auth::{SessionTokenConfig, extract_bearer_token, validate_session_token};

use super::error::AuthApiError;

/// Token check for clients restoring a session. Signature and expiry are
/// the whole truth: no store is consulted.
#[tracing::instrument(name = "Verify token", skip_all)]
pub async fn verify_token(
    State(token_config): State<SessionTokenConfig>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError> {
    let token = extract_bearer_token(&headers)?;
    let _claims = validate_session_token(token, &token_config)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Token is valid" })),
    ))
}
