use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use gatehouse_application::{GetProfileUseCase, UpdateProfileUseCase};
use gatehouse_core::{AccountStore, Email, ProfilePatch};
use serde::Deserialize;

use crate::auth::{SessionTokenConfig, extract_bearer_token, validate_session_token};

use super::AccountResponse;
use super::error::AuthApiError;
use super::none_if_empty;

/// Resolve the caller's identity from the bearer token.
fn authenticated_email(
    headers: &HeaderMap,
    token_config: &SessionTokenConfig,
) -> Result<Email, AuthApiError> {
    let token = extract_bearer_token(headers)?;
    let claims = validate_session_token(token, token_config)?;

    Email::try_from(claims.sub)
        .map_err(|_| AuthApiError::AuthenticationError("Invalid token".to_string()))
}

#[tracing::instrument(name = "Get profile", skip_all)]
pub async fn get_profile<A>(
    State((account_store, token_config)): State<(A, SessionTokenConfig)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
{
    let email = authenticated_email(&headers, &token_config)?;

    let use_case = GetProfileUseCase::new(account_store);
    let account = use_case.execute(email).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(&account))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: String,
}

#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile<A>(
    State((account_store, token_config)): State<(A, SessionTokenConfig)>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
{
    let email = authenticated_email(&headers, &token_config)?;

    let patch = ProfilePatch {
        given_name: none_if_empty(request.given_name),
        family_name: none_if_empty(request.family_name),
        phone: none_if_empty(request.phone),
        birth_date: none_if_empty(request.birth_date),
    };

    let use_case = UpdateProfileUseCase::new(account_store);
    let account = use_case.execute(email, patch).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(&account))))
}
