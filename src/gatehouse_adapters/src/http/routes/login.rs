use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::LoginUseCase;
use gatehouse_core::{AccountStore, Email, Password};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::auth::{SessionTokenConfig, generate_session_token};

use super::AccountResponse;
use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: AccountResponse,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<A>(
    State((account_store, token_config)): State<(A, SessionTokenConfig)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(account_store);
    let account = use_case.execute(email, password).await?;

    let token = generate_session_token(account.email(), &token_config)?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            account: AccountResponse::from(&account),
        }),
    ))
}
