use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::RegisterUseCase;
use gatehouse_core::{
    AccountStore, Email, Password, Profile, VerificationCode, VerificationCodeStore,
};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;
use super::none_if_empty;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub verification_code: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<A, C>(
    State((account_store, code_store)): State<(A, C)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    C: VerificationCodeStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;
    let code = VerificationCode::parse(&request.verification_code)?;
    let profile = Profile {
        given_name: request.given_name,
        family_name: request.family_name,
        phone: none_if_empty(request.phone),
        birth_date: none_if_empty(request.birth_date),
    };

    let use_case = RegisterUseCase::new(account_store, code_store);
    use_case.execute(email, code, password, profile).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Registration completed successfully." })),
    ))
}
