use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::ResetPasswordUseCase;
use gatehouse_core::{AccountStore, Email, Password, VerificationCode, VerificationCodeStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Secret<String>,
    pub code: String,
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<A, C>(
    State((account_store, code_store)): State<(A, C)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    C: VerificationCodeStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let code = VerificationCode::parse(&request.code)?;
    let new_password = Password::try_from(request.new_password)?;

    let use_case = ResetPasswordUseCase::new(account_store, code_store);
    use_case.execute(email, code, new_password).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Your password has been reset." })),
    ))
}
