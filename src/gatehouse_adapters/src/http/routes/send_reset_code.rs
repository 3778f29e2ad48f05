use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::SendResetCodeUseCase;
use gatehouse_core::{AccountStore, Email, EmailClient, VerificationCodeStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct SendResetCodeRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Send password reset code", skip_all)]
pub async fn send_reset_code<A, C, E>(
    State((account_store, code_store, email_client)): State<(A, C, E)>,
    Json(request): Json<SendResetCodeRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    C: VerificationCodeStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = SendResetCodeUseCase::new(account_store, code_store, email_client);
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Password reset code sent" })),
    ))
}
