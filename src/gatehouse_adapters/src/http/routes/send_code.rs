use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_application::SendCodeUseCase;
use gatehouse_core::{AccountStore, Email, EmailClient, VerificationCodeStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct SendCodeRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Send verification code", skip_all)]
pub async fn send_code<A, C, E>(
    State((account_store, code_store, email_client)): State<(A, C, E)>,
    Json(request): Json<SendCodeRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
    C: VerificationCodeStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = SendCodeUseCase::new(account_store, code_store, email_client);
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Verification code sent to your email address."
        })),
    ))
}
