use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_application::{
    GetProfileError, LoginError, ReconcileOAuthError, RegisterError, ResetPasswordError,
    SendCodeError, SendResetCodeError, UpdateProfileError,
};
use gatehouse_core::{
    AccountError, AccountStoreError, VerificationCodeError, VerificationCodeStoreError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::TokenAuthError;
use crate::oauth::OAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing token")]
    MissingToken,

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Account not found")]
    AccountNotFound,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AuthApiError::InvalidInput(_) | AuthApiError::MissingToken => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            AuthApiError::EmailAlreadyRegistered => (StatusCode::CONFLICT, self.to_string()),

            AuthApiError::AuthenticationError(_) => (StatusCode::UNAUTHORIZED, self.to_string()),

            AuthApiError::AccountNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            AuthApiError::UnexpectedError(detail) => {
                // Log the detail; the caller only ever sees a generic error.
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<AccountError> for AuthApiError {
    fn from(error: AccountError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<VerificationCodeError> for AuthApiError {
    fn from(error: VerificationCodeError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountStoreError> for AuthApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountAlreadyExists => AuthApiError::EmailAlreadyRegistered,
            AccountStoreError::AccountNotFound => AuthApiError::AccountNotFound,
            AccountStoreError::IncorrectPassword => {
                AuthApiError::AuthenticationError(error.to_string())
            }
            AccountStoreError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<VerificationCodeStoreError> for AuthApiError {
    fn from(error: VerificationCodeStoreError) -> Self {
        match error {
            // One message for all three causes; the distinction stays
            // internal.
            VerificationCodeStoreError::NoCodeIssued
            | VerificationCodeStoreError::CodeMismatch
            | VerificationCodeStoreError::CodeExpired => AuthApiError::AuthenticationError(
                "Verification code is invalid or expired".to_string(),
            ),
            VerificationCodeStoreError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenAuthError> for AuthApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken => AuthApiError::MissingToken,
            TokenAuthError::InvalidToken | TokenAuthError::TokenError(_) => {
                AuthApiError::AuthenticationError("Invalid token".to_string())
            }
            TokenAuthError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<OAuthError> for AuthApiError {
    fn from(error: OAuthError) -> Self {
        match error {
            OAuthError::StateMismatch => AuthApiError::InvalidInput(error.to_string()),
            OAuthError::Configuration(e)
            | OAuthError::Exchange(e)
            | OAuthError::ProfileFetch(e)
            | OAuthError::InvalidProfile(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<SendCodeError> for AuthApiError {
    fn from(error: SendCodeError) -> Self {
        match error {
            SendCodeError::EmailAlreadyRegistered => AuthApiError::EmailAlreadyRegistered,
            SendCodeError::AccountStoreError(e) => e.into(),
            SendCodeError::CodeStoreError(e) => e.into(),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::CodeStoreError(e) => e.into(),
            RegisterError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => {
                AuthApiError::AuthenticationError(error.to_string())
            }
            LoginError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<SendResetCodeError> for AuthApiError {
    fn from(error: SendResetCodeError) -> Self {
        match error {
            SendResetCodeError::AccountNotFound => AuthApiError::AccountNotFound,
            SendResetCodeError::AccountStoreError(e) => e.into(),
            SendResetCodeError::CodeStoreError(e) => e.into(),
            SendResetCodeError::EmailError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<ResetPasswordError> for AuthApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::CodeStoreError(e) => e.into(),
            ResetPasswordError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ReconcileOAuthError> for AuthApiError {
    fn from(error: ReconcileOAuthError) -> Self {
        match error {
            ReconcileOAuthError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<GetProfileError> for AuthApiError {
    fn from(error: GetProfileError) -> Self {
        match error {
            GetProfileError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateProfileError> for AuthApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::AccountStoreError(e) => e.into(),
        }
    }
}
