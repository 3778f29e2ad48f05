use std::time::Duration;

use gatehouse_core::{
    AccountStore, AccountStoreError, Email, EmailClient, Provider, VerificationCode,
    VerificationCodeStore, VerificationCodeStoreError,
};

/// Reset codes live longer than registration codes; the user may have to
/// dig the mail out of a spam folder.
pub const RESET_CODE_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SendResetCodeError {
    /// Unlike SendCode, this flow names the missing account outright. The
    /// original service behaves the same way, at odds with login's
    /// enumeration protection.
    #[error("Account not found")]
    AccountNotFound,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Verification code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Send-reset-code use case - first step of password reset.
///
/// The mail is sent synchronously here: a delivery failure surfaces to the
/// caller, unlike SendCode's detached dispatch.
pub struct SendResetCodeUseCase<A, C, E>
where
    A: AccountStore,
    C: VerificationCodeStore,
    E: EmailClient,
{
    account_store: A,
    code_store: C,
    email_client: E,
}

impl<A, C, E> SendResetCodeUseCase<A, C, E>
where
    A: AccountStore,
    C: VerificationCodeStore,
    E: EmailClient,
{
    pub fn new(account_store: A, code_store: C, email_client: E) -> Self {
        Self {
            account_store,
            code_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "SendResetCodeUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), SendResetCodeError> {
        let existing = self
            .account_store
            .find_account(&email, Provider::Email)
            .await
            .map_err(SendResetCodeError::AccountStoreError)?;
        if existing.is_none() {
            return Err(SendResetCodeError::AccountNotFound);
        }

        let code = VerificationCode::new();
        self.code_store
            .store_code(email.clone(), code.clone(), RESET_CODE_TTL)
            .await?;

        let body = format!("Your password reset code is: {}", code.as_str());
        self.email_client
            .send_email(&email, "Your password reset code", &body)
            .await
            .map_err(SendResetCodeError::EmailError)?;

        Ok(())
    }
}
