use std::time::Duration;

use gatehouse_core::{
    AccountStore, AccountStoreError, Email, EmailClient, VerificationCode, VerificationCodeStore,
    VerificationCodeStoreError,
};

/// Registration codes are short-lived; the caller is expected to be looking
/// at their inbox.
pub const REGISTRATION_CODE_TTL: Duration = Duration::from_secs(3 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SendCodeError {
    #[error("Email is already registered")]
    EmailAlreadyRegistered,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Verification code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
}

/// Send-verification-code use case - first step of registration.
///
/// Issues a fresh code for the address and dispatches the email as a
/// detached task: the caller learns "code sent" as soon as the code is
/// persisted, and a delivery failure is logged, never surfaced.
pub struct SendCodeUseCase<A, C, E>
where
    A: AccountStore,
    C: VerificationCodeStore,
    E: EmailClient,
{
    account_store: A,
    code_store: C,
    email_client: E,
}

impl<A, C, E> SendCodeUseCase<A, C, E>
where
    A: AccountStore,
    C: VerificationCodeStore,
    E: EmailClient + Clone + 'static,
{
    pub fn new(account_store: A, code_store: C, email_client: E) -> Self {
        Self {
            account_store,
            code_store,
            email_client,
        }
    }

    /// Execute the send-code use case.
    ///
    /// # Returns
    /// Ok(()) once the code is persisted; `EmailAlreadyRegistered` if any
    /// account, under any provider, already holds this address.
    #[tracing::instrument(name = "SendCodeUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), SendCodeError> {
        if self.account_store.email_taken(&email).await? {
            return Err(SendCodeError::EmailAlreadyRegistered);
        }

        let code = VerificationCode::new();
        self.code_store
            .store_code(email.clone(), code.clone(), REGISTRATION_CODE_TTL)
            .await?;

        // Detached send: the response never waits on delivery.
        let email_client = self.email_client.clone();
        tokio::spawn(async move {
            let body = format!(
                "Hello,\n\nYour verification code is: {}\n\nIt expires in 3 minutes.",
                code.as_str()
            );
            if let Err(error) = email_client
                .send_email(&email, "Your verification code", &body)
                .await
            {
                tracing::error!("failed to deliver verification code email: {error}");
            }
        });

        Ok(())
    }
}
