use gatehouse_core::{
    AccountStore, AccountStoreError, Email, Password, VerificationCode, VerificationCodeStore,
    VerificationCodeStoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Verification code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Reset-password use case - final step of password reset.
pub struct ResetPasswordUseCase<A, C>
where
    A: AccountStore,
    C: VerificationCodeStore,
{
    account_store: A,
    code_store: C,
}

impl<A, C> ResetPasswordUseCase<A, C>
where
    A: AccountStore,
    C: VerificationCodeStore,
{
    pub fn new(account_store: A, code_store: C) -> Self {
        Self {
            account_store,
            code_store,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        code: VerificationCode,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        self.code_store.consume_code(&email, &code).await?;

        self.account_store
            .update_credential(&email, new_password)
            .await?;

        Ok(())
    }
}
