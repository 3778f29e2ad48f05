use gatehouse_core::{
    Account, AccountStore, AccountStoreError, Email, NewAccount, Password, Profile,
    VerificationCode, VerificationCodeStore, VerificationCodeStoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Verification code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Register use case - final step of registration.
///
/// Consuming the verification code both proves control of the address and
/// deletes the record, so a submitted code can never be replayed. The store
/// hashes the password while inserting the account.
pub struct RegisterUseCase<A, C>
where
    A: AccountStore,
    C: VerificationCodeStore,
{
    account_store: A,
    code_store: C,
}

impl<A, C> RegisterUseCase<A, C>
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

    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        code: VerificationCode,
        password: Password,
        profile: Profile,
    ) -> Result<Account, RegisterError> {
        self.code_store.consume_code(&email, &code).await?;

        let new_account = NewAccount::with_credentials(email, password, profile);
        let account = self.account_store.add_account(new_account).await?;

        Ok(account)
    }
}
