use gatehouse_core::{Account, AccountStore, AccountStoreError, Email, Password};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// One variant for both "no such account" and "wrong password", so the
    /// HTTP response cannot be used to enumerate registered addresses.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Login use case - password authentication for `email`-provider accounts.
pub struct LoginUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> LoginUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<Account, LoginError> {
        self.account_store
            .authenticate_account(&email, &password)
            .await
            .map_err(|error| match error {
                AccountStoreError::AccountNotFound | AccountStoreError::IncorrectPassword => {
                    LoginError::InvalidCredentials
                }
                other => LoginError::AccountStoreError(other),
            })
    }
}
