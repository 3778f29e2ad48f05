use gatehouse_core::{Account, AccountStore, AccountStoreError, Email};

#[derive(Debug, thiserror::Error)]
pub enum GetProfileError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Get-profile use case. The email comes out of a validated session token,
/// so the lookup is provider-agnostic.
pub struct GetProfileUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> GetProfileUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<Account, GetProfileError> {
        let account = self.account_store.get_account(&email).await?;
        Ok(account)
    }
}
