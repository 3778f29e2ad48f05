use gatehouse_core::{Account, AccountStore, AccountStoreError, Email, ProfilePatch};

#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Update-profile use case - applies a partial patch to the profile fields.
///
/// Only name, phone, and birth date can change this way; provider and
/// credential are out of reach of a profile update.
pub struct UpdateProfileUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> UpdateProfileUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        patch: ProfilePatch,
    ) -> Result<Account, UpdateProfileError> {
        let account = self.account_store.update_profile(&email, patch).await?;
        Ok(account)
    }
}
