use gatehouse_core::{
    Account, AccountStore, AccountStoreError, ExternalProfile, NewAccount, Profile, Provider,
};

#[derive(Debug, thiserror::Error)]
pub enum ReconcileOAuthError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// OAuth reconciliation use case - lookup-or-create per (email, provider).
///
/// An account is created only on first sight of a provider identity; a
/// repeat login never refreshes the stored profile from the provider.
pub struct ReconcileOAuthUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> ReconcileOAuthUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "ReconcileOAuthUseCase::execute", skip_all, fields(provider = %provider))]
    pub async fn execute(
        &self,
        provider: Provider,
        external: ExternalProfile,
    ) -> Result<Account, ReconcileOAuthError> {
        if let Some(existing) = self
            .account_store
            .find_account(&external.email, provider)
            .await?
        {
            return Ok(existing);
        }

        let profile = Profile {
            given_name: external.given_name,
            family_name: external.family_name.unwrap_or_default(),
            phone: None,
            birth_date: None,
        };
        let new_account =
            NewAccount::from_social_identity(external.email, provider, external.id, profile);

        let account = self.account_store.add_account(new_account).await?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gatehouse_core::{Email, Password, ProfilePatch};
    use secrecy::Secret;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    #[derive(Clone, Default)]
    struct MockAccountStore {
        accounts: Arc<RwLock<HashMap<(Email, Provider), Account>>>,
        inserts: Arc<RwLock<usize>>,
    }

    #[async_trait::async_trait]
    impl AccountStore for MockAccountStore {
        async fn email_taken(&self, _email: &Email) -> Result<bool, AccountStoreError> {
            unimplemented!()
        }

        async fn find_account(
            &self,
            email: &Email,
            provider: Provider,
        ) -> Result<Option<Account>, AccountStoreError> {
            Ok(self
                .accounts
                .read()
                .await
                .get(&(email.clone(), provider))
                .cloned())
        }

        async fn add_account(
            &self,
            new_account: NewAccount,
        ) -> Result<Account, AccountStoreError> {
            let key = (new_account.email.clone(), new_account.provider);
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(AccountStoreError::AccountAlreadyExists);
            }
            let account = Account::new(
                Uuid::new_v4(),
                new_account.email,
                new_account.provider,
                new_account.social_id,
                new_account.profile,
                Utc::now(),
            );
            accounts.insert(key, account.clone());
            *self.inserts.write().await += 1;
            Ok(account)
        }

        async fn authenticate_account(
            &self,
            _email: &Email,
            _password: &Password,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn update_credential(
            &self,
            _email: &Email,
            _new_password: Password,
        ) -> Result<(), AccountStoreError> {
            unimplemented!()
        }

        async fn update_profile(
            &self,
            _email: &Email,
            _patch: ProfilePatch,
        ) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn get_account(&self, _email: &Email) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }
    }

    fn external(raw_email: &str) -> ExternalProfile {
        ExternalProfile {
            id: "provider-id-1".to_string(),
            email: Email::try_from(Secret::from(raw_email.to_string())).unwrap(),
            given_name: "Ada".to_string(),
            family_name: Some("Lovelace".to_string()),
        }
    }

    #[tokio::test]
    async fn first_callback_creates_the_account() {
        let store = MockAccountStore::default();
        let use_case = ReconcileOAuthUseCase::new(store.clone());

        let account = use_case
            .execute(Provider::Google, external("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(account.provider(), Provider::Google);
        assert_eq!(account.social_id(), Some("provider-id-1"));
        assert_eq!(account.profile().given_name, "Ada");
        assert_eq!(*store.inserts.read().await, 1);
    }

    #[tokio::test]
    async fn repeat_callback_neither_creates_nor_refreshes() {
        let store = MockAccountStore::default();
        let use_case = ReconcileOAuthUseCase::new(store.clone());

        let first = use_case
            .execute(Provider::Google, external("ada@example.com"))
            .await
            .unwrap();

        // Same identity comes back with a different display name.
        let mut changed = external("ada@example.com");
        changed.given_name = "Adaline".to_string();
        let second = use_case.execute(Provider::Google, changed).await.unwrap();

        assert_eq!(second.id(), first.id());
        assert_eq!(second.profile().given_name, "Ada");
        assert_eq!(*store.inserts.read().await, 1);
    }

    #[tokio::test]
    async fn same_email_under_another_provider_is_a_separate_account() {
        let store = MockAccountStore::default();
        let use_case = ReconcileOAuthUseCase::new(store.clone());

        use_case
            .execute(Provider::Google, external("ada@example.com"))
            .await
            .unwrap();
        use_case
            .execute(Provider::Facebook, external("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(*store.inserts.read().await, 2);
    }
}
