use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use gatehouse_core::{
    Account, AccountStore, AccountStoreError, Email, NewAccount, Password, ProfilePatch, Provider,
};
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::credential::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
struct StoredAccount {
    account: Account,
    password_hash: Option<Secret<String>>,
}

/// In-memory account store for tests and local development.
///
/// Goes through the same credential codec as the Postgres store so
/// password behavior is identical end to end.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<(Email, Provider), StoredAccount>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn email_taken(&self, email: &Email) -> Result<bool, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.keys().any(|(stored, _)| stored == email))
    }

    async fn find_account(
        &self,
        email: &Email,
        provider: Provider,
    ) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .get(&(email.clone(), provider))
            .map(|stored| stored.account.clone()))
    }

    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let password_hash = match new_account.password {
            Some(password) => Some(
                compute_password_hash(password)
                    .await
                    .map_err(AccountStoreError::UnexpectedError)?,
            ),
            None => None,
        };

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
        accounts.insert(
            key,
            StoredAccount {
                account: account.clone(),
                password_hash,
            },
        );
        Ok(account)
    }

    async fn authenticate_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let stored = {
            let accounts = self.accounts.read().await;
            accounts
                .get(&(email.clone(), Provider::Email))
                .cloned()
                .ok_or(AccountStoreError::AccountNotFound)?
        };

        let Some(password_hash) = stored.password_hash else {
            return Err(AccountStoreError::IncorrectPassword);
        };

        if !verify_password_hash(password_hash, password.clone()).await {
            return Err(AccountStoreError::IncorrectPassword);
        }

        Ok(stored.account)
    }

    async fn update_credential(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(&(email.clone(), Provider::Email))
            .ok_or(AccountStoreError::AccountNotFound)?;

        stored.password_hash = Some(password_hash);
        Ok(())
    }

    async fn update_profile(
        &self,
        email: &Email,
        patch: ProfilePatch,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .iter_mut()
            .find(|((stored_email, _), _)| stored_email == email)
            .map(|(_, stored)| stored)
            .ok_or(AccountStoreError::AccountNotFound)?;

        let mut profile = stored.account.profile().clone();
        if let Some(given_name) = patch.given_name {
            profile.given_name = given_name;
        }
        if let Some(family_name) = patch.family_name {
            profile.family_name = family_name;
        }
        if let Some(phone) = patch.phone {
            profile.phone = Some(phone);
        }
        if let Some(birth_date) = patch.birth_date {
            profile.birth_date = Some(birth_date);
        }

        stored.account = Account::new(
            stored.account.id(),
            stored.account.email().clone(),
            stored.account.provider(),
            stored.account.social_id().map(str::to_string),
            profile,
            stored.account.created_at(),
        );
        Ok(stored.account.clone())
    }

    async fn get_account(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .find(|((stored_email, _), _)| stored_email == email)
            .map(|(_, stored)| stored.account.clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }
}
