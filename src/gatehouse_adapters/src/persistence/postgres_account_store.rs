use chrono::{DateTime, Utc};
use gatehouse_core::{
    Account, AccountStore, AccountStoreError, Email, NewAccount, Password, Profile, ProfilePatch,
    Provider,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::credential::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: sqlx::PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

/// Row shape shared by every SELECT in this store.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    provider: String,
    social_id: Option<String>,
    password_hash: Option<String>,
    given_name: String,
    family_name: String,
    phone: Option<String>,
    birth_date: Option<String>,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, AccountStoreError> {
        let email = Email::try_from(Secret::from(self.email))
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let provider = Provider::parse(&self.provider)
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(Account::new(
            self.id,
            email,
            provider,
            self.social_id,
            Profile {
                given_name: self.given_name,
                family_name: self.family_name,
                phone: self.phone,
                birth_date: self.birth_date,
            },
            self.created_at,
        ))
    }
}

const SELECT_COLUMNS: &str = "id, email, provider, social_id, password_hash, \
     given_name, family_name, phone, birth_date, created_at";

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Checking email in PostgreSQL", skip_all)]
    async fn email_taken(&self, email: &Email) -> Result<bool, AccountStoreError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(taken)
    }

    #[tracing::instrument(name = "Looking up account in PostgreSQL", skip_all)]
    async fn find_account(
        &self,
        email: &Email,
        provider: Provider,
    ) -> Result<Option<Account>, AccountStoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE email = $1 AND provider = $2");
        let row: Option<AccountRow> = sqlx::query_as(&query)
            .bind(email.as_str())
            .bind(provider.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.map(AccountRow::into_account).transpose()
    }

    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let password_hash = match new_account.password {
            Some(password) => Some(
                compute_password_hash(password)
                    .await
                    .map_err(AccountStoreError::UnexpectedError)?,
            ),
            None => None,
        };

        let id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            r#"
                INSERT INTO accounts
                    (id, email, provider, social_id, password_hash,
                     given_name, family_name, phone, birth_date, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(new_account.email.as_str())
        .bind(new_account.provider.as_str())
        .bind(new_account.social_id.as_deref())
        .bind(password_hash.as_ref().map(|hash| hash.expose_secret().clone()))
        .bind(&new_account.profile.given_name)
        .bind(&new_account.profile.family_name)
        .bind(new_account.profile.phone.as_deref())
        .bind(new_account.profile.birth_date.as_deref())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return AccountStoreError::AccountAlreadyExists;
                }
            }
            AccountStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(Account::new(
            id,
            new_account.email,
            new_account.provider,
            new_account.social_id,
            new_account.profile,
            created_at,
        ))
    }

    #[tracing::instrument(name = "Validating credentials in PostgreSQL", skip_all)]
    async fn authenticate_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE email = $1 AND provider = 'email'");
        let row: Option<AccountRow> = sqlx::query_as(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        let Some(password_hash) = row.password_hash.clone() else {
            return Err(AccountStoreError::IncorrectPassword);
        };

        if !verify_password_hash(Secret::from(password_hash), password.clone()).await {
            return Err(AccountStoreError::IncorrectPassword);
        }

        row.into_account()
    }

    #[tracing::instrument(name = "Updating credential in PostgreSQL", skip_all)]
    async fn update_credential(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let result =
            sqlx::query("UPDATE accounts SET password_hash = $1 WHERE email = $2 AND provider = 'email'")
                .bind(password_hash.expose_secret())
                .bind(email.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        email: &Email,
        patch: ProfilePatch,
    ) -> Result<Account, AccountStoreError> {
        // COALESCE keeps any field the patch leaves out.
        let query = format!(
            r#"
                UPDATE accounts SET
                    given_name = COALESCE($2, given_name),
                    family_name = COALESCE($3, family_name),
                    phone = COALESCE($4, phone),
                    birth_date = COALESCE($5, birth_date)
                WHERE email = $1
                RETURNING {SELECT_COLUMNS}
            "#
        );
        let row: Option<AccountRow> = sqlx::query_as(&query)
            .bind(email.as_str())
            .bind(patch.given_name.as_deref())
            .bind(patch.family_name.as_deref())
            .bind(patch.phone.as_deref())
            .bind(patch.birth_date.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        match row {
            Some(row) => row.into_account(),
            None => Err(AccountStoreError::AccountNotFound),
        }
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip_all)]
    async fn get_account(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM accounts WHERE email = $1 LIMIT 1");
        let row: Option<AccountRow> = sqlx::query_as(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        match row {
            Some(row) => row.into_account(),
            None => Err(AccountStoreError::AccountNotFound),
        }
    }
}
