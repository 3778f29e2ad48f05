use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, NewAccount, ProfilePatch},
    email::Email,
    password::Password,
    provider::Provider,
    verification_code::VerificationCode,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Store of account records, keyed by (email, provider).
///
/// Uniqueness of the key is the store's responsibility (a constraint, not a
/// lock): of two concurrent `add_account` calls for the same pair, exactly
/// one succeeds. Credential hashing also lives behind this trait so hashes
/// never cross it in either direction.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// True if any account, regardless of provider, holds this email.
    /// This is the pre-registration gate, deliberately broader than the
    /// per-provider uniqueness key.
    async fn email_taken(&self, email: &Email) -> Result<bool, AccountStoreError>;

    /// Exact-match lookup; absence is not an error.
    async fn find_account(
        &self,
        email: &Email,
        provider: Provider,
    ) -> Result<Option<Account>, AccountStoreError>;

    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError>;

    /// Verify a password against the stored hash of the `email`-provider
    /// account. `AccountNotFound` and `IncorrectPassword` stay distinct
    /// here; callers decide whether to collapse them.
    async fn authenticate_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError>;

    /// Replace the credential of the `email`-provider account.
    async fn update_credential(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), AccountStoreError>;

    /// Apply the non-empty fields of the patch. Fails with
    /// `AccountNotFound` when nothing matched.
    async fn update_profile(
        &self,
        email: &Email,
        patch: ProfilePatch,
    ) -> Result<Account, AccountStoreError>;

    /// Provider-agnostic lookup used by the profile endpoints.
    async fn get_account(&self, email: &Email) -> Result<Account, AccountStoreError>;
}

// VerificationCodeStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationCodeStoreError {
    #[error("No verification code issued")]
    NoCodeIssued,
    #[error("Verification code does not match")]
    CodeMismatch,
    #[error("Verification code expired")]
    CodeExpired,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[cfg(debug_assertions)]
impl PartialEq for VerificationCodeStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoCodeIssued, Self::NoCodeIssued) => true,
            (Self::CodeMismatch, Self::CodeMismatch) => true,
            (Self::CodeExpired, Self::CodeExpired) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Store of live verification codes, at most one per email.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Upsert the code for this email, unconditionally replacing any
    /// previous one (last-issued-wins, no concurrency token). The record
    /// expires `ttl` after now; expiry is only ever checked lazily at
    /// consumption.
    async fn store_code(
        &self,
        email: Email,
        code: VerificationCode,
        ttl: Duration,
    ) -> Result<(), VerificationCodeStoreError>;

    /// Consume the live code for this email. Succeeds iff a record exists,
    /// the submitted code matches it, and it has not expired; the record is
    /// deleted on success, so a code can never be consumed twice.
    async fn consume_code(
        &self,
        email: &Email,
        submitted: &VerificationCode,
    ) -> Result<(), VerificationCodeStoreError>;
}
