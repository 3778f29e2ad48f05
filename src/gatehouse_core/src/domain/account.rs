use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, password::Password, provider::Provider};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

/// Free-text profile fields attached to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
}

/// Partial profile update. `None` means "leave the field unchanged";
/// there is no way to blank a field through a patch.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.given_name.is_none()
            && self.family_name.is_none()
            && self.phone.is_none()
            && self.birth_date.is_none()
    }
}

/// A stored account. The credential hash never leaves the store, so this
/// type carries public data only.
#[derive(Debug, Clone)]
pub struct Account {
    id: Uuid,
    email: Email,
    provider: Provider,
    social_id: Option<String>,
    profile: Profile,
    created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        id: Uuid,
        email: Email,
        provider: Provider,
        social_id: Option<String>,
        profile: Profile,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            provider,
            social_id,
            profile,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn social_id(&self) -> Option<&str> {
        self.social_id.as_deref()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Input to [`AccountStore::add_account`].
///
/// `password` is present exactly when the provider is `email`; the store
/// hashes it before anything is persisted.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub provider: Provider,
    pub social_id: Option<String>,
    pub password: Option<Password>,
    pub profile: Profile,
}

impl NewAccount {
    /// An account registered with a verified email address and a password.
    pub fn with_credentials(email: Email, password: Password, profile: Profile) -> Self {
        Self {
            email,
            provider: Provider::Email,
            social_id: None,
            password: Some(password),
            profile,
        }
    }

    /// An account created on first sight of a social-provider identity.
    pub fn from_social_identity(
        email: Email,
        provider: Provider,
        social_id: String,
        profile: Profile,
    ) -> Self {
        Self {
            email,
            provider,
            social_id: Some(social_id),
            password: None,
            profile,
        }
    }
}

/// Profile data handed back by an OAuth provider after a code exchange.
#[derive(Debug, Clone)]
pub struct ExternalProfile {
    pub id: String,
    pub email: Email,
    pub given_name: String,
    pub family_name: Option<String>,
}
