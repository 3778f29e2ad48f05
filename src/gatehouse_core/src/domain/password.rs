use secrecy::{ExposeSecret, Secret};

use super::account::AccountError;

const MIN_PASSWORD_LENGTH: usize = 8;

/// A candidate password, validated for shape only.
///
/// Hashing happens behind the account store; this type never stores a hash.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = AccountError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().len() >= MIN_PASSWORD_LENGTH {
            Ok(Self(value))
        } else {
            Err(AccountError::PasswordTooShort)
        }
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
