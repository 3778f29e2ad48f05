use serde::{Deserialize, Serialize};

use super::account::AccountError;

/// Origin of an account's identity.
///
/// The pair (email, provider) is the account key: the same address may
/// exist once per provider, and those accounts are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Email,
    Google,
    Facebook,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Email => "email",
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AccountError> {
        match value {
            "email" => Ok(Provider::Email),
            "google" => Ok(Provider::Google),
            "facebook" => Ok(Provider::Facebook),
            other => Err(AccountError::UnknownProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
