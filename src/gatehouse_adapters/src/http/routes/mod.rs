//! Axum route handlers.
//!
//! Each handler parses the wire format into domain types, runs the matching
//! use case, and renders the result; everything else lives below this
//! layer.

pub mod error;
pub mod health;
pub mod login;
pub mod oauth;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod send_code;
pub mod send_reset_code;
pub mod verify_token;

pub use error::AuthApiError;
pub use health::health;
pub use login::login;
pub use oauth::{
    OAuthSuccessRedirect, facebook_callback, facebook_login, google_callback, google_login,
};
pub use profile::{get_profile, update_profile};
pub use register::register;
pub use reset_password::reset_password;
pub use send_code::send_code;
pub use send_reset_code::send_reset_code;
pub use verify_token::verify_token;

use chrono::{DateTime, Utc};
use gatehouse_core::{Account, Provider};
use serde::Serialize;
use uuid::Uuid;

/// Public view of an account, shared by login and the profile endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub provider: Provider,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        let profile = account.profile();
        Self {
            id: account.id(),
            given_name: profile.given_name.clone(),
            family_name: profile.family_name.clone(),
            email: account.email().as_str().to_string(),
            phone: profile.phone.clone(),
            birth_date: profile.birth_date.clone(),
            provider: account.provider(),
            created_at: account.created_at(),
        }
    }
}

/// The wire treats an empty string as "not supplied".
pub(crate) fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
