//! OAuth provider clients.
//!
//! Each client wraps the provider's authorization-code flow: build the
//! consent URL, exchange the returned code, fetch the user's profile, and
//! hand back a provider-agnostic [`ExternalProfile`]. Reconciliation with
//! local accounts happens in the application layer, not here.

pub mod facebook;
pub mod google;

use thiserror::Error;

pub use facebook::FacebookOAuthClient;
pub use google::GoogleOAuthClient;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("OAuth client configuration error: {0}")]
    Configuration(String),
    #[error("State parameter does not match")]
    StateMismatch,
    #[error("Code exchange failed: {0}")]
    Exchange(String),
    #[error("Failed to fetch provider profile: {0}")]
    ProfileFetch(String),
    #[error("Provider profile is unusable: {0}")]
    InvalidProfile(String),
}

/// Provider endpoint set, injectable so tests can point a client at a local
/// mock server.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl ProviderEndpoints {
    pub fn google() -> Self {
        Self {
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
        }
    }

    pub fn facebook() -> Self {
        Self {
            auth_url: "https://www.facebook.com/v10.0/dialog/oauth".to_string(),
            token_url: "https://graph.facebook.com/v10.0/oauth/access_token".to_string(),
            userinfo_url: "https://graph.facebook.com/v10.0/me".to_string(),
        }
    }
}
