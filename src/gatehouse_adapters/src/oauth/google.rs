use gatehouse_core::{Email, ExternalProfile};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::config::settings::OAuthProviderSettings;

use super::{OAuthError, ProviderEndpoints};

#[derive(Clone)]
pub struct GoogleOAuthClient {
    oauth: BasicClient,
    http_client: reqwest::Client,
    userinfo_url: String,
    // One state value per process, matching the original service's
    // fixed-state behavior. There is no per-login state storage.
    login_state: CsrfToken,
}

impl GoogleOAuthClient {
    pub fn new(
        settings: &OAuthProviderSettings,
        endpoints: ProviderEndpoints,
        http_client: reqwest::Client,
    ) -> Result<Self, OAuthError> {
        let oauth = BasicClient::new(
            ClientId::new(settings.client_id.clone()),
            Some(ClientSecret::new(
                settings.client_secret.expose_secret().clone(),
            )),
            AuthUrl::new(endpoints.auth_url).map_err(|e| OAuthError::Configuration(e.to_string()))?,
            Some(
                TokenUrl::new(endpoints.token_url)
                    .map_err(|e| OAuthError::Configuration(e.to_string()))?,
            ),
        )
        .set_redirect_uri(
            RedirectUrl::new(settings.redirect_url.clone())
                .map_err(|e| OAuthError::Configuration(e.to_string()))?,
        );

        Ok(Self {
            oauth,
            http_client,
            userinfo_url: endpoints.userinfo_url,
            login_state: CsrfToken::new_random(),
        })
    }

    /// Consent-page URL the login endpoint redirects to.
    pub fn authorize_url(&self) -> url::Url {
        let (url, _) = self
            .oauth
            .authorize_url(|| self.login_state.clone())
            .add_scope(Scope::new(
                "https://www.googleapis.com/auth/userinfo.email".to_string(),
            ))
            .add_scope(Scope::new(
                "https://www.googleapis.com/auth/userinfo.profile".to_string(),
            ))
            .url();
        url
    }

    /// Exchange the callback code and fetch the Google profile.
    #[tracing::instrument(name = "Google code exchange", skip_all)]
    pub async fn fetch_profile(
        &self,
        code: String,
        state: &str,
    ) -> Result<ExternalProfile, OAuthError> {
        if state != self.login_state.secret() {
            return Err(OAuthError::StateMismatch);
        }

        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code))
            .request_async(async_http_client)
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;

        let user: GoogleUserInfo = self
            .http_client
            .get(&self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .map_err(|e| OAuthError::ProfileFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| OAuthError::ProfileFetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| OAuthError::ProfileFetch(e.to_string()))?;

        let email = Email::try_from(Secret::from(user.email))
            .map_err(|e| OAuthError::InvalidProfile(e.to_string()))?;

        Ok(ExternalProfile {
            id: user.id,
            email,
            given_name: user.given_name.unwrap_or_default(),
            family_name: user.family_name,
        })
    }

    pub fn login_state(&self) -> &str {
        self.login_state.secret()
    }
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    given_name: Option<String>,
    family_name: Option<String>,
}
