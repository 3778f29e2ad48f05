use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use gatehouse_application::ReconcileOAuthUseCase;
use gatehouse_core::{AccountStore, Provider};
use serde::Deserialize;

use crate::oauth::{FacebookOAuthClient, GoogleOAuthClient};

use super::error::AuthApiError;

/// Client deep link the callback redirects to once the identity is
/// reconciled. No session token travels on this path.
#[derive(Clone)]
pub struct OAuthSuccessRedirect(pub String);

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackParams {
    pub code: String,
    #[serde(default)]
    pub state: String,
}

#[tracing::instrument(name = "Google login", skip_all)]
pub async fn google_login(State(client): State<GoogleOAuthClient>) -> impl IntoResponse {
    Redirect::temporary(client.authorize_url().as_str())
}

#[tracing::instrument(name = "Google callback", skip_all)]
pub async fn google_callback<A>(
    State((client, account_store, success_redirect)): State<(
        GoogleOAuthClient,
        A,
        OAuthSuccessRedirect,
    )>,
    Query(params): Query<OAuthCallbackParams>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
{
    let external = client.fetch_profile(params.code, &params.state).await?;

    let use_case = ReconcileOAuthUseCase::new(account_store);
    use_case.execute(Provider::Google, external).await?;

    Ok(Redirect::to(&success_redirect.0))
}

#[tracing::instrument(name = "Facebook login", skip_all)]
pub async fn facebook_login(State(client): State<FacebookOAuthClient>) -> impl IntoResponse {
    Redirect::temporary(client.authorize_url().as_str())
}

#[tracing::instrument(name = "Facebook callback", skip_all)]
pub async fn facebook_callback<A>(
    State((client, account_store, success_redirect)): State<(
        FacebookOAuthClient,
        A,
        OAuthSuccessRedirect,
    )>,
    Query(params): Query<OAuthCallbackParams>,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AccountStore + Clone + 'static,
{
    let external = client.fetch_profile(params.code, &params.state).await?;

    let use_case = ReconcileOAuthUseCase::new(account_store);
    use_case.execute(Provider::Facebook, external).await?;

    Ok(Redirect::to(&success_redirect.0))
}
