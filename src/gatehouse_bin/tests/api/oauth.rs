use gatehouse_core::{AccountStore, Provider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{SUCCESS_DEEP_LINK, TestApp, parse_email};

/// Walk the login redirect to recover the state the service will expect on
/// the callback.
async fn login_state(app: &TestApp, provider_path: &str) -> String {
    let response = app.get(provider_path).await;
    assert_eq!(response.status().as_u16(), 307);

    let location = response
        .headers()
        .get("location")
        .expect("missing consent redirect")
        .to_str()
        .unwrap();
    let url = reqwest::Url::parse(location).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .expect("no state parameter")
}

fn token_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": "provider-access-token",
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

#[tokio::test]
async fn first_google_callback_creates_the_account() {
    let app = TestApp::new().await;
    let state = login_state(&app, "/auth/google/login").await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(token_response())
        .mount(&app.oauth_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "google-uid-1",
            "email": "ada@example.com",
            "given_name": "Ada",
            "family_name": "Lovelace"
        })))
        .mount(&app.oauth_server)
        .await;

    let response = app
        .get(&format!("/auth/google/callback?code=abc&state={state}"))
        .await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        SUCCESS_DEEP_LINK
    );

    let account = app
        .account_store
        .find_account(&parse_email("ada@example.com"), Provider::Google)
        .await
        .unwrap()
        .expect("account was not created");
    assert_eq!(account.social_id(), Some("google-uid-1"));
    assert_eq!(account.profile().given_name, "Ada");
}

#[tokio::test]
async fn repeat_callback_does_not_refresh_the_profile() {
    let app = TestApp::new().await;
    let state = login_state(&app, "/auth/google/login").await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(token_response())
        .mount(&app.oauth_server)
        .await;

    // First login sees one name...
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "google-uid-1",
            "email": "ada@example.com",
            "given_name": "Ada"
        })))
        .up_to_n_times(1)
        .mount(&app.oauth_server)
        .await;
    app.get(&format!("/auth/google/callback?code=abc&state={state}"))
        .await;

    // ...and the provider reports a different one on the repeat login.
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "google-uid-1",
            "email": "ada@example.com",
            "given_name": "Adaline"
        })))
        .mount(&app.oauth_server)
        .await;
    let response = app
        .get(&format!("/auth/google/callback?code=def&state={state}"))
        .await;
    assert_eq!(response.status().as_u16(), 303);

    let account = app
        .account_store
        .find_account(&parse_email("ada@example.com"), Provider::Google)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.profile().given_name, "Ada");
}

#[tokio::test]
async fn callback_with_a_wrong_state_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .get("/auth/google/callback?code=abc&state=forged-state")
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn facebook_display_name_maps_to_given_name() {
    let app = TestApp::new().await;
    let state = login_state(&app, "/auth/facebook/login").await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(token_response())
        .mount(&app.oauth_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "fb-uid-9",
            "name": "Grace Hopper",
            "email": "grace@example.com"
        })))
        .mount(&app.oauth_server)
        .await;

    let response = app
        .get(&format!("/auth/facebook/callback?code=abc&state={state}"))
        .await;
    assert_eq!(response.status().as_u16(), 303);

    let account = app
        .account_store
        .find_account(&parse_email("grace@example.com"), Provider::Facebook)
        .await
        .unwrap()
        .expect("account was not created");
    assert_eq!(account.profile().given_name, "Grace Hopper");
    assert_eq!(account.profile().family_name, "");
    assert_eq!(account.social_id(), Some("fb-uid-9"));
}
