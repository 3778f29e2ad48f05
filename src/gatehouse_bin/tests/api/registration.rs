use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{TestApp, random_email, unix_now};

#[tokio::test]
async fn full_registration_journey() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;
    let email = random_email();

    let response = app
        .post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // A code with a roughly 3-minute expiry is now live for this address.
    let expiry = app.issued_code_expiry(&email).await;
    let remaining = expiry - unix_now();
    assert!((170..=190).contains(&remaining), "ttl was {remaining}s");

    let code = app.issued_code(&email).await;
    let response = app
        .post_json(
            "/register",
            &serde_json::json!({
                "email": email,
                "password": "pw123secret",
                "verificationCode": code,
                "givenName": "Ada",
                "familyName": "Lovelace",
                "phone": "5550001",
                "birthDate": "1815-12-10"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    // The verification record is gone.
    assert!(
        app.code_store.issued(&crate::helpers::parse_email(&email)).await.is_none()
    );

    // The stored credential verifies against the registered password.
    let response = app
        .post_json(
            "/login",
            &serde_json::json!({ "email": email, "password": "pw123secret" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["account"]["provider"], "email");
    assert_eq!(body["account"]["email"], email);
    assert_eq!(body["account"]["givenName"], "Ada");
}

#[tokio::test]
async fn send_code_conflicts_for_a_registered_email() {
    let app = TestApp::new().await;
    let email = random_email();
    app.seed_account(&email, "pw123secret").await;

    let response = app
        .post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn mail_failure_does_not_fail_send_code() {
    let app = TestApp::new().await;
    // Postmark is down.
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    let email = random_email();
    let response = app
        .post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;

    // The code was persisted, so the caller still hears success.
    assert_eq!(response.status().as_u16(), 200);
    assert!(!app.issued_code(&email).await.is_empty());
}

#[tokio::test]
async fn register_rejects_a_wrong_code() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;
    let email = random_email();

    app.post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;
    let issued = app.issued_code(&email).await;
    let wrong = if issued == "000000" { "000001" } else { "000000" };

    let response = app
        .post_json(
            "/register",
            &serde_json::json!({
                "email": email,
                "password": "pw123secret",
                "verificationCode": wrong
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn register_rejects_an_expired_code() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;
    let email = random_email();

    app.post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;
    let code = app.issued_code(&email).await;
    app.code_store
        .expire_now(&crate::helpers::parse_email(&email))
        .await;

    let response = app
        .post_json(
            "/register",
            &serde_json::json!({
                "email": email,
                "password": "pw123secret",
                "verificationCode": code
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn a_second_issuance_invalidates_the_first_code() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;
    let email = random_email();

    app.post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;
    let first = app.issued_code(&email).await;

    app.post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;
    let second = app.issued_code(&email).await;

    if first == second {
        // One-in-a-million draw; nothing to assert.
        return;
    }

    let response = app
        .post_json(
            "/register",
            &serde_json::json!({
                "email": email,
                "password": "pw123secret",
                "verificationCode": first
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn register_rejects_a_short_password() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;
    let email = random_email();

    app.post_json("/send-code", &serde_json::json!({ "email": email }))
        .await;
    let code = app.issued_code(&email).await;

    let response = app
        .post_json(
            "/register",
            &serde_json::json!({
                "email": email,
                "password": "short",
                "verificationCode": code
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
