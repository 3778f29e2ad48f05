use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{TestApp, random_email, unix_now};

#[tokio::test]
async fn full_password_reset_journey() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;
    let email = random_email();
    app.seed_account(&email, "pw123secret").await;

    let response = app
        .post_json(
            "/forgot-password/send-code",
            &serde_json::json!({ "email": email }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // Reset codes run on the longer, 10-minute TTL.
    let remaining = app.issued_code_expiry(&email).await - unix_now();
    assert!((590..=610).contains(&remaining), "ttl was {remaining}s");

    let code = app.issued_code(&email).await;
    let response = app
        .post_json(
            "/forgot-password/reset",
            &serde_json::json!({
                "email": email,
                "code": code,
                "newPassword": "brand-new-pw"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // The old password is dead, the new one works.
    let old = app
        .post_json(
            "/login",
            &serde_json::json!({ "email": email, "password": "pw123secret" }),
        )
        .await;
    assert_eq!(old.status().as_u16(), 401);

    let new = app
        .post_json(
            "/login",
            &serde_json::json!({ "email": email, "password": "brand-new-pw" }),
        )
        .await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn reset_code_request_for_unknown_account_is_404() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;

    let response = app
        .post_json(
            "/forgot-password/send-code",
            &serde_json::json!({ "email": random_email() }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn reset_code_delivery_failure_surfaces_as_500() {
    let app = TestApp::new().await;
    // Unlike /send-code, this path waits on the mail call.
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    let email = random_email();
    app.seed_account(&email, "pw123secret").await;

    let response = app
        .post_json(
            "/forgot-password/send-code",
            &serde_json::json!({ "email": email }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn a_reset_code_is_single_use() {
    let app = TestApp::new().await;
    app.allow_email_delivery().await;
    let email = random_email();
    app.seed_account(&email, "pw123secret").await;

    app.post_json(
        "/forgot-password/send-code",
        &serde_json::json!({ "email": email }),
    )
    .await;
    let code = app.issued_code(&email).await;

    let first = app
        .post_json(
            "/forgot-password/reset",
            &serde_json::json!({ "email": email, "code": code, "newPassword": "brand-new-pw" }),
        )
        .await;
    assert_eq!(first.status().as_u16(), 200);

    let replay = app
        .post_json(
            "/forgot-password/reset",
            &serde_json::json!({ "email": email, "code": code, "newPassword": "another-new-pw" }),
        )
        .await;
    assert_eq!(replay.status().as_u16(), 401);
}
