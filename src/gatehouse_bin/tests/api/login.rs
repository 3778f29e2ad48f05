use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let app = TestApp::new().await;
    let email = random_email();
    app.seed_account(&email, "pw123secret").await;

    let wrong_password = app
        .post_json(
            "/login",
            &serde_json::json!({ "email": email, "password": "not-the-password" }),
        )
        .await;
    let wrong_status = wrong_password.status().as_u16();
    let wrong_body = wrong_password.text().await.unwrap();

    let unknown_user = app
        .post_json(
            "/login",
            &serde_json::json!({ "email": random_email(), "password": "pw123secret" }),
        )
        .await;
    let unknown_status = unknown_user.status().as_u16();
    let unknown_body = unknown_user.text().await.unwrap();

    // Same status, same body: the response leaks nothing about which half
    // of the credential pair was wrong.
    assert_eq!(wrong_status, 401);
    assert_eq!(unknown_status, 401);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn login_returns_a_verifiable_session_token() {
    let app = TestApp::new().await;
    let email = random_email();
    app.seed_account(&email, "pw123secret").await;

    let token = app.login_token(&email, "pw123secret").await;
    assert_eq!(token.split('.').count(), 3);

    let response = app
        .http_client
        .post(format!("{}/verify-token", app.address))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn verify_token_rejects_garbage_and_missing_tokens() {
    let app = TestApp::new().await;

    let garbage = app
        .http_client
        .post(format!("{}/verify-token", app.address))
        .header("Authorization", "Bearer not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status().as_u16(), 401);

    let missing = app
        .http_client
        .post(format!("{}/verify-token", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 400);
}
