use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn profile_round_trip_with_bearer_token() {
    let app = TestApp::new().await;
    let email = random_email();
    app.seed_account(&email, "pw123secret").await;
    let token = app.login_token(&email, "pw123secret").await;

    let response = app
        .http_client
        .get(format!("{}/user/profile", app.address))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["givenName"], "Test");
    assert_eq!(body["provider"], "email");
}

#[tokio::test]
async fn update_applies_only_non_empty_fields() {
    let app = TestApp::new().await;
    let email = random_email();
    app.seed_account(&email, "pw123secret").await;
    let token = app.login_token(&email, "pw123secret").await;

    // Empty strings mean "leave unchanged".
    let response = app
        .http_client
        .put(format!("{}/user/profile", app.address))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({
            "givenName": "",
            "familyName": "",
            "phone": "5551234",
            "birthDate": "1990-01-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["givenName"], "Test");
    assert_eq!(body["familyName"], "User");
    assert_eq!(body["phone"], "5551234");
    assert_eq!(body["birthDate"], "1990-01-01");
}

#[tokio::test]
async fn profile_requires_a_valid_token() {
    let app = TestApp::new().await;

    let missing = app.get("/user/profile").await;
    assert_eq!(missing.status().as_u16(), 400);

    let invalid = app
        .http_client
        .get(format!("{}/user/profile", app.address))
        .header("Authorization", "Bearer forged.token.here")
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status().as_u16(), 401);
}
