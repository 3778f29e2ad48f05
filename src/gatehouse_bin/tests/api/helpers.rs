use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use gatehouse_adapters::auth::SessionTokenConfig;
use gatehouse_adapters::config::constants::test as test_constants;
use gatehouse_adapters::config::settings::OAuthProviderSettings;
use gatehouse_adapters::email::PostmarkEmailClient;
use gatehouse_adapters::http::routes::OAuthSuccessRedirect;
use gatehouse_adapters::oauth::{FacebookOAuthClient, GoogleOAuthClient, ProviderEndpoints};
use gatehouse_adapters::persistence::{HashMapAccountStore, HashMapVerificationCodeStore};
use gatehouse_core::{Email, NewAccount, Password, Profile};
use gatehouse_service::GatehouseService;
use secrecy::Secret;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SUCCESS_DEEP_LINK: &str = "eventapp://login/success";
pub const JWT_SECRET: &str = "api-test-jwt-secret";

/// A running service instance on an ephemeral port, with in-memory stores
/// and wiremock standing in for Postmark and the OAuth provider.
pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub account_store: HashMapAccountStore,
    pub code_store: HashMapVerificationCodeStore,
    pub email_server: MockServer,
    pub oauth_server: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let email_server = MockServer::start().await;
        let oauth_server = MockServer::start().await;

        let account_store = HashMapAccountStore::new();
        let code_store = HashMapVerificationCodeStore::new();

        let outbound_client = reqwest::Client::builder()
            .timeout(test_constants::email_client::TIMEOUT)
            .build()
            .unwrap();

        let sender =
            Email::try_from(Secret::from(test_constants::email_client::SENDER.to_string()))
                .unwrap();
        let email_client = PostmarkEmailClient::new(
            email_server.uri(),
            sender,
            Secret::from("postmark-token".to_string()),
            outbound_client.clone(),
        );

        let provider_settings = OAuthProviderSettings {
            client_id: "test-client-id".to_string(),
            client_secret: Secret::from("test-client-secret".to_string()),
            redirect_url: "http://127.0.0.1/unused-callback".to_string(),
        };
        let endpoints = ProviderEndpoints {
            auth_url: format!("{}/oauth/authorize", oauth_server.uri()),
            token_url: format!("{}/oauth/token", oauth_server.uri()),
            userinfo_url: format!("{}/userinfo", oauth_server.uri()),
        };
        let google_client =
            GoogleOAuthClient::new(&provider_settings, endpoints.clone(), outbound_client.clone())
                .unwrap();
        let facebook_client =
            FacebookOAuthClient::new(&provider_settings, endpoints, outbound_client).unwrap();

        let token_config = SessionTokenConfig::new(Secret::from(JWT_SECRET.to_string()));

        let service = GatehouseService::new(
            account_store.clone(),
            code_store.clone(),
            email_client,
            google_client,
            facebook_client,
            token_config,
            OAuthSuccessRedirect(SUCCESS_DEEP_LINK.to_string()),
        );

        let listener = tokio::net::TcpListener::bind(test_constants::APP_ADDRESS)
            .await
            .unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(service.run_standalone(listener, None));

        // Redirects stay observable: OAuth assertions read Location headers.
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            account_store,
            code_store,
            email_server,
            oauth_server,
        }
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("request failed")
    }

    /// Peek the live verification code for an email straight out of the
    /// in-memory store, the way a user would read it out of their inbox.
    pub async fn issued_code(&self, raw_email: &str) -> String {
        let email = parse_email(raw_email);
        let (code, _) = self.code_store.issued(&email).await.expect("no code issued");
        code.as_str().to_string()
    }

    pub async fn issued_code_expiry(&self, raw_email: &str) -> i64 {
        let email = parse_email(raw_email);
        let (_, expires_at) = self.code_store.issued(&email).await.expect("no code issued");
        expires_at
    }

    /// Accept any outbound email.
    pub async fn allow_email_delivery(&self) {
        Mock::given(method("POST"))
            .and(path("/email"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.email_server)
            .await;
    }

    /// Seed an `email`-provider account directly, skipping the code flow.
    pub async fn seed_account(&self, raw_email: &str, raw_password: &str) {
        use gatehouse_core::AccountStore;

        let new_account = NewAccount::with_credentials(
            parse_email(raw_email),
            Password::try_from(Secret::from(raw_password.to_string())).unwrap(),
            Profile {
                given_name: "Test".to_string(),
                family_name: "User".to_string(),
                phone: None,
                birth_date: None,
            },
        );
        self.account_store.add_account(new_account).await.unwrap();
    }

    /// Log in through the API and return the session token.
    pub async fn login_token(&self, raw_email: &str, raw_password: &str) -> String {
        let response = self
            .post_json(
                "/login",
                &serde_json::json!({ "email": raw_email, "password": raw_password }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        body["token"].as_str().expect("token missing").to_string()
    }
}

pub fn parse_email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn random_email() -> String {
    SafeEmail().fake()
}

pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}
