use std::sync::Arc;

use color_eyre::eyre::Result;
use gatehouse_adapters::{
    auth::SessionTokenConfig,
    config::GatehouseSettings,
    email::PostmarkEmailClient,
    http::routes::OAuthSuccessRedirect,
    oauth::{FacebookOAuthClient, GoogleOAuthClient, ProviderEndpoints},
    persistence::{PostgresAccountStore, RedisVerificationCodeStore},
};
use gatehouse_core::Email;
use gatehouse_service::{GatehouseService, configure_postgresql, configure_redis};
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tokio::sync::RwLock;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let settings = GatehouseSettings::load();

    // Stores: accounts in Postgres, live verification codes in Redis
    let pg_pool = configure_postgresql(settings).await;
    let redis_conn = Arc::new(RwLock::new(configure_redis(settings)));

    let account_store = PostgresAccountStore::new(pg_pool);
    let code_store = RedisVerificationCodeStore::new(redis_conn);

    // Outbound HTTP: email delivery and OAuth provider calls
    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::from(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        http_client.clone(),
    );

    let google_client = GoogleOAuthClient::new(
        &settings.oauth.google,
        ProviderEndpoints::google(),
        http_client.clone(),
    )?;
    let facebook_client = FacebookOAuthClient::new(
        &settings.oauth.facebook,
        ProviderEndpoints::facebook(),
        http_client,
    )?;

    let token_config = SessionTokenConfig {
        jwt_secret: settings.auth.jwt.secret.clone(),
        token_ttl_in_seconds: settings.auth.jwt.time_to_live_seconds,
    };

    let service = GatehouseService::new(
        account_store,
        code_store,
        email_client,
        google_client,
        facebook_client,
        token_config,
        OAuthSuccessRedirect(settings.oauth.success_redirect.clone()),
    );

    let allowed_origins = if settings.app.allowed_origins.is_empty() {
        None
    } else {
        Some(settings.app.allowed_origins.clone())
    };

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
