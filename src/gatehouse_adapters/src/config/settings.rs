use std::sync::LazyLock;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use crate::auth::SESSION_TOKEN_TTL_SECONDS;

use super::constants;

/// Process configuration: an optional `gatehouse.json` next to the binary,
/// overridden by `GATEHOUSE__`-prefixed environment variables
/// (`GATEHOUSE__POSTGRES__URL`, `GATEHOUSE__AUTH__JWT__SECRET`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct GatehouseSettings {
    pub app: AppSettings,
    pub postgres: PostgresSettings,
    #[serde(default)]
    pub redis: RedisSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
    pub oauth: OAuthSettings,
}

impl GatehouseSettings {
    /// Load once per process; panics on malformed configuration, which is
    /// the right failure mode at startup.
    pub fn load() -> &'static GatehouseSettings {
        static SETTINGS: LazyLock<GatehouseSettings> = LazyLock::new(|| {
            dotenvy::dotenv().ok();
            config::Config::builder()
                .add_source(
                    config::File::with_name(constants::CONFIG_FILE_NAME).required(false),
                )
                .add_source(config::Environment::with_prefix("GATEHOUSE").separator("__"))
                .build()
                .expect("Failed to read configuration")
                .try_deserialize()
                .expect("Failed to deserialize configuration")
        });
        &SETTINGS
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_address")]
    pub address: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    #[serde(default = "default_redis_host")]
    pub host_name: String,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host_name: default_redis_host(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_token_ttl")]
    pub time_to_live_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_email_timeout_millis")]
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthSettings {
    pub google: OAuthProviderSettings,
    pub facebook: OAuthProviderSettings,
    /// Client deep link the callback redirects to after reconciliation.
    pub success_redirect: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthProviderSettings {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub redirect_url: String,
}

/// CORS origin allowlist, written as a comma-separated string in
/// configuration. Origins that fail header-value parsing are dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "String")]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect(),
        )
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AllowedOrigins {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

fn default_app_address() -> String {
    constants::prod::APP_ADDRESS.to_string()
}

fn default_redis_host() -> String {
    "127.0.0.1".to_string()
}

fn default_token_ttl() -> i64 {
    SESSION_TOKEN_TTL_SECONDS
}

fn default_email_base_url() -> String {
    constants::prod::email_client::BASE_URL.to_string()
}

fn default_email_timeout_millis() -> u64 {
    constants::prod::email_client::TIMEOUT.as_millis() as u64
}
