use std::time::Duration;

use gatehouse_adapters::config::GatehouseSettings;
use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Upper bound on any single wait against the stores; a saturated or
/// unreachable backend surfaces as an error instead of a hung request.
const PERSISTENCE_TIMEOUT: Duration = Duration::from_secs(3);

/// Configure and return a PostgreSQL connection pool.
///
/// Creates the pool from the configured URL and runs all pending
/// migrations.
///
/// # Panics
/// Panics if unable to create the pool or run migrations.
pub async fn configure_postgresql(settings: &GatehouseSettings) -> PgPool {
    let pg_pool = get_postgres_pool(settings.postgres.url.expose_secret())
        .await
        .expect("Failed to create Postgres connection pool");

    sqlx::migrate!("../gatehouse_bin/migrations")
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Configure and return a Redis connection with bounded IO timeouts.
///
/// # Panics
/// Panics if unable to connect to Redis.
pub fn configure_redis(settings: &GatehouseSettings) -> redis::Connection {
    let conn = get_redis_client(&settings.redis.host_name)
        .expect("Failed to get Redis client")
        .get_connection()
        .expect("Failed to get Redis connection");
    conn.set_read_timeout(Some(PERSISTENCE_TIMEOUT))
        .expect("Failed to set Redis read timeout");
    conn.set_write_timeout(Some(PERSISTENCE_TIMEOUT))
        .expect("Failed to set Redis write timeout");
    conn
}

/// Create a PostgreSQL connection pool.
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(PERSISTENCE_TIMEOUT)
        .connect(url)
        .await
}

/// Create a Redis client.
pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
