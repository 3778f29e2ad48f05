use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use gatehouse_core::{
    Email, VerificationCode, VerificationCodeStore, VerificationCodeStoreError,
};
use redis::{Commands, Connection};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RedisVerificationCodeStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisVerificationCodeStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

/// The stored timestamp is authoritative for expiry so an expired-but-known
/// code is still distinguishable from no code at all. The Redis TTL is only
/// garbage collection and therefore runs longer.
#[derive(Serialize, Deserialize)]
struct StoredCode {
    code: String,
    expires_at: i64,
}

#[async_trait::async_trait]
impl VerificationCodeStore for RedisVerificationCodeStore {
    #[tracing::instrument(name = "Storing verification code in Redis", skip_all)]
    async fn store_code(
        &self,
        email: Email,
        code: VerificationCode,
        ttl: Duration,
    ) -> Result<(), VerificationCodeStoreError> {
        let key = get_key(&email);
        let stored = StoredCode {
            code: code.as_str().to_string(),
            expires_at: Utc::now().timestamp() + ttl.as_secs() as i64,
        };
        let payload = serde_json::to_string(&stored)
            .map_err(|e| VerificationCodeStoreError::UnexpectedError(e.to_string()))?;

        let gc_ttl = ttl.as_secs() * 2;

        let mut conn = self.conn.write().await;
        conn.set_ex(key, payload, gc_ttl)
            .map_err(|e| VerificationCodeStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Consuming verification code from Redis", skip_all)]
    async fn consume_code(
        &self,
        email: &Email,
        submitted: &VerificationCode,
    ) -> Result<(), VerificationCodeStoreError> {
        let key = get_key(email);
        let mut conn = self.conn.write().await;

        let payload: Option<String> = conn
            .get(&key)
            .map_err(|e| VerificationCodeStoreError::UnexpectedError(e.to_string()))?;
        let Some(payload) = payload else {
            return Err(VerificationCodeStoreError::NoCodeIssued);
        };

        let stored: StoredCode = serde_json::from_str(&payload)
            .map_err(|e| VerificationCodeStoreError::UnexpectedError(e.to_string()))?;

        if stored.code != submitted.as_str() {
            return Err(VerificationCodeStoreError::CodeMismatch);
        }
        if Utc::now().timestamp() > stored.expires_at {
            // Left in place as garbage; the SET EX TTL reaps it.
            return Err(VerificationCodeStoreError::CodeExpired);
        }

        let _: () = conn
            .del(&key)
            .map_err(|e| VerificationCodeStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}

// We are using a key prefix to prevent collisions and organize data!
const VERIFICATION_CODE_KEY_PREFIX: &str = "verification_code:";

fn get_key(email: &Email) -> String {
    format!("{}{}", VERIFICATION_CODE_KEY_PREFIX, email.as_str())
}
