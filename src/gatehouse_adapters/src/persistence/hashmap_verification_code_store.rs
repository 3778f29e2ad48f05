use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use gatehouse_core::{
    Email, VerificationCode, VerificationCodeStore, VerificationCodeStoreError,
};
use tokio::sync::RwLock;

#[derive(Clone)]
struct StoredCode {
    code: VerificationCode,
    expires_at: i64,
}

/// In-memory code store for tests and local development.
#[derive(Default, Clone)]
pub struct HashMapVerificationCodeStore {
    codes: Arc<RwLock<HashMap<Email, StoredCode>>>,
}

impl HashMapVerificationCodeStore {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Peek at the live code for an email without consuming it. Test-only
    /// convenience of the concrete type, not part of the port.
    pub async fn issued(&self, email: &Email) -> Option<(VerificationCode, i64)> {
        self.codes
            .read()
            .await
            .get(email)
            .map(|stored| (stored.code.clone(), stored.expires_at))
    }

    /// Force the stored expiry into the past, so expiry handling is testable
    /// without waiting out a TTL.
    pub async fn expire_now(&self, email: &Email) {
        if let Some(stored) = self.codes.write().await.get_mut(email) {
            stored.expires_at = Utc::now().timestamp() - 1;
        }
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for HashMapVerificationCodeStore {
    async fn store_code(
        &self,
        email: Email,
        code: VerificationCode,
        ttl: Duration,
    ) -> Result<(), VerificationCodeStoreError> {
        let stored = StoredCode {
            code,
            expires_at: Utc::now().timestamp() + ttl.as_secs() as i64,
        };
        self.codes.write().await.insert(email, stored);
        Ok(())
    }

    async fn consume_code(
        &self,
        email: &Email,
        submitted: &VerificationCode,
    ) -> Result<(), VerificationCodeStoreError> {
        let mut codes = self.codes.write().await;

        let stored = codes
            .get(email)
            .ok_or(VerificationCodeStoreError::NoCodeIssued)?;

        if stored.code != *submitted {
            return Err(VerificationCodeStoreError::CodeMismatch);
        }
        if Utc::now().timestamp() > stored.expires_at {
            return Err(VerificationCodeStoreError::CodeExpired);
        }

        codes.remove(email);
        Ok(())
    }
}
