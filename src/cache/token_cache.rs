use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::token::CachedToken;

/// Credential-keyed token cache: secret -> cached token.
///
/// Owned by the client that created it, never process-global. Keyed by
/// the secret string itself, so a contacts lookup that fell back to the
/// messaging credential shares the messaging entry.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert or replace the token for a credential
    pub async fn set(&self, secret: &str, token: CachedToken) {
        let mut map = self.inner.write().await;
        map.insert(secret.to_string(), token);
    }

    /// Get the token if it exists and is not expired
    pub async fn get(&self, secret: &str) -> Option<CachedToken> {
        let map = self.inner.read().await;
        map.get(secret)
            .map(|token| token.clone())
            .filter(|t| !t.is_expired())
    }

    /// Drop the token for a credential. Idempotent; returns whether an
    /// entry was actually removed.
    pub async fn invalidate(&self, secret: &str) -> bool {
        let mut map = self.inner.write().await;
        map.remove(secret).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
