use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::cache::token::CachedToken;
use crate::cache::token_cache::TokenCache;
use crate::error::WecomError;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::{
    DEFAULT_TOKEN_LIFETIME_SECS, PATH_GET_TOKEN, TOKEN_EXCHANGE_TIMEOUT_SECS,
};

/// Which configured credential an operation authenticates with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    Messaging,
    Contacts,
}

impl CredentialScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialScope::Messaging => "messaging",
            CredentialScope::Contacts => "contacts",
        }
    }
}

/// Exchange response envelope. Unlike data calls, the exchange requires
/// an explicit `errcode` of 0; an absent code is a rejection too.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    errcode: Option<i64>,
    errmsg: Option<String>,
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// Demand-driven token acquisition for one corp account.
///
/// Tokens are cached per secret and refreshed only when a caller asks
/// for one and the cached entry is missing or expired. Nothing runs in
/// the background.
#[derive(Debug, Clone)]
pub struct TokenManager {
    pub corp_id: String,
    pub base_url: String,
    pub http: Client,
    pub cache: TokenCache,
}

impl TokenManager {
    pub fn new(corp_id: String, base_url: String) -> Result<Self, WecomError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TOKEN_EXCHANGE_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            corp_id,
            base_url,
            http,
            cache: TokenCache::new(),
        })
    }

    /// Return a usable token for the credential, exchanging if needed.
    pub async fn get_valid_token(
        &self,
        scope: CredentialScope,
        secret: &str,
    ) -> Result<String, WecomError> {
        let metrics = get_metrics().await;

        if let Some(token) = self.cache.get(secret).await {
            metrics.token_cache_hits.inc();
            debug!("token cache hit for scope '{}'", scope.as_str());
            return Ok(token.value);
        }
        metrics.token_cache_misses.inc();

        let token = self.exchange(scope, secret).await?;
        let value = token.value.clone();
        self.cache.set(secret, token).await;
        metrics.cached_tokens.set(self.cache.len().await as i64);
        Ok(value)
    }

    /// Drop the cached token for a credential; the next call will
    /// exchange again. Idempotent.
    pub async fn invalidate(&self, scope: CredentialScope, secret: &str) {
        if self.cache.invalidate(secret).await {
            let metrics = get_metrics().await;
            metrics.token_invalidations.inc();
            metrics.cached_tokens.set(self.cache.len().await as i64);
            warn!("dropped cached token for scope '{}'", scope.as_str());
        }
    }

    async fn exchange(
        &self,
        scope: CredentialScope,
        secret: &str,
    ) -> Result<CachedToken, WecomError> {
        let metrics = get_metrics().await;
        metrics.token_exchange_requests.inc();
        info!("exchanging credential for scope '{}'", scope.as_str());

        let url = format!("{}{}", self.base_url, PATH_GET_TOKEN);
        // the exchange URL carries the secret; it must never reach error text
        let response = self
            .http
            .get(&url)
            .query(&[("corpid", self.corp_id.as_str()), ("corpsecret", secret)])
            .send()
            .await
            .map_err(|e| {
                metrics.token_exchange_failures.with_label_values(&["transport"]).inc();
                WecomError::Transport(e.without_url().to_string())
            })?;
        let envelope: TokenResponse = response.json().await.map_err(|e| {
            metrics.token_exchange_failures.with_label_values(&["decode"]).inc();
            WecomError::Transport(e.without_url().to_string())
        })?;

        if envelope.errcode != Some(0) {
            metrics.token_exchange_failures.with_label_values(&["rejected"]).inc();
            return Err(WecomError::Auth {
                code: envelope.errcode,
                message: envelope
                    .errmsg
                    .unwrap_or_else(|| "token exchange rejected".to_owned()),
            });
        }

        let value = envelope.access_token.ok_or_else(|| {
            metrics.token_exchange_failures.with_label_values(&["decode"]).inc();
            WecomError::Transport("token exchange response missing access_token".to_owned())
        })?;
        let lifetime = envelope.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        Ok(CachedToken::from_lifetime(value, lifetime))
    }
}
