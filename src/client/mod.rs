//! WeCom API client: token management plus the operation surface.

pub mod operations;
pub mod request;
pub mod token_manager;
pub mod types;

use std::time::Duration;

use reqwest::Client;

use crate::client::token_manager::{CredentialScope, TokenManager};
use crate::config::settings::ClientConfig;
use crate::error::WecomError;
use crate::utils::constants::DATA_REQUEST_TIMEOUT_SECS;

/// One corp account's view of the API.
///
/// Owns its token cache; separate clients never share cached
/// credentials. Clones share the cache of the client they came from.
#[derive(Debug, Clone)]
pub struct WecomClient {
    pub config: ClientConfig,
    pub tokens: TokenManager,
    pub http: Client,
}

impl WecomClient {
    pub fn new(config: ClientConfig) -> Result<Self, WecomError> {
        let tokens = TokenManager::new(config.corp_id.clone(), config.base_url.clone())?;
        let http = Client::builder()
            .timeout(Duration::from_secs(DATA_REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            config,
            tokens,
            http,
        })
    }

    /// Resolve which secret a scope authenticates with. The contacts
    /// scope falls back to the messaging secret when not configured.
    pub fn secret_for(&self, scope: CredentialScope) -> &str {
        match scope {
            CredentialScope::Messaging => &self.config.agent_secret,
            CredentialScope::Contacts => self
                .config
                .contacts_secret
                .as_deref()
                .unwrap_or(&self.config.agent_secret),
        }
    }
}
