//! Client configuration validation with aggregated errors.
//! All problems are collected into one `Vec<String>` so a single run
//! reports every missing field, not just the first.

use tracing::{error, info};

use crate::config::settings::{ClientConfig, RawClientConfig};
use crate::error::WecomError;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::DEFAULT_BASE_URL;

/// Public entrypoint: returns the validated config or a single `Config`
/// error enumerating everything that is missing or malformed.
pub async fn validate_client_config(raw: &RawClientConfig) -> Result<ClientConfig, WecomError> {
    let mut missing: Vec<String> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    let corp_id = required_string(&raw.corp_id, "corp_id", &mut missing);
    let agent_secret = required_string(&raw.agent_secret, "agent_secret", &mut missing);

    // agent_id 0 counts as unset
    let agent_id = match raw.agent_id {
        Some(id) if id != 0 => id,
        _ => {
            missing.push("agent_id".to_owned());
            0
        }
    };

    // blank contacts_secret behaves as absent: contacts calls fall back
    // to the messaging credential
    let contacts_secret = raw
        .contacts_secret
        .as_ref()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_owned());

    let base_url = raw
        .base_url
        .as_ref()
        .map(|s| s.trim().trim_end_matches('/').to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(format!("client.base_url '{}' must be http(s)", base_url));
    }

    if !missing.is_empty() {
        errors.insert(0, format!("missing required config: {}", missing.join(", ")));
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(ClientConfig {
            corp_id,
            agent_id,
            agent_secret,
            contacts_secret,
            base_url,
            safe_mode: raw.safe_mode,
        })
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_validation_errors.inc();
        Err(WecomError::Config(errors.join("; ")))
    }
}

fn required_string(value: &Option<String>, name: &str, missing: &mut Vec<String>) -> String {
    match value.as_ref().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(v) => v.to_owned(),
        None => {
            missing.push(name.to_owned());
            String::new()
        }
    }
}
