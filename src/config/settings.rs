use serde::Deserialize;

/// ================================
/// Service-wide configuration file
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub client: RawClientConfig,
    pub logging: Option<LoggingConfig>,
}

/// Client section exactly as it appears in YAML, before validation.
/// All fields optional so validation can report every gap at once.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawClientConfig {
    pub corp_id: Option<String>,
    pub agent_id: Option<i64>,
    pub agent_secret: Option<String>,
    pub contacts_secret: Option<String>,
    pub base_url: Option<String>,
    #[serde(default)]
    pub safe_mode: bool,
}

/// Validated, immutable client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub corp_id: String,
    pub agent_id: i64,
    /// Messaging-scope credential, also the contacts fallback
    pub agent_secret: String,
    pub contacts_secret: Option<String>,
    /// Normalized: no trailing slash
    pub base_url: String,
    /// Default for messages that do not set `safe` themselves
    pub safe_mode: bool,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
