use crate::helpers::time::now_i64;
use crate::utils::constants::TOKEN_SAFETY_MARGIN_SECS;

/// Cached access token with its precomputed expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: i64, // UNIX timestamp
}

impl CachedToken {
    pub fn new(value: String, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    /// Build from a server-reported lifetime, discounting the safety margin.
    /// A lifetime shorter than the margin yields an already stale token.
    pub fn from_lifetime(value: String, lifetime_secs: i64) -> Self {
        let mut usable = lifetime_secs.saturating_sub(TOKEN_SAFETY_MARGIN_SECS);
        if usable < 0 {
            usable = 0;
        }
        Self {
            value,
            expires_at: now_i64().saturating_add(usable),
        }
    }

    pub fn is_expired(&self) -> bool {
        now_i64() >= self.expires_at
    }
}
