use thiserror::Error;

/// Failure classes surfaced by the client.
///
/// `Auth` and `Api` both come from the in-band `errcode` envelope; an
/// `Auth` failure additionally means the cached token for the credential
/// has already been dropped when the error reaches the caller.
#[derive(Debug, Error)]
pub enum WecomError {
    /// Missing or malformed configuration, fatal at construction time
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential rejected during token exchange, or an auth-family
    /// error code returned by a data call. `code` is absent when the
    /// exchange response carried no `errcode` at all.
    #[error("authentication failed: {message}")]
    Auth { code: Option<i64>, message: String },

    /// Business-level rejection reported inside the response body
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    /// Rejected locally before any network call was made
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connectivity, timeout or malformed-response failure
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for WecomError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs inside reqwest errors carry credentials
        WecomError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for WecomError {
    fn from(err: serde_json::Error) -> Self {
        WecomError::Transport(err.to_string())
    }
}
