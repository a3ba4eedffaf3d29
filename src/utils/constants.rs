//! Shared constants and invariants

/// Production endpoint used when `client.base_url` is not configured
pub const DEFAULT_BASE_URL: &str = "https://qyapi.weixin.qq.com";

// API paths
pub const PATH_GET_TOKEN: &str = "/cgi-bin/gettoken";
pub const PATH_MESSAGE_SEND: &str = "/cgi-bin/message/send";
pub const PATH_USER_GET: &str = "/cgi-bin/user/get";
pub const PATH_API_DOMAIN_IP: &str = "/cgi-bin/get_api_domain_ip";

/// Seconds subtracted from the server-reported token lifetime
pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 120;
/// Assumed lifetime when the exchange response omits `expires_in`
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 7200;

pub const TOKEN_EXCHANGE_TIMEOUT_SECS: u64 = 15;
pub const DATA_REQUEST_TIMEOUT_SECS: u64 = 20;

/// In-band error codes meaning the access token itself was rejected
/// (invalid or expired); the cached token must be dropped
pub const AUTH_ERROR_CODES: [i64; 3] = [40014, 42001, 42009];
