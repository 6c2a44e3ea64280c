/// Connection id used when the caller does not name one.
pub const DEFAULT_CONNECTION_ID: &str = "looker_default";

/// Relative path of the token-issuing endpoint, joined onto the host.
pub const LOGIN_ENDPOINT: &str = "login";

/// Prefix of the versioned API endpoints used by the bundled operations.
pub const API_PREFIX: &str = "api/3.0";

/// Request timeout applied to the login call and every dispatched call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
