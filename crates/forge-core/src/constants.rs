/// Cookie carrying the session token issued after login
pub const SESSION_COOKIE_NAME: &str = "app_session_id";

/// Session cookie lifetime (one year)
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;

/// Header a reverse proxy uses to report the client-facing protocol
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

pub const FORGE_API_URL_ENV: &str = "BUILT_IN_FORGE_API_URL";
pub const FORGE_API_KEY_ENV: &str = "BUILT_IN_FORGE_API_KEY";
