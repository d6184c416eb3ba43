//! Session cookie attributes derived from the incoming request.
//!
//! The session cookie is always `HttpOnly`, scoped to `/` and sent with
//! `SameSite=None`. Only the `Secure` flag depends on the request: it is set
//! when the client reached us over HTTPS, either directly or through a
//! reverse proxy reporting it in `x-forwarded-proto`.

use axum::http::header::{InvalidHeaderValue, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use cookie::Cookie;
use forge_core::{RequestSignal, FORWARDED_PROTO_HEADER, SESSION_COOKIE_NAME, SESSION_MAX_AGE_SECS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CookieError {
    #[error("Invalid cookie header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl From<SameSite> for cookie::SameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

/// Attributes for the session cookie, named the way the HTTP layer's
/// cookie setter expects them when serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookieOptions {
    pub secure: bool,
    pub http_only: bool,
    pub path: String,
    pub same_site: SameSite,
}

/// Whether the client-facing leg of the request used HTTPS.
///
/// When `x-forwarded-proto` carries at least one token, the request is secure
/// if any of those tokens is `https`. Otherwise the request's own protocol
/// decides.
pub fn is_secure_request(request: &RequestSignal) -> bool {
    let mut forwarded = request
        .header_values(FORWARDED_PROTO_HEADER)
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .peekable();

    if forwarded.peek().is_none() {
        return request.protocol.eq_ignore_ascii_case("https");
    }

    // Any entry counts, not just the left-most one.
    forwarded.any(|token| token.eq_ignore_ascii_case("https"))
}

pub fn get_session_cookie_options(request: &RequestSignal) -> SessionCookieOptions {
    SessionCookieOptions {
        secure: is_secure_request(request),
        http_only: true,
        path: "/".to_string(),
        same_site: SameSite::None,
    }
}

/// Build the session cookie carrying `value`, valid for one year
pub fn build_session_cookie(
    name: &str,
    value: &str,
    options: &SessionCookieOptions,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), value.to_string()))
        .http_only(options.http_only)
        .path(options.path.clone())
        .max_age(cookie::time::Duration::seconds(SESSION_MAX_AGE_SECS))
        .same_site(options.same_site.into())
        .secure(options.secure)
        .build()
}

/// Build the cookie that removes the session on logout
pub fn build_cleared_session_cookie(name: &str, options: &SessionCookieOptions) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .http_only(options.http_only)
        .path(options.path.clone())
        .max_age(cookie::time::Duration::seconds(0))
        .same_site(options.same_site.into())
        .secure(options.secure)
        .build()
}

/// `Set-Cookie` headers establishing the session for `request`
pub fn session_cookie_headers(
    session_token: &str,
    request: &RequestSignal,
) -> Result<HeaderMap, CookieError> {
    let options = get_session_cookie_options(request);
    let session_cookie = build_session_cookie(SESSION_COOKIE_NAME, session_token, &options);

    debug!("Adding session cookie (secure: {})", options.secure);
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_str(&session_cookie.to_string())?);
    Ok(headers)
}

/// `Set-Cookie` headers clearing the session for `request`
pub fn clear_session_cookie_headers(request: &RequestSignal) -> Result<HeaderMap, CookieError> {
    let options = get_session_cookie_options(request);
    let cleared = build_cleared_session_cookie(SESSION_COOKIE_NAME, &options);

    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_str(&cleared.to_string())?);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(protocol: &str, forwarded: &[&str]) -> RequestSignal {
        let mut headers = HeaderMap::new();
        for value in forwarded {
            headers.append(FORWARDED_PROTO_HEADER, HeaderValue::from_str(value).unwrap());
        }
        RequestSignal::new(protocol, headers)
    }

    #[test]
    fn test_protocol_used_without_forwarded_header() {
        assert!(is_secure_request(&request("https", &[])));
        assert!(is_secure_request(&request("HTTPS", &[])));
        assert!(!is_secure_request(&request("http", &[])));
        assert!(!is_secure_request(&request("", &[])));
    }

    #[test]
    fn test_forwarded_header_overrides_protocol() {
        assert!(is_secure_request(&request("http", &["https"])));
        assert!(!is_secure_request(&request("https", &["http"])));
    }

    #[test]
    fn test_any_forwarded_token_may_be_https() {
        assert!(is_secure_request(&request("http", &["http,https"])));
        assert!(is_secure_request(&request("http", &["https, http"])));
        assert!(is_secure_request(&request("http", &[" http ,  HTTPS "])));
        assert!(!is_secure_request(&request("http", &["http, http"])));
    }

    #[test]
    fn test_repeated_forwarded_headers_are_combined() {
        assert!(is_secure_request(&request("http", &["http", "https"])));
        assert!(!is_secure_request(&request("https", &["http", "ws"])));
    }

    #[test]
    fn test_blank_forwarded_header_falls_back_to_protocol() {
        assert!(is_secure_request(&request("https", &[""])));
        assert!(is_secure_request(&request("https", &[" , "])));
        assert!(!is_secure_request(&request("http", &[","])));
    }

    #[test]
    fn test_cleared_cookie_expires_immediately() {
        let options = get_session_cookie_options(&request("https", &[]));
        let cookie = build_cleared_session_cookie(SESSION_COOKIE_NAME, &options);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(cookie::time::Duration::ZERO));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
