use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap};
use std::convert::Infallible;

/// Protocol and header signals of an incoming request
#[derive(Debug, Clone, Default)]
pub struct RequestSignal {
    pub protocol: String, // "http" or "https"
    pub headers: HeaderMap,
}

impl RequestSignal {
    pub fn new(protocol: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            protocol: protocol.into(),
            headers,
        }
    }

    /// Build from request parts; the protocol comes from the URI scheme and
    /// defaults to "http" when the URI is origin-form.
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            protocol: parts.uri.scheme_str().unwrap_or("http").to_string(),
            headers: parts.headers.clone(),
        }
    }

    /// Every value of `name` that is valid visible ASCII, in arrival order
    pub fn header_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
    }
}

impl<S> FromRequestParts<S> for RequestSignal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
