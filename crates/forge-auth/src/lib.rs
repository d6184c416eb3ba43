//! Session cookie policy for the Forge web backend

pub mod cookies;

pub use cookies::{
    build_cleared_session_cookie, build_session_cookie, clear_session_cookie_headers,
    get_session_cookie_options, is_secure_request, session_cookie_headers, CookieError, SameSite,
    SessionCookieOptions,
};
