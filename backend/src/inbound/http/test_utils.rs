//! Test helpers for inbound HTTP components.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

/// Build a session middleware configured for tests: a fresh key per
/// invocation, the `session` cookie name the real server uses, and the
/// `Secure` flag off so plain-HTTP test requests keep their cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}
