//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use mockable::DefaultClock;

use crate::domain::validation::schemas::board_validator;
use crate::domain::{AccountsService, PostsService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{MemoryPostRepository, MemoryUserRepository};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware_with_key(Key::generate())
}

/// Session middleware sharing `key`, so cookies carry over between apps.
pub fn session_middleware_with_key(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Handler state wired to empty in-memory repositories.
pub fn memory_state() -> HttpState {
    let posts = Arc::new(PostsService::new(
        Arc::new(MemoryPostRepository::new()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(
        posts.clone(),
        posts,
        Arc::new(AccountsService::new(Arc::new(MemoryUserRepository::new()))),
        board_validator(),
    )
}
