//! Builders wiring repositories into the services behind [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use board::domain::validation::schemas::board_validator;
use board::domain::{AccountsService, PostsService};
use board::inbound::http::state::HttpState;
use board::outbound::persistence::{MemoryPostRepository, MemoryUserRepository};

/// Build handler state over in-memory repositories.
///
/// One [`PostsService`] serves both the command and query ports so that
/// every mutation shares its lock.
pub(super) fn build_http_state() -> web::Data<HttpState> {
    let posts = Arc::new(PostsService::new(
        Arc::new(MemoryPostRepository::new()),
        Arc::new(DefaultClock),
    ));
    let accounts = Arc::new(AccountsService::new(Arc::new(MemoryUserRepository::new())));
    web::Data::new(HttpState::new(
        posts.clone(),
        posts,
        accounts,
        board_validator(),
    ))
}
