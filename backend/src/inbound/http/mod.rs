//! Inbound HTTP adapter: request parsing, validation, session handling and
//! the mapping from domain results to responses.

pub mod error;
pub mod health;
pub mod posts;
pub mod session;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every board endpoint on `cfg`.
///
/// Mount inside a scope wrapped by the session middleware; the handlers
/// expect [`state::HttpState`] in application data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(posts::all_posts)
        .service(posts::create_post)
        .service(posts::posts_by_category)
        .service(posts::posts_by_author)
        .service(posts::get_post)
        .service(posts::delete_post)
        .service(posts::add_comment)
        .service(posts::upvote)
        .service(posts::downvote)
        .service(posts::unvote)
        .service(posts::delete_comment);
}
