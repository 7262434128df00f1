//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PostsCommand, PostsQuery, UserAccounts};
use crate::domain::validation::Validator;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub accounts: Arc<dyn UserAccounts>,
    pub validator: Validator,
}

impl HttpState {
    /// Bundle the driving ports with the request validator built at startup.
    pub fn new(
        posts: Arc<dyn PostsCommand>,
        posts_query: Arc<dyn PostsQuery>,
        accounts: Arc<dyn UserAccounts>,
        validator: Validator,
    ) -> Self {
        Self {
            posts,
            posts_query,
            accounts,
            validator,
        }
    }
}
