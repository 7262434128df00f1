//! Driving port for registration and login.
//!
//! Both operations return the [`Author`] reference that inbound adapters
//! store in the caller's session.

use async_trait::async_trait;

use crate::domain::{Author, BoardError, Credentials, HexId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an account.
    async fn register(&self, credentials: Credentials) -> Result<Author, BoardError>;

    /// Check credentials against an existing account.
    async fn login(&self, credentials: Credentials) -> Result<Author, BoardError>;

    /// Resolve an identifier to its author reference.
    async fn user_by_id(&self, id: &HexId) -> Result<Author, BoardError>;
}
