//! Driven port for user account storage.
use async_trait::async_trait;

use crate::domain::{HexId, PasswordHash, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is taken.
        AlreadyExists { username: String } => "user already exists: {username}",
        /// The username exists but the password hash does not match.
        WrongCredential { username: String } => "wrong credential for user: {username}",
        /// No user has the identifier.
        NotFoundById { id: String } => "user not found by id: {id}",
        /// No user has the username.
        NotFoundByUsername { username: String } => "user not found by username: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user, rejecting duplicate usernames.
    async fn add_user(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by username and password hash.
    async fn user_by_credentials(
        &self,
        username: &str,
        password_hash: &PasswordHash,
    ) -> Result<User, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn user_by_id(&self, id: &HexId) -> Result<User, UserRepositoryError>;
}
