//! Registration and login service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserAccounts, UserRepository};
use crate::domain::{Author, BoardError, Credentials, HexId, User};

/// Service implementing [`UserAccounts`] over a user repository.
#[derive(Clone)]
pub struct AccountsService<R> {
    user_repo: Arc<R>,
}

impl<R> AccountsService<R> {
    /// Create a new service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UserAccounts for AccountsService<R>
where
    R: UserRepository,
{
    async fn register(&self, credentials: Credentials) -> Result<Author, BoardError> {
        let user = User::new(
            HexId::generate()?,
            credentials.username(),
            credentials.password_hash(),
        );
        self.user_repo.add_user(&user).await?;

        info!(user_id = %user.id(), username = user.username(), "user registered");
        Ok(user.as_author())
    }

    async fn login(&self, credentials: Credentials) -> Result<Author, BoardError> {
        let user = self
            .user_repo
            .user_by_credentials(credentials.username(), &credentials.password_hash())
            .await?;

        info!(user_id = %user.id(), username = user.username(), "user logged in");
        Ok(user.as_author())
    }

    async fn user_by_id(&self, id: &HexId) -> Result<Author, BoardError> {
        let user = self.user_repo.user_by_id(id).await?;
        Ok(user.as_author())
    }
}
