//! In-memory `UserRepository` adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{HexId, PasswordHash, User};

/// User store keyed by unique username.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn add_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserRepositoryError::already_exists(user.username()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn user_by_credentials(
        &self,
        username: &str,
        password_hash: &PasswordHash,
    ) -> Result<User, UserRepositoryError> {
        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|user| user.username() == username)
            .ok_or_else(|| UserRepositoryError::not_found_by_username(username))?;
        if user.password_hash() != password_hash {
            return Err(UserRepositoryError::wrong_credential(username));
        }
        Ok(user.clone())
    }

    async fn user_by_id(&self, id: &HexId) -> Result<User, UserRepositoryError> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found_by_id(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn id(fill: char) -> HexId {
        HexId::new(fill.to_string().repeat(24)).expect("valid id")
    }

    #[fixture]
    fn van() -> User {
        User::new(id('a'), "van", PasswordHash::digest("secret"))
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_is_rejected(van: User) {
        let repo = MemoryUserRepository::new();
        repo.add_user(&van).await.expect("first insert");

        let twin = User::new(id('b'), "van", PasswordHash::digest("other"));
        let error = repo.add_user(&twin).await.expect_err("duplicate");
        assert_eq!(error, UserRepositoryError::already_exists("van"));
    }

    #[rstest]
    #[case("van", "secret", None)]
    #[case("van", "wrong", Some(UserRepositoryError::wrong_credential("van")))]
    #[case("nobody", "secret", Some(UserRepositoryError::not_found_by_username("nobody")))]
    #[tokio::test]
    async fn credential_lookup(
        van: User,
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected_error: Option<UserRepositoryError>,
    ) {
        let repo = MemoryUserRepository::new();
        repo.add_user(&van).await.expect("insert");

        let result = repo
            .user_by_credentials(username, &PasswordHash::digest(password))
            .await;
        match expected_error {
            None => assert_eq!(result.expect("found"), van),
            Some(expected) => assert_eq!(result.expect_err("rejected"), expected),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_by_id(van: User) {
        let repo = MemoryUserRepository::new();
        repo.add_user(&van).await.expect("insert");

        assert_eq!(repo.user_by_id(&id('a')).await.expect("found"), van);
        let error = repo.user_by_id(&id('c')).await.expect_err("missing");
        assert!(matches!(error, UserRepositoryError::NotFoundById { .. }));
    }
}
