//! User accounts and the author reference stamped onto content.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::HexId;

/// Validation errors returned by [`Credentials::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// The username was empty.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Username and plaintext password supplied at register or login.
///
/// The password buffer is wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build credentials, rejecting empty fields.
    pub fn try_from_parts(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CredentialsValidationError> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self { username, password })
    }

    /// Account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// One-way digest of the password, as stored by the users repository.
    pub fn password_hash(&self) -> PasswordHash {
        PasswordHash::digest(&self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Hex-encoded SHA-256 digest of a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Digest a plaintext password.
    ///
    /// # Examples
    /// ```
    /// use board::domain::PasswordHash;
    ///
    /// let hash = PasswordHash::digest("hunter2");
    /// assert_eq!(hash.as_str().len(), 64);
    /// assert_eq!(hash, PasswordHash::digest("hunter2"));
    /// ```
    pub fn digest(plaintext: &str) -> Self {
        Self(hex::encode(Sha256::digest(plaintext.as_bytes())))
    }

    /// Borrow the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity of the acting user, also stored as the author of posts and comments.
///
/// Immutable once stamped onto content; ownership checks compare `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable user identifier.
    pub id: HexId,
    /// Username at the time the content was created.
    pub username: String,
}

impl Author {
    /// Build an author reference.
    pub fn new(id: HexId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Registered account as held by the users repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: HexId,
    username: String,
    password_hash: PasswordHash,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: HexId, username: impl Into<String>, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &HexId {
        &self.id
    }

    /// Unique account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored password digest.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// The author reference used when this user creates content.
    pub fn as_author(&self) -> Author {
        Author::new(self.id.clone(), self.username.clone())
    }
}
