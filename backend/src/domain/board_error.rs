//! Failures raised by the board's services and their client-facing mapping.

use serde_json::json;
use tracing::{error, warn};

use super::ports::{PostRepositoryError, UserRepositoryError};
use super::validation::{Location, ValidationError};
use super::{Error, HexIdError};

/// Domain failure taxonomy.
///
/// Every variant carries the identifying value needed to describe it. Storage
/// and identifier-generation faults are kept distinct for logging but are
/// reported to clients as internal errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Registration with a taken username.
    #[error("user already exists: {username}")]
    UserAlreadyExists { username: String },
    /// Login with a password that does not match.
    #[error("wrong credential for user: {username}")]
    WrongCredential { username: String },
    /// No user has the identifier.
    #[error("user not found by ID: {id}")]
    UserNotFoundById { id: String },
    /// No user has the username.
    #[error("user not found by username: {username}")]
    UserNotFoundByUsername { username: String },
    /// No post has the identifier.
    #[error("post not found by ID: {id}")]
    PostNotFound { id: String },
    /// The post holds no comment with the identifier.
    #[error("comment not found by ID: {comment_id} in post with ID: {post_id}")]
    CommentNotFound { post_id: String, comment_id: String },
    /// The actor is not the author of the post or comment.
    #[error("user {username} does not own this resource")]
    NotOwner { username: String },
    /// The body is not a JSON object of strings.
    #[error("request wasn't parsed: {message}")]
    RequestNotParsed { message: String },
    /// No usable session.
    #[error("user unauthorized: {message}")]
    Unauthorized { message: String },
    /// A repository failed.
    #[error("storage failure: {message}")]
    Storage { message: String },
    /// The randomness source failed.
    #[error("identifier generation failed: {message}")]
    IdGeneration { message: String },
}

impl BoardError {
    /// Whether this failure indicates a fault rather than a client mistake.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::IdGeneration { .. })
    }
}

impl From<PostRepositoryError> for BoardError {
    fn from(value: PostRepositoryError) -> Self {
        match value {
            PostRepositoryError::PostNotFound { id } => Self::PostNotFound { id },
            PostRepositoryError::CommentNotFound {
                post_id,
                comment_id,
            } => Self::CommentNotFound {
                post_id,
                comment_id,
            },
            other @ (PostRepositoryError::Connection { .. }
            | PostRepositoryError::Query { .. }) => Self::Storage {
                message: other.to_string(),
            },
        }
    }
}

impl From<UserRepositoryError> for BoardError {
    fn from(value: UserRepositoryError) -> Self {
        match value {
            UserRepositoryError::AlreadyExists { username } => Self::UserAlreadyExists { username },
            UserRepositoryError::WrongCredential { username } => Self::WrongCredential { username },
            UserRepositoryError::NotFoundById { id } => Self::UserNotFoundById { id },
            UserRepositoryError::NotFoundByUsername { username } => {
                Self::UserNotFoundByUsername { username }
            }
            other @ (UserRepositoryError::Connection { .. }
            | UserRepositoryError::Query { .. }) => Self::Storage {
                message: other.to_string(),
            },
        }
    }
}

impl From<HexIdError> for BoardError {
    fn from(value: HexIdError) -> Self {
        Self::IdGeneration {
            message: value.to_string(),
        }
    }
}

/// Build the unprocessable-entity envelope for a batch of failing rules.
///
/// # Examples
/// ```
/// use board::domain::{ErrorCode, validation_failure};
///
/// let error = validation_failure(Vec::new());
/// assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
/// ```
pub fn validation_failure(errors: Vec<ValidationError>) -> Error {
    Error::unprocessable_entity("validation failed").with_details(json!({ "errors": errors }))
}

impl From<BoardError> for Error {
    fn from(value: BoardError) -> Self {
        if value.is_internal() {
            error!(error = %value, "request failed");
        } else {
            warn!(error = %value, "request rejected");
        }
        match value {
            BoardError::UserAlreadyExists { username } => validation_failure(vec![ValidationError {
                location: Location::Body,
                param: "username".to_owned(),
                value: username,
                message: "already exists".to_owned(),
            }]),
            BoardError::WrongCredential { .. } => Error::unauthorized("wrong credential"),
            BoardError::Unauthorized { .. } => Error::unauthorized("user unauthorized"),
            BoardError::UserNotFoundById { .. } | BoardError::UserNotFoundByUsername { .. } => {
                Error::not_found("user not found")
            }
            BoardError::PostNotFound { .. } => Error::not_found("post not found"),
            BoardError::CommentNotFound { .. } => Error::not_found("comment not found"),
            BoardError::NotOwner { .. } => Error::forbidden("user does not own this resource"),
            BoardError::RequestNotParsed { .. } => Error::invalid_request("bad request"),
            BoardError::Storage { .. } | BoardError::IdGeneration { .. } => {
                Error::internal("internal error")
            }
        }
    }
}
