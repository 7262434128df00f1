//! Driven port for post and comment storage.
//!
//! The [`PostRepository`] contract mirrors a document store: each post is one
//! document holding its votes and comments. Operations that return the
//! updated post (`post_by_id_counting_view`, `add_comment`, `delete_comment`)
//! must read and write atomically. `update_votes` is a blind overwrite; the
//! caller serialises access to it.

use async_trait::async_trait;

use crate::domain::{Category, Comment, HexId, Post, Vote};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// No post has the requested identifier.
        PostNotFound { id: String } => "post not found: {id}",
        /// The post exists but holds no such comment.
        CommentNotFound { post_id: String, comment_id: String } =>
            "comment {comment_id} not found in post {post_id}",
    }
}

/// Score, percentage and vote list written back after a vote transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    /// Sum of vote contributions.
    pub score: i64,
    /// Truncated share of up-votes.
    pub upvote_percentage: u8,
    /// Votes in the order they were first cast.
    pub votes: Vec<Vote>,
}

impl From<&Post> for VoteTally {
    fn from(post: &Post) -> Self {
        Self {
            score: post.score,
            upvote_percentage: post.upvote_percentage,
            votes: post.votes.clone(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post, in insertion order.
    async fn all_posts(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Posts filed under `category`.
    async fn posts_by_category(&self, category: Category)
    -> Result<Vec<Post>, PostRepositoryError>;

    /// Posts whose author has `username`.
    async fn posts_by_author(&self, username: &str) -> Result<Vec<Post>, PostRepositoryError>;

    /// Store a new post.
    async fn add_post(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Fetch a post without side effects.
    async fn post_by_id(&self, id: &HexId) -> Result<Post, PostRepositoryError>;

    /// Increment the view counter and return the updated post.
    async fn post_by_id_counting_view(&self, id: &HexId) -> Result<Post, PostRepositoryError>;

    /// Remove a post.
    async fn delete_post(&self, id: &HexId) -> Result<(), PostRepositoryError>;

    /// Append `comment` and return the updated post.
    async fn add_comment(
        &self,
        post_id: &HexId,
        comment: &Comment,
    ) -> Result<Post, PostRepositoryError>;

    /// Fetch one comment of a post.
    async fn comment_by_id(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
    ) -> Result<Comment, PostRepositoryError>;

    /// Remove one comment and return the updated post.
    async fn delete_comment(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
    ) -> Result<Post, PostRepositoryError>;

    /// Overwrite score, percentage and votes of a post.
    async fn update_votes(&self, id: &HexId, tally: &VoteTally) -> Result<(), PostRepositoryError>;
}
