//! Driving port for every change to posts, comments and votes.

use async_trait::async_trait;

use crate::domain::{Author, BoardError, HexId, NewPost, Post};

/// Mutations available to inbound adapters.
///
/// `actor` is the authenticated caller. Deletions require the actor to be
/// the author of the post or comment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post owned by `actor`.
    async fn create_post(&self, input: NewPost, actor: &Author) -> Result<Post, BoardError>;

    /// Delete a post owned by `actor`.
    async fn delete_post(&self, post_id: &HexId, actor: &Author) -> Result<(), BoardError>;

    /// Append a comment written by `actor`.
    async fn add_comment(
        &self,
        post_id: &HexId,
        body: String,
        actor: &Author,
    ) -> Result<Post, BoardError>;

    /// Delete a comment written by `actor`.
    async fn delete_comment(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
        actor: &Author,
    ) -> Result<Post, BoardError>;

    /// Up-vote a post.
    async fn upvote(&self, post_id: &HexId, actor: &Author) -> Result<Post, BoardError>;

    /// Down-vote a post.
    async fn downvote(&self, post_id: &HexId, actor: &Author) -> Result<Post, BoardError>;

    /// Withdraw the actor's vote.
    async fn unvote(&self, post_id: &HexId, actor: &Author) -> Result<Post, BoardError>;
}
