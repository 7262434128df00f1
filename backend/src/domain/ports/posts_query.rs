//! Driving port for reading posts.

use async_trait::async_trait;

use crate::domain::{BoardError, Category, HexId, Post};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Every post.
    async fn all_posts(&self) -> Result<Vec<Post>, BoardError>;

    /// Posts in one category.
    async fn posts_by_category(&self, category: Category) -> Result<Vec<Post>, BoardError>;

    /// Posts written by `username`.
    async fn posts_by_author(&self, username: &str) -> Result<Vec<Post>, BoardError>;

    /// A single post; counts as a view.
    async fn post_by_id(&self, post_id: &HexId) -> Result<Post, BoardError>;
}
