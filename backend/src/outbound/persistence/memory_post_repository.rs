//! In-memory `PostRepository` adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{PostRepository, PostRepositoryError, VoteTally};
use crate::domain::{Category, Comment, HexId, Post};

/// Post store holding whole documents in insertion order.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `posts`.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

fn not_found(id: &HexId) -> PostRepositoryError {
    PostRepositoryError::post_not_found(id.as_str())
}

fn find_mut<'a>(posts: &'a mut [Post], id: &HexId) -> Result<&'a mut Post, PostRepositoryError> {
    posts
        .iter_mut()
        .find(|post| &post.id == id)
        .ok_or_else(|| not_found(id))
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn all_posts(&self) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(self.posts.read().await.clone())
    }

    async fn posts_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|post| post.category == category)
            .cloned()
            .collect())
    }

    async fn posts_by_author(&self, username: &str) -> Result<Vec<Post>, PostRepositoryError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|post| post.author.username == username)
            .cloned()
            .collect())
    }

    async fn add_post(&self, post: &Post) -> Result<(), PostRepositoryError> {
        self.posts.write().await.push(post.clone());
        debug!(post_id = %post.id, "post stored");
        Ok(())
    }

    async fn post_by_id(&self, id: &HexId) -> Result<Post, PostRepositoryError> {
        let posts = self.posts.read().await;
        posts
            .iter()
            .find(|post| &post.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn post_by_id_counting_view(&self, id: &HexId) -> Result<Post, PostRepositoryError> {
        let mut posts = self.posts.write().await;
        let post = find_mut(&mut posts, id)?;
        post.views += 1;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &HexId) -> Result<(), PostRepositoryError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|post| &post.id == id)
            .ok_or_else(|| not_found(id))?;
        posts.remove(index);
        debug!(post_id = %id, "post removed");
        Ok(())
    }

    async fn add_comment(
        &self,
        post_id: &HexId,
        comment: &Comment,
    ) -> Result<Post, PostRepositoryError> {
        let mut posts = self.posts.write().await;
        let post = find_mut(&mut posts, post_id)?;
        post.comments.push(comment.clone());
        Ok(post.clone())
    }

    async fn comment_by_id(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
    ) -> Result<Comment, PostRepositoryError> {
        let posts = self.posts.read().await;
        let post = posts
            .iter()
            .find(|post| &post.id == post_id)
            .ok_or_else(|| not_found(post_id))?;
        post.comment(comment_id).cloned().ok_or_else(|| {
            PostRepositoryError::comment_not_found(post_id.as_str(), comment_id.as_str())
        })
    }

    async fn delete_comment(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
    ) -> Result<Post, PostRepositoryError> {
        let mut posts = self.posts.write().await;
        let post = find_mut(&mut posts, post_id)?;
        let index = post
            .comments
            .iter()
            .position(|comment| &comment.id == comment_id)
            .ok_or_else(|| {
                PostRepositoryError::comment_not_found(post_id.as_str(), comment_id.as_str())
            })?;
        post.comments.remove(index);
        Ok(post.clone())
    }

    async fn update_votes(&self, id: &HexId, tally: &VoteTally) -> Result<(), PostRepositoryError> {
        let mut posts = self.posts.write().await;
        let post = find_mut(&mut posts, id)?;
        post.score = tally.score;
        post.upvote_percentage = tally.upvote_percentage;
        post.votes.clone_from(&tally.votes);
        Ok(())
    }
}
