//! Post, comment and vote services.
//!
//! [`PostsService`] is the only caller of the post repository's mutating
//! operations. Vote transitions read a post, change it in memory and
//! overwrite the stored tally, so every vote and every deletion runs under
//! one service-wide mutation lock. Creation and commenting append atomically
//! at the repository and skip the lock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::ports::{PostRepository, PostsCommand, PostsQuery, VoteTally};
use crate::domain::{Author, BoardError, Category, Comment, HexId, NewPost, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoteAction {
    Up,
    Down,
    Withdraw,
}

impl VoteAction {
    fn apply(self, post: &mut Post, voter: &HexId) {
        match self {
            Self::Up => post.upvote(voter),
            Self::Down => post.downvote(voter),
            Self::Withdraw => post.unvote(voter),
        };
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Up => "upvote",
            Self::Down => "downvote",
            Self::Withdraw => "unvote",
        }
    }
}

/// Service implementing [`PostsCommand`] and [`PostsQuery`].
///
/// Clones share the repository, clock and mutation lock.
#[derive(Clone)]
pub struct PostsService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    mutation_lock: Arc<Mutex<()>>,
}

impl<R> PostsService<R> {
    /// Create a service over `repo`, stamping new content with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }
}

impl<R> PostsService<R>
where
    R: PostRepository,
{
    async fn apply_vote(
        &self,
        post_id: &HexId,
        actor: &Author,
        action: VoteAction,
    ) -> Result<Post, BoardError> {
        let _guard = self.mutation_lock.lock().await;

        let mut post = self.repo.post_by_id(post_id).await?;
        action.apply(&mut post, &actor.id);
        self.repo
            .update_votes(post_id, &VoteTally::from(&post))
            .await?;

        info!(
            post_id = %post_id,
            voter = %actor.id,
            action = action.as_str(),
            score = post.score,
            "vote recorded"
        );
        Ok(post)
    }
}

#[async_trait]
impl<R> PostsCommand for PostsService<R>
where
    R: PostRepository,
{
    async fn create_post(&self, input: NewPost, actor: &Author) -> Result<Post, BoardError> {
        let post = Post::new(HexId::generate()?, input, actor.clone(), self.clock.utc());
        self.repo.add_post(&post).await?;

        info!(
            post_id = %post.id,
            author = %actor.username,
            category = %post.category,
            kind = post.kind().as_str(),
            "post created"
        );
        Ok(post)
    }

    async fn delete_post(&self, post_id: &HexId, actor: &Author) -> Result<(), BoardError> {
        let _guard = self.mutation_lock.lock().await;

        let post = self.repo.post_by_id(post_id).await?;
        if !post.is_owned_by(actor) {
            return Err(BoardError::NotOwner {
                username: actor.username.clone(),
            });
        }
        self.repo.delete_post(post_id).await?;

        info!(post_id = %post_id, author = %actor.username, "post deleted");
        Ok(())
    }

    async fn add_comment(
        &self,
        post_id: &HexId,
        body: String,
        actor: &Author,
    ) -> Result<Post, BoardError> {
        let comment = Comment::new(HexId::generate()?, actor.clone(), body, self.clock.utc());
        let post = self.repo.add_comment(post_id, &comment).await?;

        info!(
            post_id = %post_id,
            comment_id = %comment.id,
            author = %actor.username,
            "comment added"
        );
        Ok(post)
    }

    async fn delete_comment(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
        actor: &Author,
    ) -> Result<Post, BoardError> {
        let _guard = self.mutation_lock.lock().await;

        let comment = self.repo.comment_by_id(post_id, comment_id).await?;
        if !comment.is_owned_by(actor) {
            return Err(BoardError::NotOwner {
                username: actor.username.clone(),
            });
        }
        let post = self.repo.delete_comment(post_id, comment_id).await?;

        info!(
            post_id = %post_id,
            comment_id = %comment_id,
            author = %actor.username,
            "comment deleted"
        );
        Ok(post)
    }

    async fn upvote(&self, post_id: &HexId, actor: &Author) -> Result<Post, BoardError> {
        self.apply_vote(post_id, actor, VoteAction::Up).await
    }

    async fn downvote(&self, post_id: &HexId, actor: &Author) -> Result<Post, BoardError> {
        self.apply_vote(post_id, actor, VoteAction::Down).await
    }

    async fn unvote(&self, post_id: &HexId, actor: &Author) -> Result<Post, BoardError> {
        self.apply_vote(post_id, actor, VoteAction::Withdraw).await
    }
}

#[async_trait]
impl<R> PostsQuery for PostsService<R>
where
    R: PostRepository,
{
    async fn all_posts(&self) -> Result<Vec<Post>, BoardError> {
        Ok(self.repo.all_posts().await?)
    }

    async fn posts_by_category(&self, category: Category) -> Result<Vec<Post>, BoardError> {
        Ok(self.repo.posts_by_category(category).await?)
    }

    async fn posts_by_author(&self, username: &str) -> Result<Vec<Post>, BoardError> {
        Ok(self.repo.posts_by_author(username).await?)
    }

    async fn post_by_id(&self, post_id: &HexId) -> Result<Post, BoardError> {
        Ok(self.repo.post_by_id_counting_view(post_id).await?)
    }
}

#[cfg(test)]
#[path = "posts_service_tests.rs"]
mod tests;
