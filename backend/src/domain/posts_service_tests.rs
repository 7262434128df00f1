//! Tests for the posts service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use futures::future::join_all;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPostRepository, PostRepositoryError};
use crate::domain::{PostContent, Vote, VoteDirection, is_valid_hex_id};
use crate::outbound::persistence::MemoryPostRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn id(fill: char) -> HexId {
    HexId::new(fill.to_string().repeat(24)).expect("valid id")
}

#[fixture]
fn author() -> Author {
    Author::new(id('a'), "alice")
}

#[fixture]
fn voter() -> Author {
    Author::new(id('b'), "bob")
}

fn make_service(repo: MockPostRepository) -> PostsService<MockPostRepository> {
    PostsService::new(
        Arc::new(repo),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

fn text_input() -> NewPost {
    NewPost {
        category: Category::Funny,
        title: "t".to_owned(),
        content: PostContent::Text {
            text: "b".to_owned(),
        },
    }
}

fn stored_post(author: &Author) -> Post {
    Post::new(id('c'), text_input(), author.clone(), fixture_timestamp())
}

#[rstest]
#[tokio::test]
async fn create_post_starts_with_empty_tally(author: Author) {
    let mut repo = MockPostRepository::new();
    repo.expect_add_post().times(1).return_once(|_| Ok(()));

    let post = make_service(repo)
        .create_post(text_input(), &author)
        .await
        .expect("post created");

    assert!(is_valid_hex_id(post.id.as_str()));
    assert_eq!(post.score, 0);
    assert_eq!(post.views, 0);
    assert!(post.votes.is_empty());
    assert!(post.comments.is_empty());
    assert_eq!(post.upvote_percentage, 0);
    assert_eq!(post.author, author);
    assert_eq!(post.created, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn create_post_propagates_storage_failure(author: Author) {
    let mut repo = MockPostRepository::new();
    repo.expect_add_post()
        .times(1)
        .return_once(|_| Err(PostRepositoryError::connection("refused")));

    let error = make_service(repo)
        .create_post(text_input(), &author)
        .await
        .expect_err("storage failure");

    assert!(error.is_internal());
}

#[rstest]
#[tokio::test]
async fn post_by_id_counts_a_view(author: Author) {
    let mut viewed = stored_post(&author);
    viewed.views = 1;
    let mut repo = MockPostRepository::new();
    repo.expect_post_by_id_counting_view()
        .with(eq(id('c')))
        .times(1)
        .return_once(move |_| Ok(viewed));

    let post = make_service(repo)
        .post_by_id(&id('c'))
        .await
        .expect("post found");
    assert_eq!(post.views, 1);
}

#[rstest]
#[tokio::test]
async fn missing_post_surfaces_as_not_found() {
    let mut repo = MockPostRepository::new();
    repo.expect_post_by_id_counting_view()
        .times(1)
        .return_once(|id| Err(PostRepositoryError::post_not_found(id.as_str())));

    let error = make_service(repo)
        .post_by_id(&id('c'))
        .await
        .expect_err("not found");
    assert_eq!(
        error,
        BoardError::PostNotFound {
            id: id('c').to_string()
        }
    );
}

#[rstest]
#[tokio::test]
async fn delete_post_by_non_author_is_rejected(author: Author, voter: Author) {
    let post = stored_post(&author);
    let mut repo = MockPostRepository::new();
    repo.expect_post_by_id().times(1).return_once(move |_| Ok(post));
    repo.expect_delete_post().never();

    let error = make_service(repo)
        .delete_post(&id('c'), &voter)
        .await
        .expect_err("not owner");
    assert_eq!(
        error,
        BoardError::NotOwner {
            username: "bob".to_owned()
        }
    );
}

#[rstest]
#[tokio::test]
async fn delete_post_by_author_removes_it(author: Author) {
    let post = stored_post(&author);
    let mut repo = MockPostRepository::new();
    repo.expect_post_by_id().times(1).return_once(move |_| Ok(post));
    repo.expect_delete_post()
        .with(eq(id('c')))
        .times(1)
        .return_once(|_| Ok(()));

    make_service(repo)
        .delete_post(&id('c'), &author)
        .await
        .expect("deleted");
}

#[rstest]
#[tokio::test]
async fn add_comment_stamps_author_and_time(author: Author, voter: Author) {
    let post = stored_post(&author);
    let mut repo = MockPostRepository::new();
    repo.expect_add_comment()
        .times(1)
        .return_once(move |_, comment| {
            let mut updated = post;
            updated.comments.push(comment.clone());
            Ok(updated)
        });

    let post = make_service(repo)
        .add_comment(&id('c'), "nice".to_owned(), &voter)
        .await
        .expect("comment added");

    let comment = post.comments.last().expect("comment present");
    assert_eq!(comment.body, "nice");
    assert_eq!(comment.author, voter);
    assert_eq!(comment.created, fixture_timestamp());
    assert!(is_valid_hex_id(comment.id.as_str()));
}

#[rstest]
#[tokio::test]
async fn delete_comment_by_non_author_is_rejected(author: Author, voter: Author) {
    let comment = Comment::new(id('d'), author, "mine", fixture_timestamp());
    let mut repo = MockPostRepository::new();
    repo.expect_comment_by_id()
        .with(eq(id('c')), eq(id('d')))
        .times(1)
        .return_once(move |_, _| Ok(comment));
    repo.expect_delete_comment().never();

    let error = make_service(repo)
        .delete_comment(&id('c'), &id('d'), &voter)
        .await
        .expect_err("not owner");
    assert!(matches!(error, BoardError::NotOwner { .. }));
}

#[rstest]
#[tokio::test]
async fn delete_missing_comment_surfaces_as_not_found(author: Author) {
    let mut repo = MockPostRepository::new();
    repo.expect_comment_by_id().times(1).return_once(|post, comment| {
        Err(PostRepositoryError::comment_not_found(
            post.as_str(),
            comment.as_str(),
        ))
    });

    let error = make_service(repo)
        .delete_comment(&id('c'), &id('d'), &author)
        .await
        .expect_err("not found");
    assert!(matches!(error, BoardError::CommentNotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn upvote_persists_new_tally(author: Author, voter: Author) {
    let post = stored_post(&author);
    let expected = VoteTally {
        score: 1,
        upvote_percentage: 100,
        votes: vec![Vote {
            user: voter.id.clone(),
            vote: VoteDirection::Up,
        }],
    };
    let mut repo = MockPostRepository::new();
    repo.expect_post_by_id().times(1).return_once(move |_| Ok(post));
    repo.expect_post_by_id_counting_view().never();
    repo.expect_update_votes()
        .with(eq(id('c')), eq(expected))
        .times(1)
        .return_once(|_, _| Ok(()));

    let post = make_service(repo)
        .upvote(&id('c'), &voter)
        .await
        .expect("upvoted");
    assert_eq!(post.score, 1);
    assert_eq!(post.upvote_percentage, 100);
}

#[rstest]
#[tokio::test]
async fn downvote_flips_existing_upvote(author: Author, voter: Author) {
    let mut post = stored_post(&author);
    post.upvote(&voter.id);
    let mut repo = MockPostRepository::new();
    repo.expect_post_by_id().times(1).return_once(move |_| Ok(post));
    repo.expect_update_votes().times(1).return_once(|_, _| Ok(()));

    let post = make_service(repo)
        .downvote(&id('c'), &voter)
        .await
        .expect("downvoted");
    assert_eq!(post.score, -1);
    assert_eq!(post.upvote_percentage, 0);
    assert_eq!(post.vote_of(&voter.id), Some(VoteDirection::Down));
}

#[rstest]
#[tokio::test]
async fn unvote_on_missing_post_writes_nothing(voter: Author) {
    let mut repo = MockPostRepository::new();
    repo.expect_post_by_id()
        .times(1)
        .return_once(|id| Err(PostRepositoryError::post_not_found(id.as_str())));
    repo.expect_update_votes().never();

    let error = make_service(repo)
        .unvote(&id('c'), &voter)
        .await
        .expect_err("not found");
    assert!(matches!(error, BoardError::PostNotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn listings_delegate_to_repository(author: Author) {
    let post = stored_post(&author);
    let by_author = post.clone();
    let mut repo = MockPostRepository::new();
    repo.expect_posts_by_category()
        .with(eq(Category::Funny))
        .times(1)
        .return_once(move |_| Ok(vec![post]));
    repo.expect_posts_by_author()
        .with(eq("alice"))
        .times(1)
        .return_once(move |_| Ok(vec![by_author]));
    repo.expect_all_posts().times(1).return_once(|| Ok(Vec::new()));

    let service = make_service(repo);
    assert_eq!(
        service
            .posts_by_category(Category::Funny)
            .await
            .expect("listing")
            .len(),
        1
    );
    assert_eq!(
        service
            .posts_by_author("alice")
            .await
            .expect("listing")
            .len(),
        1
    );
    assert!(service.all_posts().await.expect("listing").is_empty());
}

/// Memory repository that yields after every plain read, so concurrent vote
/// transitions interleave between their read and their tally write.
struct YieldingPostRepository(MemoryPostRepository);

#[async_trait]
impl PostRepository for YieldingPostRepository {
    async fn all_posts(&self) -> Result<Vec<Post>, PostRepositoryError> {
        self.0.all_posts().await
    }

    async fn posts_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        self.0.posts_by_category(category).await
    }

    async fn posts_by_author(&self, username: &str) -> Result<Vec<Post>, PostRepositoryError> {
        self.0.posts_by_author(username).await
    }

    async fn add_post(&self, post: &Post) -> Result<(), PostRepositoryError> {
        self.0.add_post(post).await
    }

    async fn post_by_id(&self, id: &HexId) -> Result<Post, PostRepositoryError> {
        let post = self.0.post_by_id(id).await;
        tokio::task::yield_now().await;
        post
    }

    async fn post_by_id_counting_view(&self, id: &HexId) -> Result<Post, PostRepositoryError> {
        self.0.post_by_id_counting_view(id).await
    }

    async fn delete_post(&self, id: &HexId) -> Result<(), PostRepositoryError> {
        self.0.delete_post(id).await
    }

    async fn add_comment(
        &self,
        post_id: &HexId,
        comment: &Comment,
    ) -> Result<Post, PostRepositoryError> {
        self.0.add_comment(post_id, comment).await
    }

    async fn comment_by_id(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
    ) -> Result<Comment, PostRepositoryError> {
        self.0.comment_by_id(post_id, comment_id).await
    }

    async fn delete_comment(
        &self,
        post_id: &HexId,
        comment_id: &HexId,
    ) -> Result<Post, PostRepositoryError> {
        self.0.delete_comment(post_id, comment_id).await
    }

    async fn update_votes(&self, id: &HexId, tally: &VoteTally) -> Result<(), PostRepositoryError> {
        self.0.update_votes(id, tally).await
    }
}

#[rstest]
#[case::all_up(8, 0)]
#[case::mixed(5, 3)]
#[tokio::test]
async fn concurrent_votes_are_not_lost(
    author: Author,
    #[case] ups: usize,
    #[case] downs: usize,
) {
    let repo = Arc::new(YieldingPostRepository(MemoryPostRepository::with_posts(
        vec![stored_post(&author)],
    )));
    let service = PostsService::new(
        repo.clone(),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    );
    let voters: Vec<Author> = "0123456789"
        .chars()
        .take(ups + downs)
        .map(|fill| Author::new(id(fill), format!("voter{fill}")))
        .collect();

    let post_id = id('c');
    let results = join_all(voters.iter().enumerate().map(|(n, voter)| {
        let service = &service;
        let post_id = &post_id;
        async move {
            if n < ups {
                service.upvote(post_id, voter).await
            } else {
                service.downvote(post_id, voter).await
            }
        }
    }))
    .await;
    assert!(results.iter().all(Result::is_ok));

    let stored = repo.post_by_id(&post_id).await.expect("post stored");
    let sum: i64 = stored.votes.iter().map(|vote| vote.vote.value()).sum();
    assert_eq!(stored.votes.len(), ups + downs);
    assert_eq!(stored.score, sum);
    let expected = i64::try_from(ups).expect("small count") - i64::try_from(downs).expect("small count");
    assert_eq!(stored.score, expected);
}
