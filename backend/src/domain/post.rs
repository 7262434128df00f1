//! Posts, their categories, and the votes cast on them.
//!
//! Posts serialise to the camelCase document shape stored by the content
//! repository and returned to clients:
//!
//! ```text
//! {"id":"…","score":0,"views":0,"type":"text","title":"…",
//!  "author":{"id":"…","username":"…"},"category":"funny","text":"…",
//!  "votes":[],"comments":[],"created":"2024-01-01T00:00:00.000Z",
//!  "upvotePercentage":0}
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::{self, to_millis};
use super::{Author, Comment, HexId};

/// Fixed set of boards a post may be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `music`
    Music,
    /// `funny`
    Funny,
    /// `videos`
    Videos,
    /// `programming`
    Programming,
    /// `news`
    News,
    /// `fashion`
    Fashion,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Music,
        Self::Funny,
        Self::Videos,
        Self::Programming,
        Self::News,
        Self::Fashion,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Funny => "funny",
            Self::Videos => "videos",
            Self::Programming => "programming",
            Self::News => "news",
            Self::Fashion => "fashion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Discriminator between text and link posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Carries body text.
    Text,
    /// Carries a URL.
    Link,
}

impl PostKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
        }
    }
}

/// Error returned when parsing an unknown post kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post type: {0}")]
pub struct UnknownPostKind(pub String);

impl FromStr for PostKind {
    type Err = UnknownPostKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "link" => Ok(Self::Link),
            other => Err(UnknownPostKind(other.to_owned())),
        }
    }
}

/// Post payload: exactly one of text or URL, selected by the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostContent {
    /// Body text.
    Text { text: String },
    /// Link target.
    Link { url: String },
}

impl PostContent {
    /// The kind implied by this payload.
    pub fn kind(&self) -> PostKind {
        match self {
            Self::Text { .. } => PostKind::Text,
            Self::Link { .. } => PostKind::Link,
        }
    }
}

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum VoteDirection {
    /// Counts +1.
    Up,
    /// Counts -1.
    Down,
}

impl VoteDirection {
    /// Contribution of this vote to a post's score.
    pub fn value(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl From<VoteDirection> for i8 {
    fn from(value: VoteDirection) -> Self {
        match value {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

/// Error returned for vote values other than `1` and `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("vote must be 1 or -1, got {0}")]
pub struct InvalidVoteValue(pub i8);

impl TryFrom<i8> for VoteDirection {
    type Error = InvalidVoteValue;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(InvalidVoteValue(other)),
        }
    }
}

/// One voter's contribution to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The voter.
    pub user: HexId,
    /// Up or down.
    pub vote: VoteDirection,
}

/// Validated input for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Board the post is filed under.
    pub category: Category,
    /// Non-empty title.
    pub title: String,
    /// Text or link payload.
    pub content: PostContent,
}

/// A top-level content item.
///
/// ## Invariants
/// - `score` and `upvote_percentage` always agree with `votes` under the
///   transitions of [`Post::upvote`], [`Post::downvote`] and [`Post::unvote`].
/// - `votes` holds at most one entry per voter.
/// - `author` and `content` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post identifier.
    pub id: HexId,
    /// Sum of vote contributions; may be negative.
    pub score: i64,
    /// Number of single-post reads.
    pub views: u64,
    /// Title text.
    pub title: String,
    /// Creator of the post.
    pub author: Author,
    /// Board the post is filed under.
    pub category: Category,
    /// Text or link payload, flattened as `type` plus `text` or `url`.
    #[serde(flatten)]
    pub content: PostContent,
    /// Votes in the order they were first cast.
    pub votes: Vec<Vote>,
    /// Comments in insertion order.
    pub comments: Vec<Comment>,
    /// Creation time, millisecond precision.
    #[serde(with = "timestamp::created")]
    pub created: DateTime<Utc>,
    /// Share of up-votes as a truncated integer percentage.
    pub upvote_percentage: u8,
}

impl Post {
    /// Build a fresh post with no votes, comments, or views.
    pub fn new(id: HexId, input: NewPost, author: Author, created: DateTime<Utc>) -> Self {
        let NewPost {
            category,
            title,
            content,
        } = input;
        Self {
            id,
            score: 0,
            views: 0,
            title,
            author,
            category,
            content,
            votes: Vec::new(),
            comments: Vec::new(),
            created: to_millis(created),
            upvote_percentage: 0,
        }
    }

    /// Text or link.
    pub fn kind(&self) -> PostKind {
        self.content.kind()
    }

    /// Whether `actor` created this post.
    pub fn is_owned_by(&self, actor: &Author) -> bool {
        self.author.id == actor.id
    }

    /// Find a comment by identifier.
    pub fn comment(&self, comment_id: &HexId) -> Option<&Comment> {
        self.comments.iter().find(|comment| &comment.id == comment_id)
    }
}
