//! Comments attached to posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::{self, to_millis};
use super::{Author, HexId};

/// A comment on a post.
///
/// ## Invariants
/// - `author` is set at creation and never changes; only that author may
///   delete the comment.
/// - Comments are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: HexId,
    /// Creation time, millisecond precision.
    #[serde(with = "timestamp::created")]
    pub created: DateTime<Utc>,
    /// Who wrote the comment.
    pub author: Author,
    /// Comment text, never empty.
    pub body: String,
}

impl Comment {
    /// Build a new comment stamped with `created`.
    pub fn new(id: HexId, author: Author, body: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            created: to_millis(created),
            author,
            body: body.into(),
        }
    }

    /// Whether `actor` authored this comment.
    pub fn is_owned_by(&self, actor: &Author) -> bool {
        self.author.id == actor.id
    }
}
