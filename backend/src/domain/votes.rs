//! Vote transitions over a post's tally.
//!
//! These functions only touch `votes`, `score` and `upvote_percentage`; the
//! caller is responsible for persisting the result. Each voter holds at most
//! one vote per post:
//!
//! | existing vote | upvote        | downvote      | unvote          |
//! |---------------|---------------|---------------|-----------------|
//! | none          | append +1, +1 | append −1, −1 | no change       |
//! | +1            | no change     | flip, −2      | remove, −1      |
//! | −1            | flip, +2      | no change     | remove, +1      |

use super::{HexId, Post, Vote, VoteDirection};

impl Post {
    /// Record an up-vote from `voter` and refresh the percentage.
    pub fn upvote(&mut self, voter: &HexId) -> &mut Self {
        self.cast_vote(voter, VoteDirection::Up)
    }

    /// Record a down-vote from `voter` and refresh the percentage.
    pub fn downvote(&mut self, voter: &HexId) -> &mut Self {
        self.cast_vote(voter, VoteDirection::Down)
    }

    /// Withdraw `voter`'s vote, if any, and refresh the percentage.
    pub fn unvote(&mut self, voter: &HexId) -> &mut Self {
        if let Some(index) = self.votes.iter().position(|vote| &vote.user == voter) {
            let removed = self.votes.remove(index);
            self.score -= removed.vote.value();
        }
        self.recalculate_percentage()
    }

    /// Recompute `upvote_percentage` from `votes`.
    ///
    /// Zero with no votes, otherwise the truncated share of up-votes.
    pub fn recalculate_percentage(&mut self) -> &mut Self {
        self.upvote_percentage = upvote_percentage(&self.votes);
        self
    }

    /// Current direction of `voter`'s vote, if any.
    pub fn vote_of(&self, voter: &HexId) -> Option<VoteDirection> {
        self.votes
            .iter()
            .find(|vote| &vote.user == voter)
            .map(|vote| vote.vote)
    }

    fn cast_vote(&mut self, voter: &HexId, direction: VoteDirection) -> &mut Self {
        match self.votes.iter().position(|vote| &vote.user == voter) {
            Some(index) => {
                let existing = &mut self.votes[index];
                if existing.vote != direction {
                    self.score += direction.value() - existing.vote.value();
                    existing.vote = direction;
                }
            }
            None => {
                self.votes.push(Vote {
                    user: voter.clone(),
                    vote: direction,
                });
                self.score += direction.value();
            }
        }
        self.recalculate_percentage()
    }
}

fn upvote_percentage(votes: &[Vote]) -> u8 {
    if votes.is_empty() {
        return 0;
    }
    let ups = votes
        .iter()
        .filter(|vote| vote.vote == VoteDirection::Up)
        .count();
    let percentage = ups * 100 / votes.len();
    u8::try_from(percentage).unwrap_or(100)
}
