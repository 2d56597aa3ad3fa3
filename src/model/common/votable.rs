use crate::error::Result;

pub const ELIGIBLE_TO_VOTE: &str = "Eligible to vote";
pub const NOT_ELIGIBLE_TO_VOTE: &str = "Already voted or ineligible";

/// An entity that can cast a single vote.
pub trait Votable {
    /// Record that this entity has voted.
    ///
    /// Fails with [`crate::error::Error::InvalidInput`] and leaves the entity
    /// untouched when [`Votable::can_vote`] is false.
    fn vote(&mut self) -> Result<()>;

    fn can_vote(&self) -> bool;

    fn vote_status_description(&self) -> &'static str {
        if self.can_vote() {
            ELIGIBLE_TO_VOTE
        } else {
            NOT_ELIGIBLE_TO_VOTE
        }
    }
}

/// The rule every voter shares: one vote, and only while eligible.
pub fn meets_basic_voting_requirements(has_voted: bool, is_eligible: bool) -> bool {
    !has_voted && is_eligible
}
