use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    common::validation::{is_valid_string, is_valid_year, Validatable, VALIDATION_PASSED},
    election::Election,
    Id,
};

pub const MIN_CANDIDATE_YEAR: i32 = 2;
pub const MAX_CANDIDATE_YEAR: i32 = 4;

/// Core candidate data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCore {
    /// Candidate full name.
    pub name: String,
    /// Subject the candidate studies.
    pub major: String,
    /// Current year of study; only years 2-4 may stand.
    pub year_of_study: i32,
    /// Campaign statement.
    pub campaign: String,
    /// The election being stood in. The candidate refers to it but does
    /// not own it; the election has no reference back.
    pub election: Option<Election>,
    /// Votes received so far.
    pub vote_count: u32,
}

impl CandidateCore {
    /// Create a new candidate with no votes.
    pub fn new(
        name: impl Into<String>,
        major: impl Into<String>,
        year_of_study: i32,
        campaign: impl Into<String>,
        election: impl Into<Option<Election>>,
    ) -> Self {
        Self {
            name: name.into(),
            major: major.into(),
            year_of_study,
            campaign: campaign.into(),
            election: election.into(),
            vote_count: 0,
        }
    }

    pub fn is_eligible(&self) -> bool {
        is_valid_year(self.year_of_study, MIN_CANDIDATE_YEAR, MAX_CANDIDATE_YEAR)
    }

    pub fn election_id(&self) -> Option<Id> {
        self.election.as_ref().map(|election| election.id)
    }

    /// Count one more vote. Fails, leaving the count untouched, if it is already at its maximum.
    pub fn increment_vote_count(&mut self) -> Result<()> {
        self.vote_count = self
            .vote_count
            .checked_add(1)
            .ok_or_else(|| Error::invalid(format!("{} cannot receive more votes", self.name)))?;
        Ok(())
    }

    pub fn description(&self) -> String {
        format!(
            "Candidate from {}, Year {}\nCampaign: {}\nElection: {}\nVotes: {}",
            self.major,
            self.year_of_study,
            self.campaign,
            self.election
                .as_ref()
                .map(|election| election.name.as_str())
                .unwrap_or("No election"),
            self.vote_count
        )
    }

    /// The first rule this candidate breaks, checked in priority order.
    fn first_violation(&self) -> Option<&'static str> {
        if !is_valid_string(&self.name) {
            Some("Invalid name")
        } else if !is_valid_string(&self.major) {
            Some("Invalid major")
        } else if !self.is_eligible() {
            Some("Candidates must be in year 2-4")
        } else if self.election.is_none() {
            Some("Candidate must be associated with an election")
        } else {
            None
        }
    }
}

impl Validatable for CandidateCore {
    fn validate(&self) -> bool {
        self.first_violation().is_none()
    }

    fn validation_message(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.first_violation().unwrap_or(VALIDATION_PASSED))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_matches_year_range() {
        let election = Election::example();
        for year in -1..7 {
            let mut candidate = CandidateCore::example1(&election);
            candidate.year_of_study = year;
            assert_eq!(candidate.is_eligible(), (2..=4).contains(&year));
        }
    }

    #[test]
    fn valid_candidate() {
        let candidate = CandidateCore::example1(&Election::example());
        assert!(candidate.validate());
        assert_eq!(candidate.validation_message(), VALIDATION_PASSED);
        assert_eq!(candidate.vote_count, 0);
        assert_eq!(candidate.election_id(), Some(Id::new(1)));
    }

    #[test]
    fn violations_reported_in_priority_order() {
        let mut candidate = CandidateCore::new(" ", "", 1, "Anything", None);
        assert!(!candidate.validate());
        assert_eq!(candidate.validation_message(), "Invalid name");

        candidate.name = "Someone".to_string();
        assert_eq!(candidate.validation_message(), "Invalid major");

        candidate.major = "History".to_string();
        assert_eq!(
            candidate.validation_message(),
            "Candidates must be in year 2-4"
        );

        candidate.year_of_study = 4;
        assert_eq!(
            candidate.validation_message(),
            "Candidate must be associated with an election"
        );

        candidate.election = Some(Election::example());
        assert!(candidate.validate());
    }

    #[test]
    fn votes_and_description() {
        let mut candidate = CandidateCore::example2(&Election::example());
        candidate.increment_vote_count().unwrap();
        candidate.increment_vote_count().unwrap();
        assert_eq!(candidate.vote_count, 2);
        let description = candidate.description();
        assert!(description.contains("Election: University President Election 2026"));
        assert!(description.ends_with("Votes: 2"));

        candidate.election = None;
        assert!(candidate.description().contains("Election: No election"));
    }

    #[test]
    fn vote_count_at_maximum() {
        let mut candidate = CandidateCore::example3(&Election::example());
        candidate.vote_count = u32::MAX;
        match candidate.increment_vote_count() {
            Err(Error::InvalidInput(msg)) => {
                assert_eq!(msg, "Daurenuly Alisher cannot receive more votes")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert_eq!(candidate.vote_count, u32::MAX);
    }
}
