use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::{candidate::CandidateCore, Entity, Id};

/// A candidate from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Id,
    #[serde(flatten)]
    pub candidate: CandidateCore,
}

impl Candidate {
    pub fn new(id: Id, candidate: CandidateCore) -> Self {
        Self { id, candidate }
    }
}

impl Deref for Candidate {
    type Target = CandidateCore;

    fn deref(&self) -> &Self::Target {
        &self.candidate
    }
}

impl DerefMut for Candidate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.candidate
    }
}

impl Entity for Candidate {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.candidate.name
    }

    fn description(&self) -> String {
        self.candidate.description()
    }

    fn is_eligible(&self) -> bool {
        self.candidate.is_eligible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::election::Election;

    #[test]
    fn info_block() {
        let candidate = Candidate::new(Id::new(7), CandidateCore::example1(&Election::example()));
        let info = candidate.info();
        assert!(info.starts_with("ID: 7\nName: Zhubanazarova Ainaz\nCandidate from Computer Science, Year 3"));
        assert!(info.ends_with("Eligible: Yes"));
    }
}
