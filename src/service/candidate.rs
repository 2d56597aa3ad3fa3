use crate::db::Database;
use crate::error::Result;
use crate::model::{
    candidate::{Candidate, NewCandidate},
    ranking, Id,
};
use crate::repository::{CandidateRepository, Repository};
use crate::service::ensure_valid;

pub struct CandidateService {
    candidates: CandidateRepository,
}

impl CandidateService {
    pub fn from_db(db: &Database) -> Self {
        Self {
            candidates: CandidateRepository::from_db(db),
        }
    }

    pub fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate> {
        ensure_valid(&candidate, "candidate")?;
        let candidate = self.candidates.create(candidate)?;
        info!("Registered candidate #{}: {}", candidate.id, candidate.name);
        Ok(candidate)
    }

    pub fn get_candidate(&self, id: Id) -> Result<Candidate> {
        self.candidates.find_by_id(id)
    }

    /// Every candidate, by name.
    pub fn all_candidates(&self) -> Result<Vec<Candidate>> {
        self.candidates.find_all()
    }

    pub fn update_candidate(&self, candidate: &Candidate) -> Result<()> {
        ensure_valid(&candidate.candidate, "candidate")?;
        self.candidates.update(candidate)?;
        info!("Updated candidate #{}", candidate.id);
        Ok(())
    }

    pub fn delete_candidate(&self, id: Id) -> Result<()> {
        self.candidates.delete(id)?;
        info!("Deleted candidate #{id}");
        Ok(())
    }

    /// The candidates standing in one election, most votes first.
    pub fn candidates_by_election(&self, election_id: Id) -> Result<Vec<Candidate>> {
        self.candidates.find_by_election_id(election_id)
    }

    pub fn candidates_by_major(&self, major: &str) -> Result<Vec<Candidate>> {
        self.candidates.find_by_major(major)
    }

    /// Every candidate, most votes first; ties stay in name order.
    pub fn candidates_sorted_by_votes(&self) -> Result<Vec<Candidate>> {
        let mut candidates = self.candidates.find_all()?;
        ranking::sort_candidates_by_votes(&mut candidates);
        Ok(candidates)
    }

    pub fn top_candidates(&self, n: usize) -> Result<Vec<Candidate>> {
        Ok(ranking::top_candidates(self.candidates.find_all()?, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{
        candidate::CandidateCore,
        election::{Election, ElectionCore},
    };
    use crate::service::ElectionService;

    fn election(elections: &ElectionService) -> Election {
        elections.create_election(ElectionCore::example()).unwrap()
    }

    #[backend_test]
    fn create_then_get(elections: ElectionService, candidates: CandidateService) {
        let election = election(&elections);
        let created = candidates
            .create_candidate(CandidateCore::example1(&election))
            .unwrap();
        assert_eq!(created.vote_count, 0);
        assert_eq!(candidates.get_candidate(created.id).unwrap(), created);
    }

    #[backend_test]
    fn first_year_cannot_stand(elections: ElectionService, candidates: CandidateService) {
        let election = election(&elections);
        let fresher = CandidateCore::new("Test Candidate", "CS", 1, "Test", election);
        match candidates.create_candidate(fresher) {
            Err(Error::InvalidInput(msg)) => assert_eq!(msg, "Candidates must be in year 2-4"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert!(candidates.all_candidates().unwrap().is_empty());
    }

    #[backend_test]
    fn update_validates(elections: ElectionService, candidates: CandidateService) {
        let election = election(&elections);
        let mut candidate = candidates
            .create_candidate(CandidateCore::example2(&election))
            .unwrap();
        candidate.campaign = "Longer library hours".to_string();
        candidates.update_candidate(&candidate).unwrap();
        assert_eq!(candidates.get_candidate(candidate.id).unwrap(), candidate);

        candidate.major = String::new();
        assert!(matches!(
            candidates.update_candidate(&candidate),
            Err(Error::InvalidInput(_))
        ));

        candidates.delete_candidate(candidate.id).unwrap();
        assert!(matches!(
            candidates.delete_candidate(candidate.id),
            Err(Error::NotFound(_))
        ));
    }

    #[backend_test]
    fn rankings(elections: ElectionService, candidates: CandidateService) {
        let election = election(&elections);
        let mut ainaz = candidates
            .create_candidate(CandidateCore::example1(&election))
            .unwrap();
        let mut aruzhan = candidates
            .create_candidate(CandidateCore::example2(&election))
            .unwrap();
        let alisher = candidates
            .create_candidate(CandidateCore::example3(&election))
            .unwrap();
        ainaz.vote_count = 2;
        aruzhan.vote_count = 1;
        candidates.update_candidate(&ainaz).unwrap();
        candidates.update_candidate(&aruzhan).unwrap();

        let sorted = candidates.candidates_sorted_by_votes().unwrap();
        assert_eq!(sorted, vec![ainaz.clone(), aruzhan.clone(), alisher.clone()]);
        assert_eq!(
            candidates.top_candidates(2).unwrap(),
            vec![ainaz.clone(), aruzhan]
        );
        assert_eq!(candidates.candidates_by_election(election.id).unwrap()[0], ainaz);
        assert_eq!(
            candidates.candidates_by_major("Cybersecurity").unwrap(),
            vec![alisher]
        );
    }
}
