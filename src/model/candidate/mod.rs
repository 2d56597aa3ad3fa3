pub use candidate_core::{CandidateCore, MAX_CANDIDATE_YEAR, MIN_CANDIDATE_YEAR};
pub use db::Candidate;

mod candidate_core;
mod db;

/// A new candidate ready for DB insertion is just a [`Candidate`] without an ID.
pub type NewCandidate = CandidateCore;
