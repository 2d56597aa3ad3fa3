//! The user-facing layer: runs one service call per operation and reports
//! the outcome as text. Errors end the operation they occur in and nothing
//! more.

use std::fmt::Display;
use std::io::Write;

use crate::db::Database;
use crate::error::Result;
use crate::logging::OperationId;
use crate::model::{
    candidate::{Candidate, NewCandidate},
    election::{Election, NewElection},
    ranking,
    student::{NewStudent, Student},
    Entity, Id,
};
use crate::service::{CandidateService, ElectionService, StudentService};

pub struct ElectionController<W: Write> {
    elections: ElectionService,
    candidates: CandidateService,
    students: StudentService,
    out: W,
}

/// Run a single operation, logging its entry and outcome under a fresh ID.
fn traced<T>(operation: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let id = OperationId::next();
    info!("->op{id} {operation}");
    let result = f();
    match &result {
        Ok(_) => info!("<-op{id} ok"),
        Err(err) if err.is_storage_failure() => error!("<-op{id} failed: {err}"),
        Err(err) => warn!("<-op{id} failed: {err}"),
    }
    result
}

impl<W: Write> ElectionController<W> {
    pub fn new(db: &Database, out: W) -> Self {
        Self {
            elections: ElectionService::from_db(db),
            candidates: CandidateService::from_db(db),
            students: StudentService::from_db(db),
            out,
        }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Write one line of output. A broken sink is logged, never raised.
    pub fn say(&mut self, line: impl Display) {
        if let Err(err) = writeln!(self.out, "{line}") {
            error!("Failed to write output: {err}");
        }
    }

    /// Report a result: `success` renders the value, `failure` prefixes the error.
    fn report<T>(
        &mut self,
        result: Result<T>,
        success: impl FnOnce(&mut Self, &T),
        failure: &str,
    ) -> Option<T> {
        match result {
            Ok(value) => {
                success(self, &value);
                Some(value)
            }
            Err(err) => {
                self.say(format_args!("✗ Error {failure}: {err}"));
                None
            }
        }
    }

    pub fn create_election(&mut self, election: NewElection) -> Option<Election> {
        let result = traced("create_election", || {
            self.elections.create_election(election)
        });
        self.report(
            result,
            |c, election| c.say(format_args!("✓ Election created successfully: {}", election.name)),
            "creating election",
        )
    }

    pub fn all_elections(&mut self) -> Option<Vec<Election>> {
        let result = traced("all_elections", || self.elections.all_elections());
        self.report(
            result,
            |c, elections| {
                c.say("\n=== ALL ELECTIONS ===");
                for election in elections {
                    c.say(election);
                }
            },
            "fetching elections",
        )
    }

    pub fn create_candidate(&mut self, candidate: NewCandidate) -> Option<Candidate> {
        let result = traced("create_candidate", || {
            self.candidates.create_candidate(candidate)
        });
        self.report(
            result,
            |c, candidate| {
                c.say(format_args!("✓ Candidate created successfully: {}", candidate.name))
            },
            "creating candidate",
        )
    }

    pub fn all_candidates_sorted(&mut self) -> Option<Vec<Candidate>> {
        let result = traced("all_candidates_sorted", || {
            self.candidates.candidates_sorted_by_votes()
        });
        self.report(
            result,
            |c, candidates| {
                c.say("\n=== CANDIDATES (Sorted by Votes) ===");
                for candidate in candidates {
                    c.say(format_args!("{} - Votes: {}", candidate.name, candidate.vote_count));
                }
            },
            "fetching candidates",
        )
    }

    /// The standings of the candidates in one election.
    pub fn election_results(&mut self, election_id: Id) -> Option<Vec<Candidate>> {
        let result = traced("election_results", || {
            let election = self.elections.get_election(election_id)?;
            let candidates = self.candidates.candidates_by_election(election.id)?;
            Ok((election, candidates))
        });
        self.report(
            result,
            |c, (election, candidates)| {
                c.say(format_args!("\n=== RESULTS: {} ===", election.name));
                for (place, candidate) in candidates.iter().enumerate() {
                    c.say(format_args!(
                        "{}. {} - Votes: {}",
                        place + 1,
                        candidate.name,
                        candidate.vote_count
                    ));
                }
            },
            "fetching results",
        )
        .map(|(_, candidates)| candidates)
    }

    pub fn top_candidates(&mut self, n: usize) -> Option<Vec<Candidate>> {
        let result = traced("top_candidates", || self.candidates.top_candidates(n));
        self.report(
            result,
            |c, candidates| {
                c.say(format_args!("Top {n} candidates:"));
                for candidate in candidates {
                    c.say(format_args!("  {}: {} votes", candidate.name, candidate.vote_count));
                }
            },
            "fetching candidates",
        )
    }

    pub fn eligible_candidates(&mut self) -> Option<Vec<Candidate>> {
        let result = traced("eligible_candidates", || {
            Ok(ranking::filter_eligible(self.candidates.all_candidates()?))
        });
        self.report(
            result,
            |c, candidates| {
                c.say("Eligible candidates (year 2-4):");
                for candidate in candidates {
                    c.say(format_args!("  {} (Year {})", candidate.name, candidate.year_of_study));
                }
            },
            "fetching candidates",
        )
    }

    pub fn create_student(&mut self, student: NewStudent) -> Option<Student> {
        let result = traced("create_student", || self.students.create_student(student));
        self.report(
            result,
            |c, student| c.say(format_args!("✓ Student created successfully: {}", student.name)),
            "creating student",
        )
    }

    pub fn cast_vote(&mut self, student_id: Id, candidate_id: Id) -> Option<()> {
        let result = traced("cast_vote", || {
            self.students.cast_vote(student_id, candidate_id)
        });
        self.report(
            result,
            |c, _| c.say("✓ Vote cast successfully"),
            "casting vote",
        )
    }

    /// Print the summary block of any candidate or student.
    pub fn display_entity_info(&mut self, entity: &dyn Entity) {
        self.say(entity.info());
    }

    pub fn eligible_voters(&mut self) -> Option<Vec<Student>> {
        let result = traced("eligible_voters", || self.students.eligible_voters());
        self.report(
            result,
            |c, students| {
                c.say("\n=== ELIGIBLE VOTERS ===");
                c.say(format_args!("Total: {}", students.len()));
                for student in students {
                    c.say(format_args!("  - {}", student.name));
                }
            },
            "fetching voters",
        )
    }
}
