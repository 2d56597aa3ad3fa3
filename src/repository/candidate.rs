use rusqlite::{params, OptionalExtension, Row};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::model::{
    candidate::{Candidate, CandidateCore, NewCandidate},
    Id,
};
use crate::repository::{election::election_at, expect_one_row, row_exists, Repository};

/// Candidates are always read together with their election.
const SELECT: &str = "SELECT c.id, c.name, c.major, c.year_of_study, c.campaign, c.vote_count, \
                      e.id, e.name, e.start_date, e.end_date, e.academic_year \
                      FROM candidates c JOIN elections e ON c.election_id = e.id";

pub struct CandidateRepository {
    db: Database,
}

impl CandidateRepository {
    pub fn from_db(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// The candidates standing in an election, most votes first.
    pub fn find_by_election_id(&self, election_id: Id) -> Result<Vec<Candidate>> {
        debug!("Finding candidates for election #{election_id}");
        self.query(
            &format!("{SELECT} WHERE c.election_id = ?1 ORDER BY c.vote_count DESC, c.id"),
            [election_id],
        )
    }

    pub fn find_by_major(&self, major: &str) -> Result<Vec<Candidate>> {
        debug!("Finding candidates majoring in {major}");
        self.query(
            &format!("{SELECT} WHERE c.major = ?1 ORDER BY c.name, c.id"),
            [major],
        )
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Candidate>> {
        let mut statement = self.db.connection().prepare(sql)?;
        let candidates = statement
            .query_map(params, from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(candidates)
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Candidate> {
    Ok(Candidate::new(
        row.get(0)?,
        CandidateCore {
            name: row.get(1)?,
            major: row.get(2)?,
            year_of_study: row.get(3)?,
            campaign: row.get(4)?,
            vote_count: row.get(5)?,
            election: Some(election_at(row, 6)?),
        },
    ))
}

fn not_found(id: Id) -> Error {
    Error::not_found(format!("Candidate not found with id: {id}"))
}

fn require_election(candidate: &CandidateCore) -> Result<Id> {
    candidate
        .election_id()
        .ok_or_else(|| Error::invalid("Candidate must be associated with an election"))
}

impl Repository for CandidateRepository {
    type Entity = Candidate;
    type New = NewCandidate;

    fn create(&self, new: NewCandidate) -> Result<Candidate> {
        let election_id = require_election(&new)?;
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO candidates (name, major, year_of_study, campaign, election_id, vote_count) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.name,
                new.major,
                new.year_of_study,
                new.campaign,
                election_id,
                new.vote_count
            ],
        )?;
        let id = Id::new(conn.last_insert_rowid());
        debug!("Inserted candidate #{id} for election #{election_id}");
        Ok(Candidate::new(id, new))
    }

    fn find_by_id(&self, id: Id) -> Result<Candidate> {
        debug!("Finding candidate #{id}");
        self.db
            .connection()
            .query_row(&format!("{SELECT} WHERE c.id = ?1"), [id], from_row)
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    fn find_all(&self) -> Result<Vec<Candidate>> {
        debug!("Finding all candidates");
        self.query(&format!("{SELECT} ORDER BY c.name, c.id"), [])
    }

    fn update(&self, candidate: &Candidate) -> Result<()> {
        debug!("Updating candidate #{}", candidate.id);
        let election_id = require_election(candidate)?;
        let changed = self.db.connection().execute(
            "UPDATE candidates SET name = ?1, major = ?2, year_of_study = ?3, campaign = ?4, \
             election_id = ?5, vote_count = ?6 WHERE id = ?7",
            params![
                candidate.name,
                candidate.major,
                candidate.year_of_study,
                candidate.campaign,
                election_id,
                candidate.vote_count,
                candidate.id
            ],
        )?;
        expect_one_row(changed, || not_found(candidate.id))
    }

    fn delete(&self, id: Id) -> Result<()> {
        debug!("Deleting candidate #{id}");
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM candidates WHERE id = ?1", [id])?;
        expect_one_row(changed, || not_found(id))
    }

    fn exists(&self, id: Id) -> bool {
        row_exists(self.db.connection(), "candidates", id)
    }
}
