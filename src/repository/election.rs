use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::model::{
    election::{Election, ElectionCore, NewElection},
    Id,
};
use crate::repository::{expect_one_row, row_exists, Repository};

const SELECT: &str = "SELECT id, name, start_date, end_date, academic_year FROM elections";

pub struct ElectionRepository {
    db: Database,
}

impl ElectionRepository {
    pub fn from_db(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Elections whose voting window contains `on`, latest start first.
    pub fn find_active(&self, on: NaiveDate) -> Result<Vec<Election>> {
        debug!("Finding elections active on {on}");
        self.query(
            &format!("{SELECT} WHERE ?1 BETWEEN start_date AND end_date ORDER BY start_date DESC"),
            params![on],
        )
    }

    pub fn find_by_academic_year(&self, academic_year: &str) -> Result<Vec<Election>> {
        debug!("Finding elections for academic year {academic_year}");
        self.query(
            &format!("{SELECT} WHERE academic_year = ?1 ORDER BY start_date DESC"),
            params![academic_year],
        )
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Election>> {
        let mut statement = self.db.connection().prepare(sql)?;
        let elections = statement
            .query_map(params, from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(elections)
    }
}

/// Read an election from the first five columns of a row.
pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Election> {
    election_at(row, 0)
}

/// Read an election from five consecutive columns starting at `offset`.
pub(crate) fn election_at(row: &Row, offset: usize) -> rusqlite::Result<Election> {
    Ok(Election::new(
        row.get(offset)?,
        ElectionCore {
            name: row.get(offset + 1)?,
            start_date: row.get(offset + 2)?,
            end_date: row.get(offset + 3)?,
            academic_year: row.get(offset + 4)?,
        },
    ))
}

fn not_found(id: Id) -> Error {
    Error::not_found(format!("Election not found with id: {id}"))
}

impl Repository for ElectionRepository {
    type Entity = Election;
    type New = NewElection;

    fn create(&self, new: NewElection) -> Result<Election> {
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO elections (name, start_date, end_date, academic_year) \
             VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.start_date, new.end_date, new.academic_year],
        )?;
        let id = Id::new(conn.last_insert_rowid());
        debug!("Inserted election #{id}");
        Ok(Election::new(id, new))
    }

    fn find_by_id(&self, id: Id) -> Result<Election> {
        debug!("Finding election #{id}");
        self.db
            .connection()
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    fn find_all(&self) -> Result<Vec<Election>> {
        debug!("Finding all elections");
        self.query(&format!("{SELECT} ORDER BY start_date DESC"), [])
    }

    fn update(&self, election: &Election) -> Result<()> {
        debug!("Updating election #{}", election.id);
        let changed = self.db.connection().execute(
            "UPDATE elections SET name = ?1, start_date = ?2, end_date = ?3, academic_year = ?4 \
             WHERE id = ?5",
            params![
                election.name,
                election.start_date,
                election.end_date,
                election.academic_year,
                election.id
            ],
        )?;
        expect_one_row(changed, || not_found(election.id))
    }

    fn delete(&self, id: Id) -> Result<()> {
        debug!("Deleting election #{id}");
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM elections WHERE id = ?1", [id])?;
        expect_one_row(changed, || not_found(id))
    }

    fn exists(&self, id: Id) -> bool {
        row_exists(self.db.connection(), "elections", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::election::date;

    #[backend_test]
    fn create_then_find(elections: ElectionRepository) {
        let created = elections.create(ElectionCore::example()).unwrap();
        assert!(created.id.is_assignable());
        let found = elections.find_by_id(created.id).unwrap();
        assert_eq!(found, created);
        assert!(elections.exists(created.id));
    }

    #[backend_test]
    fn missing_rows(elections: ElectionRepository) {
        let ghost = Id::new(99);
        assert!(matches!(elections.find_by_id(ghost), Err(Error::NotFound(_))));
        assert!(matches!(elections.delete(ghost), Err(Error::NotFound(_))));
        let phantom = Election::new(ghost, ElectionCore::example());
        match elections.update(&phantom) {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "Election not found with id: 99"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(!elections.exists(ghost));
    }

    #[backend_test]
    fn update_and_delete(elections: ElectionRepository) {
        let mut election = elections.create(ElectionCore::example()).unwrap();
        election.name = "Renamed".to_string();
        election.end_date = date(2026, 2, 1);
        elections.update(&election).unwrap();
        assert_eq!(elections.find_by_id(election.id).unwrap(), election);

        elections.delete(election.id).unwrap();
        assert!(!elections.exists(election.id));
    }

    #[backend_test]
    fn finders(elections: ElectionRepository) {
        let president = elections.create(ElectionCore::example()).unwrap();
        let council = elections.create(ElectionCore::example2()).unwrap();

        assert_eq!(elections.find_all().unwrap(), vec![president.clone(), council.clone()]);
        assert_eq!(
            elections.find_active(date(2026, 1, 19)).unwrap(),
            vec![president.clone()]
        );
        assert!(elections.find_active(date(2026, 1, 20)).unwrap().is_empty());
        assert_eq!(
            elections.find_by_academic_year("2024-2025").unwrap(),
            vec![council]
        );
        assert!(elections.find_by_academic_year("1999-2000").unwrap().is_empty());
    }

    #[backend_test]
    fn exists_degrades_to_false(db: Database) {
        let elections = ElectionRepository::from_db(&db);
        let created = elections.create(ElectionCore::example()).unwrap();
        db.connection().execute_batch("DROP TABLE elections").unwrap();
        assert!(!elections.exists(created.id));
        assert!(matches!(elections.find_all(), Err(Error::Db(_))));
    }
}
