use std::fmt::{Display, Formatter};

use crate::db::Database;
use crate::error::Result;

/// A single column: how SQLite declares it, and which entity field it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub declaration: &'static str,
    pub field: &'static str,
}

/// A table and the entity stored in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub entity: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    /// Idempotent DDL for this table.
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| format!("{} {}", column.name, column.declaration))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({columns})", self.name)
    }
}

impl Display for TableSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} -> {}", self.name, self.entity)?;
        for column in self.columns {
            writeln!(
                f,
                "  {:<14} {:<48} {}",
                column.name, column.declaration, column.field
            )?;
        }
        Ok(())
    }
}

const fn column(name: &'static str, declaration: &'static str, field: &'static str) -> Column {
    Column {
        name,
        declaration,
        field,
    }
}

pub const ELECTIONS: TableSchema = TableSchema {
    name: "elections",
    entity: "Election",
    columns: &[
        column("id", "INTEGER PRIMARY KEY AUTOINCREMENT", "id: Id"),
        column("name", "TEXT NOT NULL", "name: String"),
        column("start_date", "TEXT NOT NULL", "start_date: NaiveDate"),
        column("end_date", "TEXT NOT NULL", "end_date: NaiveDate"),
        column("academic_year", "TEXT NOT NULL", "academic_year: String"),
    ],
};

// Foreign keys are not enforced: deleting an election leaves its candidates orphaned.
pub const CANDIDATES: TableSchema = TableSchema {
    name: "candidates",
    entity: "Candidate",
    columns: &[
        column("id", "INTEGER PRIMARY KEY AUTOINCREMENT", "id: Id"),
        column("name", "TEXT NOT NULL", "name: String"),
        column("major", "TEXT NOT NULL", "major: String"),
        column("year_of_study", "INTEGER NOT NULL", "year_of_study: i32"),
        column("campaign", "TEXT NOT NULL DEFAULT ''", "campaign: String"),
        column(
            "election_id",
            "INTEGER NOT NULL REFERENCES elections(id)",
            "election: Option<Election>",
        ),
        column(
            "vote_count",
            "INTEGER NOT NULL DEFAULT 0 CHECK (vote_count >= 0)",
            "vote_count: u32",
        ),
    ],
};

pub const STUDENTS: TableSchema = TableSchema {
    name: "students",
    entity: "Student",
    columns: &[
        column("id", "INTEGER PRIMARY KEY AUTOINCREMENT", "id: Id"),
        column("name", "TEXT NOT NULL", "name: String"),
        column("student_id", "TEXT NOT NULL", "student_id: String"),
        column("major", "TEXT NOT NULL", "major: String"),
        column("year_of_study", "INTEGER NOT NULL", "year_of_study: i32"),
        column("has_voted", "INTEGER NOT NULL DEFAULT 0", "has_voted: bool"),
    ],
};

pub const TABLES: [TableSchema; 3] = [ELECTIONS, CANDIDATES, STUDENTS];

const UNIQUE_STUDENT_ID_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_students_student_id ON students(student_id)";

/// Ensure that all the required tables (and, optionally, the student ID
/// uniqueness index) exist.
///
/// This operation is idempotent.
pub fn ensure_schema(db: &Database, unique_student_ids: bool) -> Result<()> {
    debug!("Ensuring tables exist");
    let conn = db.connection();
    for table in &TABLES {
        conn.execute_batch(&table.create_sql())?;
    }
    if unique_student_ids {
        debug!("Ensuring student ID uniqueness index exists");
        conn.execute_batch(UNIQUE_STUDENT_ID_INDEX)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_from_description() {
        assert_eq!(
            ELECTIONS.create_sql(),
            "CREATE TABLE IF NOT EXISTS elections (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL, start_date TEXT NOT NULL, end_date TEXT NOT NULL, \
             academic_year TEXT NOT NULL)"
        );
    }

    #[test]
    fn inspection_lists_every_column() {
        let rendered = CANDIDATES.to_string();
        assert!(rendered.starts_with("candidates -> Candidate\n"));
        assert_eq!(rendered.lines().count(), 1 + CANDIDATES.columns.len());
        assert!(rendered.contains("election: Option<Election>"));
    }

    #[backend_test]
    fn idempotent(db: Database) {
        ensure_schema(&db, true).unwrap();
        ensure_schema(&db, false).unwrap();
        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('elections', 'candidates', 'students')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }
}
