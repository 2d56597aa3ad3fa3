use rusqlite::{params, OptionalExtension, Row};

use crate::db::{is_unique_violation, Database};
use crate::error::{Error, Result};
use crate::model::{
    student::{NewStudent, Student, StudentCore},
    Id,
};
use crate::repository::{expect_one_row, row_exists, Repository};

const SELECT: &str = "SELECT id, name, student_id, major, year_of_study, has_voted FROM students";

pub struct StudentRepository {
    db: Database,
}

impl StudentRepository {
    pub fn from_db(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Look a student up by their university-assigned identifier.
    pub fn find_by_student_id(&self, student_id: &str) -> Result<Student> {
        debug!("Finding student {student_id}");
        self.db
            .connection()
            .query_row(
                &format!("{SELECT} WHERE student_id = ?1 ORDER BY id LIMIT 1"),
                [student_id],
                from_row,
            )
            .optional()?
            .ok_or_else(|| {
                Error::not_found(format!("Student not found with student_id: {student_id}"))
            })
    }

    /// Is any student registered under `student_id`? Never fails: a storage
    /// error is logged and reported as absent.
    pub fn exists_by_student_id(&self, student_id: &str) -> bool {
        let result = self.db.connection().query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE student_id = ?1)",
            [student_id],
            |row| row.get(0),
        );
        match result {
            Ok(exists) => exists,
            Err(err) => {
                warn!("Existence check on student {student_id} failed: {err}");
                false
            }
        }
    }

    pub fn find_by_major(&self, major: &str) -> Result<Vec<Student>> {
        debug!("Finding students majoring in {major}");
        self.query(&format!("{SELECT} WHERE major = ?1 ORDER BY name, id"), [major])
    }

    pub fn find_voted(&self) -> Result<Vec<Student>> {
        debug!("Finding students who have voted");
        self.query(&format!("{SELECT} WHERE has_voted = 1 ORDER BY name, id"), [])
    }

    pub fn find_non_voted(&self) -> Result<Vec<Student>> {
        debug!("Finding students who have not voted");
        self.query(&format!("{SELECT} WHERE has_voted = 0 ORDER BY name, id"), [])
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Student>> {
        let mut statement = self.db.connection().prepare(sql)?;
        let students = statement
            .query_map(params, from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student::new(
        row.get(0)?,
        StudentCore {
            name: row.get(1)?,
            student_id: row.get(2)?,
            major: row.get(3)?,
            year_of_study: row.get(4)?,
            has_voted: row.get(5)?,
        },
    ))
}

fn not_found(id: Id) -> Error {
    Error::not_found(format!("Student not found with id: {id}"))
}

/// Report a clash on the student ID index as a duplicate rather than a storage failure.
fn map_unique_violation(student_id: &str) -> impl FnOnce(rusqlite::Error) -> Error + '_ {
    move |err| {
        if is_unique_violation(&err) {
            Error::duplicate(format!("Student with ID {student_id}"))
        } else {
            err.into()
        }
    }
}

impl Repository for StudentRepository {
    type Entity = Student;
    type New = NewStudent;

    fn create(&self, new: NewStudent) -> Result<Student> {
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO students (name, student_id, major, year_of_study, has_voted) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.name,
                new.student_id,
                new.major,
                new.year_of_study,
                new.has_voted
            ],
        )
        .map_err(map_unique_violation(&new.student_id))?;
        let id = Id::new(conn.last_insert_rowid());
        debug!("Inserted student #{id} ({})", new.student_id);
        Ok(Student::new(id, new))
    }

    fn find_by_id(&self, id: Id) -> Result<Student> {
        debug!("Finding student #{id}");
        self.db
            .connection()
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    fn find_all(&self) -> Result<Vec<Student>> {
        debug!("Finding all students");
        self.query(&format!("{SELECT} ORDER BY name, id"), [])
    }

    fn update(&self, student: &Student) -> Result<()> {
        debug!("Updating student #{}", student.id);
        let changed = self
            .db
            .connection()
            .execute(
                "UPDATE students SET name = ?1, student_id = ?2, major = ?3, year_of_study = ?4, \
                 has_voted = ?5 WHERE id = ?6",
                params![
                    student.name,
                    student.student_id,
                    student.major,
                    student.year_of_study,
                    student.has_voted,
                    student.id
                ],
            )
            .map_err(map_unique_violation(&student.student_id))?;
        expect_one_row(changed, || not_found(student.id))
    }

    fn delete(&self, id: Id) -> Result<()> {
        debug!("Deleting student #{id}");
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM students WHERE id = ?1", [id])?;
        expect_one_row(changed, || not_found(id))
    }

    fn exists(&self, id: Id) -> bool {
        row_exists(self.db.connection(), "students", id)
    }
}
