pub use db::Student;
pub use student_core::{StudentCore, MAX_STUDENT_YEAR, MIN_STUDENT_YEAR};

mod db;
mod student_core;

/// A new student ready for DB insertion is just a [`Student`] without an ID.
pub type NewStudent = StudentCore;
