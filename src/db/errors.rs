//! rusqlite reports SQLite's extended result codes as bare integers.
//! This module names the ones we care about.

use rusqlite::{Error as DbError, ErrorCode};

pub const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Return true if the given error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &DbError) -> bool {
    if let DbError::SqliteFailure(ref e, _) = *err {
        return e.code == ErrorCode::ConstraintViolation
            && e.extended_code == SQLITE_CONSTRAINT_UNIQUE;
    }
    false
}
