use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::ops::Deref;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// A row identity assigned by the database.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(i64);

impl Id {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Database-assigned IDs start at 1, so anything lower can never match a row.
    pub fn is_assignable(&self) -> bool {
        self.0 > 0
    }
}

impl Deref for Id {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Id {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse::<i64>()?))
    }
}

impl From<i64> for Id {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl ToSql for Id {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for Id {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id: Id = " 42 ".parse().unwrap();
        assert_eq!(id, Id::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("forty-two".parse::<Id>().is_err());
    }

    #[test]
    fn assignable() {
        assert!(Id::new(1).is_assignable());
        assert!(!Id::new(0).is_assignable());
        assert!(!Id::new(-3).is_assignable());
    }
}
