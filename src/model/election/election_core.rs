use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Core election data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionCore {
    /// Election name.
    pub name: String,
    /// First day of voting.
    pub start_date: NaiveDate,
    /// Last day of voting, inclusive.
    pub end_date: NaiveDate,
    /// Academic year label, e.g. "2026-2027".
    pub academic_year: String,
}

impl ElectionCore {
    /// Create a new election.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        academic_year: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
            academic_year: academic_year.into(),
        }
    }

    /// Is voting open on the given day? Both ends of the window are inclusive.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Is voting open today, according to the local clock?
    pub fn is_active(&self) -> bool {
        self.is_active_on(Local::now().date_naive())
    }
}
