use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::common::{
    validation::{is_valid_string, is_valid_year, Validatable, VALIDATION_PASSED},
    votable::{meets_basic_voting_requirements, Votable},
};

pub const MIN_STUDENT_YEAR: i32 = 1;
pub const MAX_STUDENT_YEAR: i32 = 4;

/// Core student data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCore {
    /// Student full name.
    pub name: String,
    /// University-assigned student number, unique across students.
    pub student_id: String,
    /// Subject the student studies.
    pub major: String,
    /// Current year of study; only years 1-4 may vote.
    pub year_of_study: i32,
    /// Whether the student has already cast their vote.
    pub has_voted: bool,
}

impl StudentCore {
    /// Create a new student who has not voted yet.
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        major: impl Into<String>,
        year_of_study: i32,
    ) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            major: major.into(),
            year_of_study,
            has_voted: false,
        }
    }

    pub fn is_eligible(&self) -> bool {
        is_valid_year(self.year_of_study, MIN_STUDENT_YEAR, MAX_STUDENT_YEAR)
    }

    pub fn description(&self) -> String {
        format!(
            "Student ID: {}\nMajor: {}\nYear: {}\nVoting Status: {}",
            self.student_id,
            self.major,
            self.year_of_study,
            if self.has_voted { "Has Voted" } else { "Not Voted" }
        )
    }

    /// The first rule this student breaks, checked in priority order.
    fn first_violation(&self) -> Option<&'static str> {
        if !is_valid_string(&self.name) {
            Some("Invalid name")
        } else if !is_valid_string(&self.student_id) {
            Some("Invalid student ID")
        } else if !is_valid_string(&self.major) {
            Some("Invalid major")
        } else if !self.is_eligible() {
            Some("Students must be in year 1-4")
        } else {
            None
        }
    }
}

impl Validatable for StudentCore {
    fn validate(&self) -> bool {
        self.first_violation().is_none()
    }

    fn validation_message(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.first_violation().unwrap_or(VALIDATION_PASSED))
    }
}

impl Votable for StudentCore {
    fn vote(&mut self) -> Result<()> {
        if !self.can_vote() {
            let status = self.vote_status_description();
            warn!("{} cannot vote: {status}", self.name);
            return Err(Error::invalid(format!("Student cannot vote: {status}")));
        }
        self.has_voted = true;
        debug!("{} has voted", self.name);
        Ok(())
    }

    fn can_vote(&self) -> bool {
        meets_basic_voting_requirements(self.has_voted, self.is_eligible())
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl StudentCore {
        pub fn example1() -> Self {
            Self::new("Arguan Bakikair", "S001", "Software Engineering", 1)
        }

        pub fn example2() -> Self {
            Self::new("Dastan Nursultanov", "S002", "CS", 3)
        }

        pub fn example3() -> Self {
            Self::new("Ershat Diasov", "S003", "Data Science", 2)
        }
    }
}
