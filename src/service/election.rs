use chrono::{Local, NaiveDate};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::model::{
    common::is_valid_string,
    election::{Election, ElectionCore, NewElection},
    Id,
};
use crate::repository::{ElectionRepository, Repository};

pub struct ElectionService {
    elections: ElectionRepository,
}

impl ElectionService {
    pub fn from_db(db: &Database) -> Self {
        Self {
            elections: ElectionRepository::from_db(db),
        }
    }

    pub fn create_election(&self, election: NewElection) -> Result<Election> {
        validate_election(&election)?;
        let election = self.elections.create(election)?;
        info!("Created election #{}: {}", election.id, election.name);
        Ok(election)
    }

    pub fn get_election(&self, id: Id) -> Result<Election> {
        if !id.is_assignable() {
            return Err(Error::not_found("Invalid election ID"));
        }
        self.elections.find_by_id(id)
    }

    pub fn all_elections(&self) -> Result<Vec<Election>> {
        self.elections.find_all()
    }

    pub fn update_election(&self, election: &Election) -> Result<()> {
        validate_election(election)?;
        if !self.elections.exists(election.id) {
            return Err(Error::not_found(format!(
                "Election not found with id: {}",
                election.id
            )));
        }
        self.elections.update(election)?;
        info!("Updated election #{}", election.id);
        Ok(())
    }

    pub fn delete_election(&self, id: Id) -> Result<()> {
        if !self.elections.exists(id) {
            return Err(Error::not_found(format!("Election not found with id: {id}")));
        }
        self.elections.delete(id)?;
        info!("Deleted election #{id}");
        Ok(())
    }

    /// Elections open for voting today.
    pub fn active_elections(&self) -> Result<Vec<Election>> {
        self.active_elections_on(Local::now().date_naive())
    }

    pub fn active_elections_on(&self, date: NaiveDate) -> Result<Vec<Election>> {
        self.elections.find_active(date)
    }

    pub fn elections_by_academic_year(&self, academic_year: &str) -> Result<Vec<Election>> {
        if !is_valid_string(academic_year) {
            return Err(Error::invalid("Invalid academic year"));
        }
        self.elections.find_by_academic_year(academic_year)
    }
}

/// Elections carry no rules of their own; they are checked here, first failure wins.
fn validate_election(election: &ElectionCore) -> Result<()> {
    let violation = if !is_valid_string(&election.name) {
        Some("Election name is required")
    } else if election.end_date < election.start_date {
        Some("End date must be after start date")
    } else if !is_valid_string(&election.academic_year) {
        Some("Academic year is required")
    } else {
        None
    };
    match violation {
        Some(message) => {
            warn!("Rejected election: {message}");
            Err(Error::invalid(message))
        }
        None => Ok(()),
    }
}
