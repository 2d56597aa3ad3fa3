//! Business rules on top of the repositories.
//!
//! Services validate before writing and pass repository errors through
//! unchanged.

mod candidate;
mod election;
mod student;

pub use candidate::CandidateService;
pub use election::ElectionService;
pub use student::StudentService;

use crate::error::{Error, Result};
use crate::model::common::Validatable;

/// Reject an entity that fails its own validation, before storage is touched.
fn ensure_valid(entity: &impl Validatable, kind: &str) -> Result<()> {
    if entity.validate() {
        Ok(())
    } else {
        let message = entity.validation_message();
        warn!("Rejected {kind}: {message}");
        Err(Error::invalid(message))
    }
}
