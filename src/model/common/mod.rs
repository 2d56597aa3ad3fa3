//! Capabilities shared between entity types.

pub mod validation;
pub mod votable;

pub use validation::{is_valid_string, is_valid_year, Validatable};
pub use votable::{meets_basic_voting_requirements, Votable};
