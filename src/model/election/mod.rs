pub use db::Election;
pub use election_core::ElectionCore;

mod db;
mod election_core;

#[cfg(test)]
pub(crate) use election_core::examples::date;

/// A new election ready for DB insertion is just an [`Election`] without an ID, i.e. an `ElectionCore`.
pub type NewElection = ElectionCore;
