//! Translation of entity CRUD into single SQL statements.
//!
//! Every operation is one round-trip: no repository method batches
//! statements or opens a transaction of its own.

use crate::error::Result;
use crate::model::Id;

mod candidate;
mod election;
mod student;

pub use candidate::CandidateRepository;
pub use election::ElectionRepository;
pub use student::StudentRepository;

/// Storage for one entity type.
pub trait Repository {
    /// The entity as read back from storage, with its ID.
    type Entity;
    /// The entity as inserted, without an ID.
    type New;

    /// Insert a new row and return it with its assigned ID.
    fn create(&self, new: Self::New) -> Result<Self::Entity>;

    /// Fails with `NotFound` if no row has the given ID.
    fn find_by_id(&self, id: Id) -> Result<Self::Entity>;

    fn find_all(&self) -> Result<Vec<Self::Entity>>;

    /// Overwrite every persisted field of the row with the entity's ID.
    ///
    /// Fails with `NotFound` if no row has that ID.
    fn update(&self, entity: &Self::Entity) -> Result<()>;

    /// Fails with `NotFound` if no row has the given ID.
    fn delete(&self, id: Id) -> Result<()>;

    /// Never fails: any storage error is logged and reported as absent.
    fn exists(&self, id: Id) -> bool;
}

/// Shared implementation of [`Repository::exists`] for a table keyed by `id`.
fn row_exists(conn: &rusqlite::Connection, table: &str, id: Id) -> bool {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    match conn.query_row(&sql, [id], |row| row.get(0)) {
        Ok(exists) => exists,
        Err(err) => {
            warn!("Existence check on {table} #{id} failed: {err}");
            false
        }
    }
}

/// Turn a zero-row write into the entity's not-found error.
fn expect_one_row(changed: usize, not_found: impl FnOnce() -> crate::error::Error) -> Result<()> {
    if changed == 0 {
        Err(not_found())
    } else {
        Ok(())
    }
}
