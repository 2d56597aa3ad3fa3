//! The SQLite connection handle shared by every repository.

use std::rc::Rc;

use rusqlite::Connection;

use crate::config::DbConfig;
use crate::error::Result;

mod errors;
pub mod schema;

pub use errors::{is_unique_violation, SQLITE_CONSTRAINT_UNIQUE};
pub use schema::ensure_schema;

/// A handle on the one connection to the database.
///
/// Cloning is cheap and every clone talks to the same connection, so a
/// transaction opened through any clone covers statements issued through
/// all of them. The connection closes when the last handle is dropped.
#[derive(Clone)]
pub struct Database {
    conn: Rc<Connection>,
}

impl Database {
    /// Open the configured database and make sure the schema exists.
    pub fn connect(config: &DbConfig) -> Result<Self> {
        info!("Loaded database config, connecting to {}...", config.path);
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        // Bundled SQLite enforces foreign keys by default; candidates may outlive their election.
        conn.pragma_update(None, "foreign_keys", false)?;
        let db = Self {
            conn: Rc::new(conn),
        };
        ensure_schema(&db, config.unique_student_ids)?;
        info!("...database connection online!");
        Ok(db)
    }

    /// A fresh, empty database with the default schema.
    pub fn open_in_memory() -> Result<Self> {
        Self::connect(&DbConfig::default())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside a transaction.
    ///
    /// Commits if `f` succeeds. If `f` fails or panics, everything it wrote
    /// is rolled back.
    pub fn transaction<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f()?;
        tx.commit()?;
        Ok(value)
    }

    /// Close the connection, reporting any error from SQLite.
    ///
    /// If other handles are still alive only this one is released.
    pub fn close(self) -> Result<()> {
        match Rc::try_unwrap(self.conn) {
            Ok(conn) => {
                conn.close().map_err(|(_, err)| err)?;
                info!("Database connection closed");
            }
            Err(_) => debug!("Released a database handle; connection still in use"),
        }
        Ok(())
    }
}
