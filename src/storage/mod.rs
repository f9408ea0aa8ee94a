//! Storage layer for homebox
//!
//! The ledger lives in a single SQLite file. [`Storage`] owns the connection
//! and hands out short-lived repositories that borrow it.

pub mod categories;
pub mod init;
pub mod members;
pub mod records;

pub use categories::CategoryRepository;
pub use init::{initialize_storage, needs_initialization};
pub use members::MemberRepository;
pub use records::{GroupTotal, KindTotal, NewRecord, RecordRepository};

use rusqlite::{Connection, Transaction};

use crate::config::paths::HomeboxPaths;
use crate::error::{HomeboxError, HomeboxResult};

/// Owns the ledger connection and provides access to all repositories
pub struct Storage {
    paths: Option<HomeboxPaths>,
    connection: Connection,
}

impl Storage {
    /// Open (creating if needed) the ledger store under `paths`
    pub fn open(paths: HomeboxPaths) -> HomeboxResult<Self> {
        paths.ensure_directories()?;

        let db_path = paths.ledger_db();
        let connection = Connection::open(&db_path).map_err(|e| {
            HomeboxError::Storage(format!("Failed to open {}: {}", db_path.display(), e))
        })?;
        init::create_schema(&connection)?;

        tracing::debug!(path = %db_path.display(), "Opened ledger store");

        Ok(Self {
            paths: Some(paths),
            connection,
        })
    }

    /// Open a throwaway store that lives only in memory
    pub fn open_in_memory() -> HomeboxResult<Self> {
        let connection = Connection::open_in_memory()?;
        init::create_schema(&connection)?;

        Ok(Self {
            paths: None,
            connection,
        })
    }

    /// Get the paths configuration, `None` for in-memory stores
    pub fn paths(&self) -> Option<&HomeboxPaths> {
        self.paths.as_ref()
    }

    /// Start a transaction; repositories accept it in place of the connection
    pub fn begin(&self) -> HomeboxResult<Transaction<'_>> {
        Ok(self.connection.unchecked_transaction()?)
    }

    pub fn records(&self) -> RecordRepository<'_> {
        RecordRepository::new(&self.connection)
    }

    pub fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(&self.connection)
    }

    pub fn members(&self) -> MemberRepository<'_> {
        MemberRepository::new(&self.connection)
    }
}
