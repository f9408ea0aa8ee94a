//! Storage initialization
//!
//! Creates the ledger schema and seeds default categories and members the
//! first time a store file is created.

use rusqlite::Connection;

use crate::config::paths::HomeboxPaths;
use crate::config::settings::Settings;
use crate::error::HomeboxResult;

use super::Storage;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dt TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('expense', 'income')),
    amount INTEGER NOT NULL,
    category_id INTEGER,
    payer_id INTEGER,
    note TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_records_dt ON records(dt);
";

/// Create the ledger tables if they are missing
pub(crate) fn create_schema(connection: &Connection) -> HomeboxResult<()> {
    connection.execute_batch(SCHEMA)?;
    Ok(())
}

/// Open the ledger store, seeding defaults when the store file is new
pub fn initialize_storage(paths: &HomeboxPaths, settings: &Settings) -> HomeboxResult<Storage> {
    let fresh = needs_initialization(paths);
    let storage = Storage::open(paths.clone())?;

    if fresh {
        seed_defaults(&storage, settings)?;
    }

    Ok(storage)
}

/// Insert the configured default categories and members
pub fn seed_defaults(storage: &Storage, settings: &Settings) -> HomeboxResult<()> {
    let tx = storage.begin()?;
    {
        let categories = super::CategoryRepository::new(&tx);
        for name in &settings.default_categories {
            categories.insert_or_get(name)?;
        }
        let members = super::MemberRepository::new(&tx);
        for name in &settings.default_members {
            members.insert_or_get(name)?;
        }
    }
    tx.commit()?;

    tracing::info!(
        categories = settings.default_categories.len(),
        members = settings.default_members.len(),
        "Seeded ledger defaults"
    );
    Ok(())
}

/// Check if the ledger store still has to be created
pub fn needs_initialization(paths: &HomeboxPaths) -> bool {
    !paths.ledger_db().exists()
}
