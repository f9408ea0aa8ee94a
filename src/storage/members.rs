//! Member repository for the SQLite ledger

use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::HomeboxResult;
use crate::models::Member;

/// Repository for household member persistence
pub struct MemberRepository<'a> {
    connection: &'a Connection,
}

impl<'a> MemberRepository<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Member> {
        Ok(Member {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    /// All members in the order they were added
    pub fn list(&self) -> HomeboxResult<Vec<Member>> {
        let mut stmt = self
            .connection
            .prepare("SELECT id, name FROM members ORDER BY id")?;
        let members = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }

    pub fn find_by_name(&self, name: &str) -> HomeboxResult<Option<Member>> {
        Ok(self
            .connection
            .query_row(
                "SELECT id, name FROM members WHERE name = ?1",
                [name],
                Self::map_row,
            )
            .optional()?)
    }

    /// Return the member called `name`, creating it if it does not exist
    pub fn insert_or_get(&self, name: &str) -> HomeboxResult<Member> {
        self.connection.execute(
            "INSERT INTO members (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            [name],
        )?;
        Ok(self.connection.query_row(
            "SELECT id, name FROM members WHERE name = ?1",
            [name],
            Self::map_row,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;

    #[test]
    fn test_members_keep_insertion_order() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.members();
        let zhang = repo.insert_or_get("Zhang").unwrap();
        repo.insert_or_get("Liu").unwrap();
        assert_eq!(repo.insert_or_get("Zhang").unwrap().id, zhang.id);

        let names: Vec<_> = repo.list().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Zhang", "Liu"]);
    }

    #[test]
    fn test_find_by_name() {
        let storage = Storage::open_in_memory().unwrap();
        storage.members().insert_or_get("Liu").unwrap();
        assert!(storage.members().find_by_name("Liu").unwrap().is_some());
        assert!(storage.members().find_by_name("Wang").unwrap().is_none());
    }
}
