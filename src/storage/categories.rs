//! Category repository for the SQLite ledger

use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::HomeboxResult;
use crate::models::Category;

/// Repository for category persistence
pub struct CategoryRepository<'a> {
    connection: &'a Connection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    /// All categories ordered by name
    pub fn list(&self) -> HomeboxResult<Vec<Category>> {
        let mut stmt = self
            .connection
            .prepare("SELECT id, name FROM categories ORDER BY name")?;
        let categories = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn find_by_name(&self, name: &str) -> HomeboxResult<Option<Category>> {
        Ok(self
            .connection
            .query_row(
                "SELECT id, name FROM categories WHERE name = ?1",
                [name],
                Self::map_row,
            )
            .optional()?)
    }

    /// Return the category called `name`, creating it if it does not exist
    pub fn insert_or_get(&self, name: &str) -> HomeboxResult<Category> {
        self.connection.execute(
            "INSERT INTO categories (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            [name],
        )?;
        Ok(self.connection.query_row(
            "SELECT id, name FROM categories WHERE name = ?1",
            [name],
            Self::map_row,
        )?)
    }

    pub fn count(&self) -> HomeboxResult<usize> {
        let count: i64 =
            self.connection
                .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;

    #[test]
    fn test_insert_or_get_is_idempotent() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.categories();

        let first = repo.insert_or_get("Parking").unwrap();
        let second = repo.insert_or_get("Parking").unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_list_sorted_by_name() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.categories();
        repo.insert_or_get("Utilities").unwrap();
        repo.insert_or_get("Clothing").unwrap();
        repo.insert_or_get("Medical").unwrap();

        let names: Vec<_> = repo.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Clothing", "Medical", "Utilities"]);
    }

    #[test]
    fn test_find_missing() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage
            .categories()
            .find_by_name("Nowhere")
            .unwrap()
            .is_none());
    }
}
