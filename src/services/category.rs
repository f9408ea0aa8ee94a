//! Category service

use crate::error::HomeboxResult;
use crate::models::Category;
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All categories ordered by name
    pub fn list(&self) -> HomeboxResult<Vec<Category>> {
        self.storage.categories().list()
    }

    /// Add a category; adding an existing name returns the existing row
    pub fn add(&self, name: &str) -> HomeboxResult<Category> {
        let name = Category::validate_name(name)?;
        let category = self.storage.categories().insert_or_get(&name)?;
        tracing::info!(id = %category.id, name = %category.name, "Added category");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HomeboxError;

    #[test]
    fn test_add_and_list() {
        let storage = Storage::open_in_memory().unwrap();
        let service = CategoryService::new(&storage);

        let added = service.add("  Utilities ").unwrap();
        assert_eq!(added.name, "Utilities");
        assert_eq!(service.add("Utilities").unwrap().id, added.id);
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_empty_name() {
        let storage = Storage::open_in_memory().unwrap();
        let err = CategoryService::new(&storage).add("  ").unwrap_err();
        assert!(matches!(err, HomeboxError::Validation(_)));
    }
}
