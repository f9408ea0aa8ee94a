//! Ledger service
//!
//! Record creation, replacement, deletion and date-range queries. Category
//! and payer names are resolved to rows (created on first use) inside the
//! same transaction as the record write.

use chrono::NaiveDate;

use crate::error::{HomeboxError, HomeboxResult};
use crate::models::{Record, RecordId, RecordInput, ValidRecordInput};
use crate::storage::{CategoryRepository, MemberRepository, NewRecord, RecordRepository, Storage};

/// Upper bound on rows returned by a date-range query
pub const MAX_QUERY_ROWS: usize = 1000;

/// Service for ledger record management
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new record, returning it as stored
    pub fn add_record(&self, input: RecordInput) -> HomeboxResult<Record> {
        let valid = input.validate()?;

        let tx = self.storage.begin()?;
        let new_record = resolve_references(&tx, valid)?;
        let id = RecordRepository::new(&tx).insert(&new_record)?;
        tx.commit()?;

        tracing::info!(
            id = %id,
            date = %new_record.date,
            kind = %new_record.kind,
            amount = %new_record.amount,
            "Added record"
        );

        self.get_record(id)
    }

    /// Replace every field of an existing record
    ///
    /// `created_at` is kept from the original row.
    pub fn update_record(&self, id: RecordId, input: RecordInput) -> HomeboxResult<Record> {
        let valid = input.validate()?;

        let tx = self.storage.begin()?;
        let new_record = resolve_references(&tx, valid)?;
        if !RecordRepository::new(&tx).update(id, &new_record)? {
            return Err(HomeboxError::record_not_found(id.to_string()));
        }
        tx.commit()?;

        tracing::info!(id = %id, "Updated record");

        self.get_record(id)
    }

    /// Delete a record; deleting an absent id is not an error
    pub fn delete_record(&self, id: RecordId) -> HomeboxResult<bool> {
        let removed = self.storage.records().delete(id)?;
        if removed {
            tracing::info!(id = %id, "Deleted record");
        } else {
            tracing::debug!(id = %id, "Delete skipped, no such record");
        }
        Ok(removed)
    }

    /// Get a record by id
    pub fn get_record(&self, id: RecordId) -> HomeboxResult<Record> {
        self.storage
            .records()
            .get(id)?
            .ok_or_else(|| HomeboxError::record_not_found(id.to_string()))
    }

    /// Records dated within `start..=end`, newest first, capped at [`MAX_QUERY_ROWS`]
    pub fn query_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HomeboxResult<Vec<Record>> {
        let records = self.storage.records().in_range(start, end, MAX_QUERY_ROWS)?;
        tracing::debug!(%start, %end, rows = records.len(), "Queried records by date range");
        Ok(records)
    }

    /// The most recent `limit` records (capped at [`MAX_QUERY_ROWS`])
    pub fn list_recent(&self, limit: usize) -> HomeboxResult<Vec<Record>> {
        self.storage.records().recent(limit.min(MAX_QUERY_ROWS))
    }

    /// Total number of stored records
    pub fn count(&self) -> HomeboxResult<usize> {
        self.storage.records().count()
    }
}

fn resolve_references(
    connection: &rusqlite::Connection,
    valid: ValidRecordInput,
) -> HomeboxResult<NewRecord> {
    let category = CategoryRepository::new(connection).insert_or_get(&valid.category)?;
    let payer = MemberRepository::new(connection).insert_or_get(&valid.payer)?;

    Ok(NewRecord {
        date: valid.date,
        kind: valid.kind,
        amount: valid.amount,
        category_id: Some(category.id),
        payer_id: Some(payer.id),
        note: valid.note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(day: &str, cents: i64, category: &str, payer: &str) -> RecordInput {
        RecordInput {
            date: day.to_string(),
            kind: RecordKind::Expense,
            amount: Money::from_cents(cents),
            category: category.to_string(),
            payer: payer.to_string(),
            note: Some("weekly shop".to_string()),
        }
    }

    #[test]
    fn test_add_then_query_returns_identical_record() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);

        let cases = [
            ("2025-01-01", 1, "Groceries", "Zhang"),
            ("2024-02-29", 123456, "Medical", "Liu"),
            ("2025-12-31", 99, "A new category", "A new member"),
        ];

        for (day, cents, category, payer) in cases {
            let added = service
                .add_record(input(day, cents, category, payer))
                .unwrap();
            let found = service.query_by_date_range(added.date, added.date).unwrap();

            let matching: Vec<_> = found.iter().filter(|r| r.id == added.id).collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0], &added);
            assert_eq!(added.amount.cents(), cents);
            assert_eq!(added.category.as_deref(), Some(category));
            assert_eq!(added.payer.as_deref(), Some(payer));
            assert_eq!(added.note.as_deref(), Some("weekly shop"));
        }
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);

        let err = service
            .add_record(input("2025-01-01", 0, "Groceries", "Zhang"))
            .unwrap_err();
        assert!(matches!(err, HomeboxError::Validation(_)));

        let err = service
            .add_record(input("01/02/2025", 10, "Groceries", "Zhang"))
            .unwrap_err();
        assert!(matches!(err, HomeboxError::Validation(_)));

        let err = service
            .add_record(input("2025-01-01", 10, "", "Zhang"))
            .unwrap_err();
        assert!(matches!(err, HomeboxError::MissingSelection(_)));

        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_update_record() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        let added = service
            .add_record(input("2025-01-10", 500, "Groceries", "Zhang"))
            .unwrap();

        let mut replacement = input("2025-01-11", 750, "Dining Out", "Liu");
        replacement.kind = RecordKind::Income;
        replacement.note = None;
        let updated = service.update_record(added.id, replacement).unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.kind, RecordKind::Income);
        assert_eq!(updated.amount.cents(), 750);
        assert_eq!(updated.category.as_deref(), Some("Dining Out"));
        assert_eq!(updated.note, None);
        assert_eq!(updated.created_at, added.created_at);
    }

    #[test]
    fn test_update_missing_record() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);

        let err = service
            .update_record(RecordId::new(42), input("2025-01-11", 1, "Parking", "Zhang"))
            .unwrap_err();
        assert!(err.is_not_found());
        // The rolled back transaction must not leave the new category behind
        assert!(storage.categories().find_by_name("Parking").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        service
            .add_record(input("2025-01-10", 500, "Groceries", "Zhang"))
            .unwrap();
        let before = service.count().unwrap();

        assert!(!service.delete_record(RecordId::new(9999)).unwrap());
        assert_eq!(service.count().unwrap(), before);
    }

    #[test]
    fn test_delete_existing() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        let added = service
            .add_record(input("2025-01-10", 500, "Groceries", "Zhang"))
            .unwrap();

        assert!(service.delete_record(added.id).unwrap());
        assert!(service.get_record(added.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_query_range_bounds_inclusive() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        for day in ["2025-01-31", "2025-02-01", "2025-02-28", "2025-03-01"] {
            service.add_record(input(day, 100, "Groceries", "Zhang")).unwrap();
        }

        let february = service
            .query_by_date_range(date(2025, 2, 1), date(2025, 2, 28))
            .unwrap();
        assert_eq!(february.len(), 2);
        assert_eq!(february[0].date, date(2025, 2, 28));

        assert!(service
            .query_by_date_range(date(2025, 3, 2), date(2025, 3, 1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_list_recent() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        for day in ["2025-01-01", "2025-03-01", "2025-02-01"] {
            service.add_record(input(day, 100, "Groceries", "Zhang")).unwrap();
        }

        let recent = service.list_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, date(2025, 3, 1));
        assert_eq!(recent[1].date, date(2025, 2, 1));
    }

    #[test]
    fn test_query_caps_rows_newest_first() {
        let storage = Storage::open_in_memory().unwrap();
        let service = LedgerService::new(&storage);
        let first = date(2025, 1, 1);
        let total = MAX_QUERY_ROWS + 5;

        let tx = storage.begin().unwrap();
        for offset in 0..total {
            storage
                .records()
                .insert(&NewRecord {
                    date: first + chrono::Days::new(offset as u64),
                    kind: RecordKind::Expense,
                    amount: Money::from_cents(100),
                    category_id: None,
                    payer_id: None,
                    note: None,
                })
                .unwrap();
        }
        tx.commit().unwrap();

        let found = service
            .query_by_date_range(first, first + chrono::Days::new(total as u64))
            .unwrap();

        assert_eq!(found.len(), MAX_QUERY_ROWS);
        assert_eq!(found[0].date, first + chrono::Days::new(total as u64 - 1));
        assert_eq!(found[MAX_QUERY_ROWS - 1].date, first + chrono::Days::new(5));
        assert!(found.windows(2).all(|pair| pair[0].date > pair[1].date));
    }
}
