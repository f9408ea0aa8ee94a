//! Record repository for the SQLite ledger
//!
//! Reads always join categories and members so that callers get resolved
//! names. A record whose reference is null or points at a missing row comes
//! back with `None` for that name, and the grouped totals below put all such
//! records in one unnamed group instead of dropping them.

use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::HomeboxResult;
use crate::models::{CategoryId, MemberId, Money, Record, RecordId, RecordKind};

const SELECT_RECORD: &str = "SELECT r.id, r.dt, r.kind, r.amount, r.category_id, c.name, \
     r.payer_id, m.name, r.note, r.created_at \
     FROM records r \
     LEFT JOIN categories c ON c.id = r.category_id \
     LEFT JOIN members m ON m.id = r.payer_id";

/// Field values for a record insert or full replacement
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub amount: Money,
    pub category_id: Option<CategoryId>,
    pub payer_id: Option<MemberId>,
    pub note: Option<String>,
}

/// Summed amount for one group; `name` is `None` for the unassigned group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal {
    pub name: Option<String>,
    pub total: Money,
}

/// Summed amount for one (group, kind) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindTotal {
    pub name: Option<String>,
    pub kind: RecordKind,
    pub total: Money,
}

/// Repository for ledger record persistence and aggregation
pub struct RecordRepository<'a> {
    connection: &'a Connection,
}

impl<'a> RecordRepository<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Record> {
        Ok(Record {
            id: row.get(0)?,
            date: row.get(1)?,
            kind: row.get(2)?,
            amount: row.get(3)?,
            category_id: row.get(4)?,
            category: row.get(5)?,
            payer_id: row.get(6)?,
            payer: row.get(7)?,
            note: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    /// Insert a record and return its assigned id
    pub fn insert(&self, record: &NewRecord) -> HomeboxResult<RecordId> {
        let id = self.connection.query_row(
            "INSERT INTO records (dt, kind, amount, category_id, payer_id, note, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id",
            (
                record.date,
                record.kind,
                record.amount,
                record.category_id,
                record.payer_id,
                &record.note,
                Utc::now(),
            ),
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Replace every field except `created_at`; returns false if `id` is absent
    pub fn update(&self, id: RecordId, record: &NewRecord) -> HomeboxResult<bool> {
        let changed = self.connection.execute(
            "UPDATE records
             SET dt = ?1, kind = ?2, amount = ?3, category_id = ?4, payer_id = ?5, note = ?6
             WHERE id = ?7",
            (
                record.date,
                record.kind,
                record.amount,
                record.category_id,
                record.payer_id,
                &record.note,
                id,
            ),
        )?;
        Ok(changed > 0)
    }

    /// Delete a record; returns whether a row was removed
    pub fn delete(&self, id: RecordId) -> HomeboxResult<bool> {
        let changed = self
            .connection
            .execute("DELETE FROM records WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    pub fn get(&self, id: RecordId) -> HomeboxResult<Option<Record>> {
        Ok(self
            .connection
            .query_row(
                &format!("{} WHERE r.id = ?1", SELECT_RECORD),
                [id],
                Self::map_row,
            )
            .optional()?)
    }

    /// Records dated within `start..=end`, newest first, at most `limit` rows
    pub fn in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: usize,
    ) -> HomeboxResult<Vec<Record>> {
        let sql = format!(
            "{} WHERE r.dt BETWEEN ?1 AND ?2 ORDER BY r.dt DESC, r.id DESC LIMIT ?3",
            SELECT_RECORD
        );
        let mut stmt = self.connection.prepare(&sql)?;
        let records = stmt
            .query_map((start, end, limit as i64), Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// The most recent `limit` records
    pub fn recent(&self, limit: usize) -> HomeboxResult<Vec<Record>> {
        let sql = format!(
            "{} ORDER BY r.dt DESC, r.id DESC LIMIT ?1",
            SELECT_RECORD
        );
        let mut stmt = self.connection.prepare(&sql)?;
        let records = stmt
            .query_map([limit as i64], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn count(&self) -> HomeboxResult<usize> {
        let count: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Sum of `kind` amounts dated within `start..=end`
    pub fn total(&self, start: NaiveDate, end: NaiveDate, kind: RecordKind) -> HomeboxResult<Money> {
        Ok(self.connection.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM records
             WHERE kind = ?1 AND dt BETWEEN ?2 AND ?3",
            (kind, start, end),
            |row| row.get(0),
        )?)
    }

    /// Totals of `kind` per category name, largest first
    pub fn totals_by_category(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        kind: RecordKind,
    ) -> HomeboxResult<Vec<GroupTotal>> {
        let mut stmt = self.connection.prepare(
            "SELECT c.name, SUM(r.amount) AS total
             FROM records r
             LEFT JOIN categories c ON c.id = r.category_id
             WHERE r.kind = ?1 AND r.dt BETWEEN ?2 AND ?3
             GROUP BY c.name
             ORDER BY total DESC, c.name IS NULL, c.name",
        )?;
        let totals = stmt
            .query_map((kind, start, end), |row| {
                Ok(GroupTotal {
                    name: row.get(0)?,
                    total: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }

    /// Totals of `kind` per payer name, largest first
    pub fn totals_by_payer(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        kind: RecordKind,
    ) -> HomeboxResult<Vec<GroupTotal>> {
        let mut stmt = self.connection.prepare(
            "SELECT m.name, SUM(r.amount) AS total
             FROM records r
             LEFT JOIN members m ON m.id = r.payer_id
             WHERE r.kind = ?1 AND r.dt BETWEEN ?2 AND ?3
             GROUP BY m.name
             ORDER BY total DESC, m.name IS NULL, m.name",
        )?;
        let totals = stmt
            .query_map((kind, start, end), |row| {
                Ok(GroupTotal {
                    name: row.get(0)?,
                    total: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }

    /// Totals per (payer name, kind) across both kinds
    pub fn totals_by_payer_and_kind(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HomeboxResult<Vec<KindTotal>> {
        let mut stmt = self.connection.prepare(
            "SELECT m.name, r.kind, SUM(r.amount)
             FROM records r
             LEFT JOIN members m ON m.id = r.payer_id
             WHERE r.dt BETWEEN ?1 AND ?2
             GROUP BY m.name, r.kind
             ORDER BY m.name IS NULL, m.name, r.kind",
        )?;
        let totals = stmt
            .query_map((start, end), |row| {
                Ok(KindTotal {
                    name: row.get(0)?,
                    kind: row.get(1)?,
                    total: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }

    /// Totals of `kind` per `YYYY-MM` month key; months without records are absent
    pub fn totals_by_month(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        kind: RecordKind,
    ) -> HomeboxResult<Vec<(String, Money)>> {
        let mut stmt = self.connection.prepare(
            "SELECT substr(dt, 1, 7) AS ym, SUM(amount)
             FROM records
             WHERE kind = ?1 AND dt BETWEEN ?2 AND ?3
             GROUP BY ym
             ORDER BY ym",
        )?;
        let totals = stmt
            .query_map((kind, start, end), |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }
}
