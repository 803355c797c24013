//! SQLite load of the enriched table
//!
//! Loads the same rows the CSV export carries into a fixed `sales` table with
//! replace semantics: each run drops and recreates the table, then inserts
//! every row inside one transaction.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::persist::PersistError;
use crate::table::EnrichedRecord;

/// Fixed table name the presentation layer queries.
pub const SALES_TABLE: &str = "sales";

pub struct SalesDb {
    conn: Connection,
}

impl SalesDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        log::debug!("💾 SQLite database opened: {}", path.display());
        Ok(Self { conn })
    }

    /// Replace the `sales` table with the given records.
    ///
    /// Drop, create, and all inserts run inside one transaction, so a failed
    /// replace rolls back completely and the previous run's table survives.
    pub fn replace_all(&mut self, records: &[EnrichedRecord]) -> Result<(), PersistError> {
        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", SALES_TABLE), [])?;
        tx.execute(
            &format!(
                "CREATE TABLE {} (
                    date TEXT NOT NULL,
                    product_id TEXT NOT NULL,
                    category TEXT NOT NULL,
                    sales REAL NOT NULL,
                    customers INTEGER NOT NULL,
                    region TEXT NOT NULL,
                    month INTEGER NOT NULL,
                    day_of_week TEXT NOT NULL,
                    weekend INTEGER NOT NULL,
                    sales_category TEXT NOT NULL,
                    sales_trailing_avg REAL NOT NULL
                )",
                SALES_TABLE
            ),
            [],
        )?;

        for record in records {
            tx.execute(
                &format!(
                    "INSERT INTO {}
                     (date, product_id, category, sales, customers, region,
                      month, day_of_week, weekend, sales_category, sales_trailing_avg)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    SALES_TABLE
                ),
                params![
                    record.date.to_string(),
                    record.product_id,
                    record.category,
                    record.sales,
                    record.customers,
                    record.region,
                    record.month,
                    record.day_of_week,
                    record.weekend,
                    record.sales_category.as_str(),
                    record.sales_trailing_avg,
                ],
            )?;
        }
        tx.commit()?;

        log::debug!("✅ Loaded {} rows into '{}'", records.len(), SALES_TABLE);
        Ok(())
    }

    pub fn count_rows(&self) -> Result<i64, PersistError> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", SALES_TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
