//! Persistence: CSV export, SQLite load, cached reads, run metadata
//!
//! The only I/O boundary of the pipeline. Each run performs one scoped write
//! per target; connections and file handles are released on every exit path.

pub mod cache;
pub mod csv;
pub mod sqlite;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::table::EnrichedRecord;

#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Csv(::csv::Error),
    Database(rusqlite::Error),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "persistence: IO error: {}", e),
            PersistError::Csv(e) => write!(f, "persistence: CSV error: {}", e),
            PersistError::Database(e) => write!(f, "persistence: database error: {}", e),
            PersistError::Serialization(e) => {
                write!(f, "persistence: serialization error: {}", e)
            }
        }
    }
}

impl std::error::Error for PersistError {}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<::csv::Error> for PersistError {
    fn from(err: ::csv::Error) -> Self {
        PersistError::Csv(err)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(err: rusqlite::Error) -> Self {
        PersistError::Database(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Serialization(err)
    }
}

/// Summary of one persisted run, written next to the data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub last_update: String,
    pub total_records: usize,
    pub date_range: String,
}

impl RunMetadata {
    pub fn for_records(records: &[EnrichedRecord]) -> Self {
        let min = records.iter().map(|r| r.date).min();
        let max = records.iter().map(|r| r.date).max();
        let date_range = match (min, max) {
            (Some(min), Some(max)) => format!("{} to {}", min, max),
            _ => "empty".to_string(),
        };
        Self {
            last_update: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_records: records.len(),
            date_range,
        }
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

pub use cache::TableCache;
pub use sqlite::{SalesDb, SALES_TABLE};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SalesTier;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn record(date: &str) -> EnrichedRecord {
        EnrichedRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            product_id: "A".to_string(),
            category: "Electronics".to_string(),
            sales: 1000.0,
            customers: 48,
            region: "North".to_string(),
            month: 1,
            day_of_week: "Sunday".to_string(),
            weekend: true,
            sales_category: SalesTier::Medium,
            sales_trailing_avg: 1000.0,
        }
    }

    #[test]
    fn test_metadata_round_trip() {
        let metadata =
            RunMetadata::for_records(&[record("2023-01-05"), record("2023-01-01")]);
        assert_eq!(metadata.total_records, 2);
        assert_eq!(metadata.date_range, "2023-01-01 to 2023-01-05");

        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("etl_metadata.json");
        metadata.write(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let reloaded: RunMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.total_records, 2);
        assert_eq!(reloaded.date_range, metadata.date_range);
        assert!(!reloaded.last_update.is_empty());
    }

    #[test]
    fn test_metadata_for_empty_table() {
        let metadata = RunMetadata::for_records(&[]);
        assert_eq!(metadata.total_records, 0);
        assert_eq!(metadata.date_range, "empty");
    }
}
