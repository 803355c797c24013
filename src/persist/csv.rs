//! CSV export and re-import of the enriched table

use std::path::Path;

use crate::persist::PersistError;
use crate::table::EnrichedRecord;

/// Write the enriched table to a CSV file, creating parent directories on
/// demand. Columns are the raw schema plus the four derived columns and the
/// trailing average, one header row, one row per record.
pub fn write_enriched_csv(
    path: impl AsRef<Path>,
    records: &[EnrichedRecord],
) -> Result<(), PersistError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::debug!("💾 Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Read an enriched table back from CSV. Round-trips everything written by
/// [`write_enriched_csv`].
pub fn read_enriched_csv(path: impl AsRef<Path>) -> Result<Vec<EnrichedRecord>, PersistError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SalesTier;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn record(date: &str, sales: f64) -> EnrichedRecord {
        EnrichedRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            product_id: "A".to_string(),
            category: "Electronics".to_string(),
            sales,
            customers: 48,
            region: "North".to_string(),
            month: 1,
            day_of_week: "Sunday".to_string(),
            weekend: true,
            sales_category: SalesTier::from_sales(sales),
            sales_trailing_avg: sales,
        }
    }

    #[test]
    fn test_round_trip_preserves_rows_and_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("processed_sales.csv");

        let records = vec![record("2023-01-01", 950.25), record("2023-01-02", 1250.0)];
        write_enriched_csv(&path, &records).unwrap();

        let reloaded = read_enriched_csv(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded, records);
        assert_eq!(reloaded[1].sales_category, SalesTier::High);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(read_enriched_csv(&missing).is_err());
    }
}
