//! Schema validation for incoming raw tables
//!
//! Confirms the six required columns are present and parses every row into a
//! typed [`Record`]. Any failure here aborts the transform stage; the caller
//! never sees a partially validated table.

use chrono::NaiveDate;

use crate::table::{RawTable, Record};

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    MissingColumn(String),
    InvalidDate { row: usize, value: String },
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::MissingColumn(name) => {
                write!(f, "schema validation: missing required column '{}'", name)
            }
            SchemaError::InvalidDate { row, value } => {
                write!(
                    f,
                    "schema validation: row {} has unparseable date '{}'",
                    row, value
                )
            }
            SchemaError::InvalidValue { row, column, value } => {
                write!(
                    f,
                    "schema validation: row {} has invalid '{}' value '{}'",
                    row, column, value
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a raw table and coerce it into typed records.
///
/// Row indexes in errors are zero-based data-row positions (header excluded).
pub fn validate(table: &RawTable) -> Result<Vec<Record>, SchemaError> {
    let col = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
    };
    let date_idx = col("date")?;
    let product_idx = col("product_id")?;
    let category_idx = col("category")?;
    let sales_idx = col("sales")?;
    let customers_idx = col("customers")?;
    let region_idx = col("region")?;

    let mut records = Vec::with_capacity(table.len());
    for (row, cells) in table.rows.iter().enumerate() {
        let cell = |idx: usize, column: &str| -> Result<&str, SchemaError> {
            cells
                .get(idx)
                .map(|s| s.as_str())
                .ok_or_else(|| SchemaError::InvalidValue {
                    row,
                    column: column.to_string(),
                    value: "<missing cell>".to_string(),
                })
        };

        let date_cell = cell(date_idx, "date")?;
        let date = NaiveDate::parse_from_str(date_cell, DATE_FORMAT).map_err(|_| {
            SchemaError::InvalidDate {
                row,
                value: date_cell.to_string(),
            }
        })?;

        let sales_cell = cell(sales_idx, "sales")?;
        let sales: f64 = sales_cell
            .parse()
            .map_err(|_| SchemaError::InvalidValue {
                row,
                column: "sales".to_string(),
                value: sales_cell.to_string(),
            })?;
        if sales < 0.0 {
            return Err(SchemaError::InvalidValue {
                row,
                column: "sales".to_string(),
                value: sales_cell.to_string(),
            });
        }

        let customers_cell = cell(customers_idx, "customers")?;
        let customers: u64 = customers_cell
            .parse()
            .map_err(|_| SchemaError::InvalidValue {
                row,
                column: "customers".to_string(),
                value: customers_cell.to_string(),
            })?;

        records.push(Record {
            date,
            product_id: cell(product_idx, "product_id")?.to_string(),
            category: cell(category_idx, "category")?.to_string(),
            sales,
            customers,
            region: cell(region_idx, "region")?.to_string(),
        });
    }

    Ok(records)
}
