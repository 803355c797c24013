//! Raw and enriched sales table model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column names every raw table must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "date",
    "product_id",
    "category",
    "sales",
    "customers",
    "region",
];

/// An untyped table as parsed from an external source: header names plus
/// rows of string cells. This is the only shape the schema validator accepts.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One validated observation of the raw schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub product_id: String,
    pub category: String,
    pub sales: f64,
    pub customers: u64,
    pub region: String,
}

/// Discretized sales tier. Bins are right-open: [0, 800) is Low,
/// [800, 1200) is Medium, [1200, inf) is High, so 800 maps to Medium
/// and 1200 maps to High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesTier {
    Low,
    Medium,
    High,
}

/// Lower edge of the Medium tier.
pub const TIER_MEDIUM_EDGE: f64 = 800.0;
/// Lower edge of the High tier.
pub const TIER_HIGH_EDGE: f64 = 1200.0;

impl SalesTier {
    pub fn from_sales(sales: f64) -> Self {
        if sales >= TIER_HIGH_EDGE {
            SalesTier::High
        } else if sales >= TIER_MEDIUM_EDGE {
            SalesTier::Medium
        } else {
            SalesTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SalesTier::Low => "Low",
            SalesTier::Medium => "Medium",
            SalesTier::High => "High",
        }
    }
}

/// A record after feature derivation and rolling aggregation.
///
/// `sales_trailing_avg` is the trailing 7-observation mean of `sales` within
/// this record's `product_id`, ordered by date, never reading future rows.
/// When a partition is degraded it holds the raw `sales` value instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub date: NaiveDate,
    pub product_id: String,
    pub category: String,
    pub sales: f64,
    pub customers: u64,
    pub region: String,
    pub month: u32,
    pub day_of_week: String,
    pub weekend: bool,
    pub sales_category: SalesTier,
    pub sales_trailing_avg: f64,
}
