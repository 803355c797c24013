//! Calendar and categorical feature derivation
//!
//! Pure in-memory transform: N validated records in, N enriched records out,
//! no rows dropped or added, no I/O.

use chrono::{Datelike, Weekday};

use crate::table::{EnrichedRecord, Record, SalesTier};

/// Derive the calendar features and sales tier for every record.
///
/// `sales_trailing_avg` is initialized to the raw `sales` value here; the
/// rolling aggregator overwrites it for every partition it can compute, so a
/// degraded partition keeps this baseline.
pub fn derive(records: Vec<Record>) -> Vec<EnrichedRecord> {
    records
        .into_iter()
        .map(|r| {
            let weekday = r.date.weekday();
            EnrichedRecord {
                month: r.date.month(),
                day_of_week: weekday_name(weekday).to_string(),
                weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
                sales_category: SalesTier::from_sales(r.sales),
                sales_trailing_avg: r.sales,
                date: r.date,
                product_id: r.product_id,
                category: r.category,
                sales: r.sales,
                customers: r.customers,
                region: r.region,
            }
        })
        .collect()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
