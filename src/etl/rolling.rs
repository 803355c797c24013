//! Trailing moving average per product partition
//!
//! Each `product_id` forms an independent partition: its rows are ordered by
//! date and averaged over the last [`TRAILING_WINDOW`] observations, using all
//! available history when fewer exist. Windows never cross partitions and
//! never read rows dated after the one being computed.

use std::collections::BTreeMap;
use std::collections::VecDeque;

use crate::table::EnrichedRecord;

/// Window length for the trailing sales mean.
pub const TRAILING_WINDOW: usize = 7;

/// A numeric failure confined to one partition. The partition keeps its
/// raw-value fallback; the rest of the table is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionComputeError {
    pub product_id: String,
    pub row: usize,
    pub value: f64,
}

impl std::fmt::Display for PartitionComputeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rolling aggregation: partition '{}' degraded, non-finite sales {} at row {}",
            self.product_id, self.value, self.row
        )
    }
}

impl std::error::Error for PartitionComputeError {}

/// Compute `sales_trailing_avg` in place for every partition.
///
/// A partition containing any non-finite `sales` value is left on its
/// raw-value baseline and reported in the returned list; remaining partitions
/// are still computed. Iteration is keyed on a sorted map so output and error
/// order are deterministic.
pub fn apply_trailing_average(records: &mut [EnrichedRecord]) -> Vec<PartitionComputeError> {
    let mut partitions: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        partitions
            .entry(record.product_id.clone())
            .or_default()
            .push(idx);
    }

    let mut degraded = Vec::new();
    for (product_id, mut indexes) in partitions {
        // Stable ordering by date; original row order breaks ties so the
        // result is identical for any input permutation once re-sorted.
        indexes.sort_by_key(|&i| (records[i].date, i));

        if let Some(&bad) = indexes.iter().find(|&&i| !records[i].sales.is_finite()) {
            let err = PartitionComputeError {
                product_id,
                row: bad,
                value: records[bad].sales,
            };
            log::warn!("⚠️  {}", err);
            degraded.push(err);
            continue;
        }

        let mut window: VecDeque<f64> = VecDeque::with_capacity(TRAILING_WINDOW);
        let mut sum = 0.0;
        for &i in &indexes {
            if window.len() == TRAILING_WINDOW {
                sum -= window.pop_front().unwrap_or(0.0);
            }
            window.push_back(records[i].sales);
            sum += records[i].sales;
            records[i].sales_trailing_avg = sum / window.len() as f64;
        }
    }

    degraded
}
