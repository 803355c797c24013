//! Transform-stage orchestration
//!
//! Sequences schema validation → feature derivation → rolling aggregation.
//! The only fatal outcome is a schema failure; a degraded rolling partition
//! leaves the run in its terminal success state with the degradation reported
//! alongside the records.

use crate::etl::rolling::PartitionComputeError;
use crate::etl::schema::SchemaError;
use crate::etl::{features, rolling, schema};
use crate::table::{EnrichedRecord, RawTable};

/// Stages the transform moves through. `FeatureEnriched` and `Failed` are
/// terminal; no stage is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Raw,
    Validated,
    FeatureEnriched,
    Failed,
}

/// Result of a successful transform run.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub records: Vec<EnrichedRecord>,
    /// Partitions that fell back to raw values during rolling aggregation.
    pub degraded: Vec<PartitionComputeError>,
}

pub struct TransformPipeline {
    stage: PipelineStage,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            stage: PipelineStage::Raw,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Run the full transform stage over one raw table.
    pub fn run(&mut self, raw: &RawTable) -> Result<TransformOutcome, SchemaError> {
        log::info!("🔄 Transforming {} raw rows...", raw.len());

        let records = match schema::validate(raw) {
            Ok(records) => records,
            Err(e) => {
                self.stage = PipelineStage::Failed;
                log::error!("❌ Transform aborted: {}", e);
                return Err(e);
            }
        };
        self.stage = PipelineStage::Validated;
        log::debug!("✅ Schema validated: {} records", records.len());

        let mut enriched = features::derive(records);
        let degraded = rolling::apply_trailing_average(&mut enriched);
        self.stage = PipelineStage::FeatureEnriched;

        if degraded.is_empty() {
            log::info!("✅ Transform complete: {} enriched records", enriched.len());
        } else {
            log::warn!(
                "✅ Transform complete: {} enriched records, {} degraded partition(s)",
                enriched.len(),
                degraded.len()
            );
        }

        Ok(TransformOutcome {
            records: enriched,
            degraded,
        })
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
