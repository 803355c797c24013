//! Explicit cache for the persisted enriched table
//!
//! Replaces ambient process-wide caching with a cache keyed by path and a
//! (length, mtime) file fingerprint. A stale fingerprint triggers a reload;
//! invalidation is an explicit call, never a side effect.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::persist::{csv, PersistError};
use crate::table::EnrichedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    len: u64,
    modified: SystemTime,
}

impl Fingerprint {
    fn of(path: &Path) -> Result<Self, PersistError> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified()?,
        })
    }
}

struct CacheEntry {
    fingerprint: Fingerprint,
    records: Vec<EnrichedRecord>,
}

#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the table at `path`, reusing the cached copy while the file
    /// fingerprint is unchanged.
    pub fn load(&mut self, path: &Path) -> Result<&[EnrichedRecord], PersistError> {
        let fingerprint = Fingerprint::of(path)?;
        let stale = self
            .entries
            .get(path)
            .map_or(true, |entry| entry.fingerprint != fingerprint);

        if stale {
            let records = csv::read_enriched_csv(path)?;
            log::debug!(
                "📖 (Re)loaded {} rows from {}",
                records.len(),
                path.display()
            );
            self.entries.insert(
                path.to_path_buf(),
                CacheEntry {
                    fingerprint,
                    records,
                },
            );
        }

        Ok(&self.entries[path].records)
    }

    /// Drop the cached copy for one path.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
