//! Content-addressed cache for parsed tables.
//!
//! Keys are blake3 digests of the raw workbook bytes, so identical uploads
//! resolve to the same immutable table. Eviction is keep-latest-only: a new
//! digest replaces whatever was cached before it.

use crate::error::ThermoResult;
use crate::types::ReportTable;
use std::sync::Arc;

#[derive(Debug)]
struct CacheEntry {
    digest: blake3::Hash,
    table: Arc<ReportTable>,
}

/// Single-slot parsed-table cache keyed by content digest.
#[derive(Debug, Default)]
pub struct TableCache {
    latest: Option<CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest of a byte stream, usable as a stable identity for its table.
    pub fn digest(bytes: &[u8]) -> blake3::Hash {
        blake3::hash(bytes)
    }

    /// The cached table for a digest, if it is the latest one seen.
    pub fn lookup(&self, digest: &blake3::Hash) -> Option<Arc<ReportTable>> {
        self.latest
            .as_ref()
            .filter(|entry| entry.digest == *digest)
            .map(|entry| Arc::clone(&entry.table))
    }

    /// Return the cached table for these bytes, building and caching it on a
    /// digest miss. Build failures leave the previous entry in place.
    pub fn get_or_build<F>(&mut self, bytes: &[u8], build: F) -> ThermoResult<Arc<ReportTable>>
    where
        F: FnOnce() -> ThermoResult<ReportTable>,
    {
        let digest = Self::digest(bytes);
        if let Some(table) = self.lookup(&digest) {
            return Ok(table);
        }

        let table = Arc::new(build()?);
        self.latest = Some(CacheEntry {
            digest,
            table: Arc::clone(&table),
        });
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_table() -> ReportTable {
        ReportTable {
            records: Vec::new(),
            companies: Vec::new(),
            month_label: None,
            total_sales_goal: 0.0,
        }
    }

    #[test]
    fn test_identical_bytes_hit_the_cache() {
        let mut cache = TableCache::new();
        let mut builds = 0;

        for _ in 0..3 {
            cache
                .get_or_build(b"same bytes", || {
                    builds += 1;
                    Ok(empty_table())
                })
                .unwrap();
        }

        assert_eq!(builds, 1);
    }

    #[test]
    fn test_new_content_evicts_the_previous_entry() {
        let mut cache = TableCache::new();
        let first_digest = TableCache::digest(b"first");

        cache.get_or_build(b"first", || Ok(empty_table())).unwrap();
        cache.get_or_build(b"second", || Ok(empty_table())).unwrap();

        // Only the latest upload stays cached
        assert!(cache.lookup(&first_digest).is_none());
        assert!(cache.lookup(&TableCache::digest(b"second")).is_some());
    }

    #[test]
    fn test_build_failure_keeps_previous_entry() {
        let mut cache = TableCache::new();
        cache.get_or_build(b"good", || Ok(empty_table())).unwrap();

        let result = cache.get_or_build(b"bad", || Err(crate::error::ThermoError::NoData));
        assert!(result.is_err());
        assert!(cache.lookup(&TableCache::digest(b"good")).is_some());
    }
}
