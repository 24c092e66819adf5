//! # Record Store
//!
//! Keyed record collection reached through a generic query interface.
//!
//! The engines only ever talk to [`RecordStore`]; the in-memory table is the
//! reference backend and the file store layers JSON snapshot persistence on
//! top of it.

mod errors;
mod file;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

use crate::query::{PageWindow, RecordFilter, SortSpec};
use crate::record::{Record, RecordKey};

/// Storage backend for audit records.
///
/// Each method is a single round-trip with its own atomicity; nothing links
/// two calls together.
pub trait RecordStore: Send + Sync {
    /// Number of records matching the filter
    fn count_matching(&self, filter: &RecordFilter) -> StoreResult<usize>;

    /// One window of matching records, sorted by `sort` or in natural order
    fn fetch_page(
        &self,
        filter: &RecordFilter,
        window: PageWindow,
        sort: Option<&SortSpec>,
    ) -> StoreResult<Vec<Record>>;

    /// Every matching record in natural order
    fn find_matching(&self, filter: &RecordFilter) -> StoreResult<Vec<Record>>;

    fn get_by_key(&self, key: &RecordKey) -> StoreResult<Option<Record>>;

    /// Full dump in natural order
    fn get_all(&self) -> StoreResult<Vec<Record>>;

    /// Insert a new record; fails with [`StoreError::Duplicate`] if the key
    /// is taken. Returns rows affected.
    fn insert(&self, record: Record) -> StoreResult<usize>;

    /// Overwrite the row stored under `key`, keeping its natural position.
    /// Returns 0 when the key is absent.
    fn replace(&self, key: &RecordKey, record: Record) -> StoreResult<usize>;

    /// Remove the row under `key`. Returns 0 when already absent.
    fn delete(&self, key: &RecordKey) -> StoreResult<usize>;
}
