//! In-memory record table

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::RecordStore;
use crate::query::{PageWindow, RecordFilter, RecordSorter, SortSpec};
use crate::record::{Record, RecordKey};

/// Rows ordered by insertion sequence, plus a key index.
///
/// Insertion sequence is the natural order: it never changes for a row that
/// is replaced in place, so unsorted pages are stable across calls.
#[derive(Debug, Clone, Default)]
struct Table {
    rows: BTreeMap<u64, Record>,
    index: HashMap<RecordKey, u64>,
    next_seq: u64,
}

/// Saved table state
#[derive(Debug)]
pub(super) struct Checkpoint(Table);

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: RwLock<Table>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store, failing on the first duplicate key
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> StoreResult<Self> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Copy of the current table, for [`MemoryRecordStore::rollback`]
    pub(super) fn checkpoint(&self) -> StoreResult<Checkpoint> {
        Ok(Checkpoint(self.read()?.clone()))
    }

    /// Restore rows, key index and insertion sequence to a checkpoint
    pub(super) fn rollback(&self, checkpoint: Checkpoint) -> StoreResult<()> {
        *self.write()? = checkpoint.0;
        Ok(())
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Table>> {
        self.table.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Table>> {
        self.table.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecordStore for MemoryRecordStore {
    fn count_matching(&self, filter: &RecordFilter) -> StoreResult<usize> {
        let table = self.read()?;
        Ok(filter.apply(table.rows.values()).count())
    }

    fn fetch_page(
        &self,
        filter: &RecordFilter,
        window: PageWindow,
        sort: Option<&SortSpec>,
    ) -> StoreResult<Vec<Record>> {
        let table = self.read()?;
        let matches = filter.apply(table.rows.values());

        match sort {
            None => Ok(window.slice(matches).cloned().collect()),
            Some(spec) => {
                let mut sorted: Vec<Record> = matches.cloned().collect();
                drop(table);
                RecordSorter::sort(&mut sorted, spec);
                Ok(window.slice(sorted).collect())
            }
        }
    }

    fn find_matching(&self, filter: &RecordFilter) -> StoreResult<Vec<Record>> {
        let table = self.read()?;
        Ok(filter.apply(table.rows.values()).cloned().collect())
    }

    fn get_by_key(&self, key: &RecordKey) -> StoreResult<Option<Record>> {
        let table = self.read()?;
        Ok(table
            .index
            .get(key)
            .and_then(|seq| table.rows.get(seq))
            .cloned())
    }

    fn get_all(&self) -> StoreResult<Vec<Record>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn insert(&self, record: Record) -> StoreResult<usize> {
        let mut table = self.write()?;
        let key = record.key();
        if table.index.contains_key(&key) {
            return Err(StoreError::Duplicate(key.to_string()));
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.index.insert(key, seq);
        table.rows.insert(seq, record);
        Ok(1)
    }

    fn replace(&self, key: &RecordKey, record: Record) -> StoreResult<usize> {
        let mut table = self.write()?;
        let Some(seq) = table.index.get(key).copied() else {
            return Ok(0);
        };

        let new_key = record.key();
        if &new_key != key {
            if table.index.contains_key(&new_key) {
                return Err(StoreError::Duplicate(new_key.to_string()));
            }
            table.index.remove(key);
            table.index.insert(new_key, seq);
        }
        table.rows.insert(seq, record);
        Ok(1)
    }

    fn delete(&self, key: &RecordKey) -> StoreResult<usize> {
        let mut table = self.write()?;
        match table.index.remove(key) {
            Some(seq) => {
                table.rows.remove(&seq);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordField, RecordTemplate};

    fn seeded() -> MemoryRecordStore {
        MemoryRecordStore::with_records(vec![
            Record::new("alice", "r1", "A").with(RecordField::User, "zed"),
            Record::new("alice", "r2", "A").with(RecordField::User, "amy"),
            Record::new("bob", "r3", "B"),
        ])
        .unwrap()
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let store = seeded();
        let result = store.insert(Record::new("alice", "r1", "A"));

        assert!(matches!(result, Err(StoreError::Duplicate(ref k)) if k == "alice/r1"));
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn test_natural_order_is_insertion_order() {
        let store = seeded();
        let names: Vec<_> = store.get_all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let store = seeded();
        let key = RecordKey::new("alice", "r1");
        let updated = Record::new("alice", "r1", "A").with(RecordField::Status, "done");

        assert_eq!(store.replace(&key, updated).unwrap(), 1);
        let all = store.get_all().unwrap();
        assert_eq!(all[0].status, "done");
        assert_eq!(all[0].name, "r1");
    }

    #[test]
    fn test_replace_and_delete_absent_affect_nothing() {
        let store = seeded();
        let key = RecordKey::new("nobody", "x");

        assert_eq!(store.replace(&key, Record::new("nobody", "x", "A")).unwrap(), 0);
        assert_eq!(store.delete(&key).unwrap(), 0);
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn test_fetch_page_sorted_and_windowed() {
        let store = seeded();
        let filter = RecordFilter::new(&RecordTemplate::for_organization("A"));
        let spec = SortSpec::asc(RecordField::User);

        let page = store
            .fetch_page(&filter, PageWindow { offset: 0, limit: 1 }, Some(&spec))
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "r2");
        assert_eq!(store.count_matching(&filter).unwrap(), 2);
    }
}
