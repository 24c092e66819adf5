//! JSON snapshot persistence
//!
//! Wraps the in-memory table and rewrites a snapshot file after every
//! mutation that affected a row. The snapshot is written to a sibling temp
//! file and renamed into place, so a crash leaves either the old or the new
//! snapshot on disk. A mutation whose snapshot cannot be written is rolled
//! back in memory before the error is returned.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::errors::{StoreError, StoreResult};
use super::memory::MemoryRecordStore;
use super::RecordStore;
use crate::query::{PageWindow, RecordFilter, SortSpec};
use crate::record::{Record, RecordKey};

/// File-backed record store
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    memory: MemoryRecordStore,
    /// Held across apply + snapshot write, so mutations commit one at a time
    persist_lock: Mutex<()>,
}

impl FileRecordStore {
    /// Open a snapshot file, loading its records. A missing file is an
    /// empty store; it is created on the first mutation.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<Record> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };

        tracing::info!(
            event = "STORE_OPENED",
            path = %path.display(),
            records = records.len()
        );

        Ok(Self {
            path,
            memory: MemoryRecordStore::with_records(records)?,
            persist_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot. Callers hold `persist_lock`.
    fn persist(&self) -> StoreResult<()> {
        let records = self.memory.get_all()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(fs::File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            event = "STORE_SNAPSHOT_WRITTEN",
            path = %self.path.display(),
            records = records.len()
        );
        Ok(())
    }

    /// Apply a memory mutation and persist it, or leave the store untouched
    fn commit<F>(&self, apply: F) -> StoreResult<usize>
    where
        F: FnOnce(&MemoryRecordStore) -> StoreResult<usize>,
    {
        let _guard = self.persist_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let checkpoint = self.memory.checkpoint()?;

        let affected = apply(&self.memory)?;
        if affected == 0 {
            return Ok(0);
        }

        if let Err(err) = self.persist() {
            self.memory.rollback(checkpoint)?;
            tracing::warn!(
                event = "STORE_MUTATION_ROLLED_BACK",
                path = %self.path.display(),
                error = %err
            );
            return Err(err);
        }
        Ok(affected)
    }
}

impl RecordStore for FileRecordStore {
    fn count_matching(&self, filter: &RecordFilter) -> StoreResult<usize> {
        self.memory.count_matching(filter)
    }

    fn fetch_page(
        &self,
        filter: &RecordFilter,
        window: PageWindow,
        sort: Option<&SortSpec>,
    ) -> StoreResult<Vec<Record>> {
        self.memory.fetch_page(filter, window, sort)
    }

    fn find_matching(&self, filter: &RecordFilter) -> StoreResult<Vec<Record>> {
        self.memory.find_matching(filter)
    }

    fn get_by_key(&self, key: &RecordKey) -> StoreResult<Option<Record>> {
        self.memory.get_by_key(key)
    }

    fn get_all(&self) -> StoreResult<Vec<Record>> {
        self.memory.get_all()
    }

    fn insert(&self, record: Record) -> StoreResult<usize> {
        self.commit(|memory| memory.insert(record))
    }

    fn replace(&self, key: &RecordKey, record: Record) -> StoreResult<usize> {
        self.commit(|memory| memory.replace(key, record))
    }

    fn delete(&self, key: &RecordKey) -> StoreResult<usize> {
        self.commit(|memory| memory.delete(key))
    }
}
