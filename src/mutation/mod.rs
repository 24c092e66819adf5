//! # Mutation Engine
//!
//! Validates and applies add / update / delete against the record store.
//!
//! Per-record lifecycle:
//! - add:    absent  -> present  (`Conflict` if the key is taken)
//! - update: present -> present  (`NotFound` if absent; replaces the row)
//! - delete: present -> absent   (idempotent; absent key affects 0 rows)
//!
//! Every call carries an explicit [`Scope`]. Records outside it are treated
//! as absent.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::errors::{RecordError, RecordResult};
use crate::record::{Record, RecordKey};
use crate::scope::Scope;
use crate::store::RecordStore;

/// Write-side engine. Holds no per-call state; clone freely.
#[derive(Clone)]
pub struct MutationEngine {
    store: Arc<dyn RecordStore>,
}

impl MutationEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a new record.
    ///
    /// Fills an empty `name` with a fresh UUID, an empty `createdTime` with
    /// the current time and an empty `organization` with the scope's.
    pub fn add(&self, scope: &Scope, mut record: Record) -> RecordResult<usize> {
        if record.owner.is_empty() {
            return Err(RecordError::invalid("record owner must not be empty"));
        }
        if record.name.is_empty() {
            record.name = Uuid::new_v4().to_string();
        }
        validate_key_part("owner", &record.owner)?;
        validate_key_part("name", &record.name)?;
        if record.created_time.is_empty() {
            record.created_time = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        }

        match scope {
            Scope::Organization(org) if record.organization.is_empty() => {
                record.organization = org.clone();
            }
            Scope::Organization(org) if &record.organization != org => {
                tracing::warn!(
                    event = "RECORD_ADD_REJECTED",
                    scope = %scope,
                    organization = %record.organization
                );
                return Err(RecordError::Forbidden(format!(
                    "cannot add records to organization {}",
                    record.organization
                )));
            }
            Scope::Global if record.organization.is_empty() => {
                return Err(RecordError::invalid("record organization must not be empty"));
            }
            _ => {}
        }

        let id = record.id();
        let affected = self.store.insert(record)?;
        tracing::info!(event = "RECORD_ADDED", id = %id, scope = %scope);
        Ok(affected)
    }

    /// Replace the record identified by `id` (`owner/name`).
    ///
    /// The key, organization and creation time of the stored row are kept:
    /// empty values in `record` inherit them, differing key or organization
    /// values are rejected.
    pub fn update(&self, scope: &Scope, id: &str, mut record: Record) -> RecordResult<usize> {
        let key: RecordKey = id.parse()?;
        let existing = self
            .store
            .get_by_key(&key)?
            .filter(|r| scope.permits(&r.organization))
            .ok_or_else(|| RecordError::NotFound(key.to_string()))?;

        inherit("owner", &mut record.owner, &existing.owner)?;
        inherit("name", &mut record.name, &existing.name)?;
        inherit("organization", &mut record.organization, &existing.organization)?;
        if record.created_time.is_empty() {
            record.created_time = existing.created_time;
        }

        let affected = self.store.replace(&key, record)?;
        tracing::info!(event = "RECORD_UPDATED", id = %key, scope = %scope, affected);
        Ok(affected)
    }

    /// Delete the record whose key is carried by `record`
    pub fn delete(&self, scope: &Scope, record: &Record) -> RecordResult<usize> {
        validate_key_part("owner", &record.owner)?;
        validate_key_part("name", &record.name)?;
        let key = record.key();

        let visible = self
            .store
            .get_by_key(&key)?
            .is_some_and(|r| scope.permits(&r.organization));
        if !visible {
            tracing::debug!(event = "RECORD_DELETE_NOOP", id = %key, scope = %scope);
            return Ok(0);
        }

        let affected = self.store.delete(&key)?;
        tracing::info!(event = "RECORD_DELETED", id = %key, scope = %scope, affected);
        Ok(affected)
    }
}

fn validate_key_part(part: &str, value: &str) -> RecordResult<()> {
    if value.is_empty() {
        return Err(RecordError::invalid(format!("record {} must not be empty", part)));
    }
    if value.contains('/') {
        return Err(RecordError::invalid(format!(
            "record {} must not contain '/': {:?}",
            part, value
        )));
    }
    Ok(())
}

fn inherit(field: &str, submitted: &mut String, stored: &str) -> RecordResult<()> {
    if submitted.is_empty() {
        *submitted = stored.to_string();
        Ok(())
    } else if submitted == stored {
        Ok(())
    } else {
        Err(RecordError::invalid(format!(
            "{} is immutable: {:?} cannot become {:?}",
            field, stored, submitted
        )))
    }
}
