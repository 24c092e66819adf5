//! # Filter Evaluator
//!
//! Turns a sparse [`RecordTemplate`] plus an optional `(field, value)`
//! override into an equality predicate over records.

use crate::errors::RecordResult;
use crate::record::{Record, RecordField, RecordTemplate};

/// Exact-match override on a single named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: RecordField,
    pub value: String,
}

impl FieldMatch {
    pub fn new(field: RecordField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Build from raw query parameters.
    ///
    /// Returns `None` unless both parts are non-empty. An unknown field name
    /// is an `InvalidParameter` error.
    pub fn parse(field: &str, value: &str) -> RecordResult<Option<Self>> {
        if field.is_empty() || value.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::new(field.parse()?, value)))
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.get(self.field) == self.value
    }
}

/// Conjunction of template equality constraints and an optional override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    constraints: Vec<(RecordField, String)>,
    field_match: Option<FieldMatch>,
}

impl RecordFilter {
    /// Filter from a template; empty template fields are ignored
    pub fn new(template: &RecordTemplate) -> Self {
        Self {
            constraints: template
                .constraints()
                .into_iter()
                .map(|(field, value)| (field, value.to_string()))
                .collect(),
            field_match: None,
        }
    }

    pub fn with_field_match(mut self, field_match: Option<FieldMatch>) -> Self {
        self.field_match = field_match;
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.constraints
            .iter()
            .all(|(field, value)| record.get(*field) == value)
            && self.field_match.as_ref().map_or(true, |m| m.matches(record))
    }

    /// Lazily yield the matching records, preserving input order
    pub fn apply<'a, I>(&'a self, records: I) -> impl Iterator<Item = &'a Record> + 'a
    where
        I: IntoIterator<Item = &'a Record>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |r| self.matches(r))
    }
}
