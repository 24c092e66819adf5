//! Result sorting for record queries
//!
//! Sorts by a single named field. The sort is stable, so records with equal
//! keys keep their natural (store) order.

use std::cmp::Ordering;

use crate::errors::{RecordError, RecordResult};
use crate::record::{Record, RecordField};

/// Sort direction, spelled the way clients send it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascend,
    Descend,
}

impl SortOrder {
    /// Empty input means ascending
    pub fn parse(value: &str) -> RecordResult<Self> {
        match value {
            "" | "ascend" => Ok(SortOrder::Ascend),
            "descend" => Ok(SortOrder::Descend),
            other => Err(RecordError::invalid(format!(
                "sortOrder must be 'ascend' or 'descend', got {:?}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascend => "ascend",
            SortOrder::Descend => "descend",
        }
    }
}

/// Sort directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: RecordField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(field: RecordField) -> Self {
        Self {
            field,
            order: SortOrder::Ascend,
        }
    }

    pub fn desc(field: RecordField) -> Self {
        Self {
            field,
            order: SortOrder::Descend,
        }
    }

    /// `None` when no sort field was given; the order is then irrelevant
    /// and not validated.
    pub fn parse(sort_field: &str, sort_order: &str) -> RecordResult<Option<Self>> {
        if sort_field.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            field: sort_field.parse()?,
            order: SortOrder::parse(sort_order)?,
        }))
    }
}

/// Sorts records in place
pub struct RecordSorter;

impl RecordSorter {
    pub fn sort(records: &mut [Record], spec: &SortSpec) {
        records.sort_by(|a, b| Self::compare(a, b, spec));
    }

    fn compare(a: &Record, b: &Record, spec: &SortSpec) -> Ordering {
        let ordering = a.get(spec.field).cmp(b.get(spec.field));
        match spec.order {
            SortOrder::Ascend => ordering,
            SortOrder::Descend => ordering.reverse(),
        }
    }
}
