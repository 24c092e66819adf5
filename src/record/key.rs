//! Composite `owner/name` identity

use std::fmt;
use std::str::FromStr;

use crate::errors::RecordError;

/// The (owner, name) pair that uniquely identifies a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub owner: String,
    pub name: String,
}

impl RecordKey {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RecordKey {
    type Err = RecordError;

    /// Parse an `owner/name` id. Names may not contain further slashes.
    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match id.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(RecordKey::new(owner, name))
            }
            _ => Err(RecordError::invalid(format!(
                "id must have the form owner/name: {:?}",
                id
            ))),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
