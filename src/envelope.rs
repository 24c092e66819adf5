//! # Response Envelope
//!
//! Uniform `{status, msg, data, total}` body returned by every read and
//! mutation.

use serde::{Deserialize, Serialize};

use crate::errors::RecordResult;

/// Envelope status marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,

    #[serde(default)]
    pub msg: String,

    pub data: Option<T>,

    /// Page count, present only on paginated reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::Ok,
            msg: String::new(),
            data: Some(data),
            total: None,
        }
    }

    pub fn paged(data: T, total_pages: u64) -> Self {
        Self {
            total: Some(total_pages),
            ..Self::ok(data)
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            msg: msg.into(),
            data: None,
            total: None,
        }
    }
}

impl Envelope<usize> {
    /// Wrap a mutation outcome (affected row count or failure)
    pub fn from_action(result: &RecordResult<usize>) -> Self {
        match result {
            Ok(affected) => Self::ok(*affected),
            Err(err) => Self::error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RecordError;
    use serde_json::json;

    #[test]
    fn test_paged_envelope_serialization() {
        let envelope = Envelope::paged(vec![json!({"name": "a"})], 3);

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["total"], 3);
        assert_eq!(json["data"][0]["name"], "a");
    }

    #[test]
    fn test_unpaged_envelope_omits_total() {
        let json = serde_json::to_value(Envelope::ok(1usize)).unwrap();
        assert!(json.get("total").is_none());
        assert_eq!(json["msg"], "");
    }

    #[test]
    fn test_action_envelope_error() {
        let result: RecordResult<usize> = Err(RecordError::Conflict("alice/x".to_string()));
        let envelope = Envelope::from_action(&result);

        assert_eq!(envelope.status, Status::Error);
        assert_eq!(envelope.data, None);
        assert!(envelope.msg.contains("alice/x"));
    }
}
