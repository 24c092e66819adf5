//! Audit record entity

use serde::{Deserialize, Deserializer, Serialize};

use super::field::RecordField;
use super::key::RecordKey;

/// A single audit entry.
///
/// Identity is the (`owner`, `name`) pair; see [`RecordKey`]. All descriptive
/// fields are opaque strings as far as filtering and sorting are concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    #[serde(deserialize_with = "null_as_empty")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    /// RFC 3339 creation timestamp
    #[serde(deserialize_with = "null_as_empty")]
    pub created_time: String,
    /// Tenant the record belongs to; immutable after creation
    #[serde(deserialize_with = "null_as_empty")]
    pub organization: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub client_ip: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub user: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub method: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub request_uri: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub action: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub language: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub object: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub response: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub provider: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub block: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
}

/// JSON `null` reads as an empty value, like an absent field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Create a record with only its identity and organization set
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            organization: organization.into(),
            ..Default::default()
        }
    }

    /// Composite identity of this record
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.owner.clone(), self.name.clone())
    }

    /// Derived `owner/name` id
    pub fn id(&self) -> String {
        self.key().to_string()
    }

    /// Read a field by name
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Owner => &self.owner,
            RecordField::Name => &self.name,
            RecordField::CreatedTime => &self.created_time,
            RecordField::Organization => &self.organization,
            RecordField::ClientIp => &self.client_ip,
            RecordField::User => &self.user,
            RecordField::Method => &self.method,
            RecordField::RequestUri => &self.request_uri,
            RecordField::Action => &self.action,
            RecordField::Language => &self.language,
            RecordField::Object => &self.object,
            RecordField::Response => &self.response,
            RecordField::Provider => &self.provider,
            RecordField::Block => &self.block,
            RecordField::Status => &self.status,
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        *self.slot(field) = value.into();
        self
    }

    fn slot(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::Owner => &mut self.owner,
            RecordField::Name => &mut self.name,
            RecordField::CreatedTime => &mut self.created_time,
            RecordField::Organization => &mut self.organization,
            RecordField::ClientIp => &mut self.client_ip,
            RecordField::User => &mut self.user,
            RecordField::Method => &mut self.method,
            RecordField::RequestUri => &mut self.request_uri,
            RecordField::Action => &mut self.action,
            RecordField::Language => &mut self.language,
            RecordField::Object => &mut self.object,
            RecordField::Response => &mut self.response,
            RecordField::Provider => &mut self.provider,
            RecordField::Block => &mut self.block,
            RecordField::Status => &mut self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_is_owner_slash_name() {
        let record = Record::new("alice", "login-2024", "A");
        assert_eq!(record.id(), "alice/login-2024");
    }

    #[test]
    fn test_camel_case_round_trip_fields() {
        let record: Record = serde_json::from_value(json!({
            "owner": "alice",
            "name": "n1",
            "organization": "A",
            "clientIp": "10.0.0.1",
            "requestUri": "/api/login"
        }))
        .unwrap();

        assert_eq!(record.client_ip, "10.0.0.1");
        assert_eq!(record.get(RecordField::RequestUri), "/api/login");
        assert_eq!(record.status, "");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let record: Record = serde_json::from_value(json!({
            "owner": "alice",
            "name": "n1",
            "action": null,
            "clientIp": null
        }))
        .unwrap();

        assert_eq!(record.action, "");
        assert_eq!(record.client_ip, "");
        assert_eq!(record.organization, "");
    }

    #[test]
    fn test_with_sets_field() {
        let record = Record::new("a", "b", "A").with(RecordField::Action, "login");
        assert_eq!(record.action, "login");
    }
}
