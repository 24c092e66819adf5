//! Addressable record fields

use std::fmt;
use std::str::FromStr;

use crate::errors::RecordError;

/// Every field a filter override or sort directive may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Owner,
    Name,
    CreatedTime,
    Organization,
    ClientIp,
    User,
    Method,
    RequestUri,
    Action,
    Language,
    Object,
    Response,
    Provider,
    Block,
    Status,
}

impl RecordField {
    /// All fields in declaration order
    pub const ALL: [RecordField; 15] = [
        RecordField::Owner,
        RecordField::Name,
        RecordField::CreatedTime,
        RecordField::Organization,
        RecordField::ClientIp,
        RecordField::User,
        RecordField::Method,
        RecordField::RequestUri,
        RecordField::Action,
        RecordField::Language,
        RecordField::Object,
        RecordField::Response,
        RecordField::Provider,
        RecordField::Block,
        RecordField::Status,
    ];

    /// Column (snake_case) name
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Owner => "owner",
            RecordField::Name => "name",
            RecordField::CreatedTime => "created_time",
            RecordField::Organization => "organization",
            RecordField::ClientIp => "client_ip",
            RecordField::User => "user",
            RecordField::Method => "method",
            RecordField::RequestUri => "request_uri",
            RecordField::Action => "action",
            RecordField::Language => "language",
            RecordField::Object => "object",
            RecordField::Response => "response",
            RecordField::Provider => "provider",
            RecordField::Block => "block",
            RecordField::Status => "status",
        }
    }

    /// JSON (camelCase) name
    pub fn json_name(&self) -> &'static str {
        match self {
            RecordField::CreatedTime => "createdTime",
            RecordField::ClientIp => "clientIp",
            RecordField::RequestUri => "requestUri",
            other => other.as_str(),
        }
    }
}

impl FromStr for RecordField {
    type Err = RecordError;

    /// Case-sensitive; accepts either the column or the JSON name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s || f.json_name() == s)
            .ok_or_else(|| RecordError::invalid(format!("unknown record field: {}", s)))
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
