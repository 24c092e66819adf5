//! Sparse filter template

use serde::{Deserialize, Serialize};

use super::field::RecordField;

/// A record-shaped filter where each field is either present (an equality
/// constraint) or absent. Present-but-empty values impose no constraint.
///
/// Deserializes from the same camelCase JSON as [`super::Record`], so a
/// caller can submit a partial record as a query-by-example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordTemplate {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub created_time: Option<String>,
    pub organization: Option<String>,
    pub client_ip: Option<String>,
    pub user: Option<String>,
    pub method: Option<String>,
    pub request_uri: Option<String>,
    pub action: Option<String>,
    pub language: Option<String>,
    pub object: Option<String>,
    pub response: Option<String>,
    pub provider: Option<String>,
    pub block: Option<String>,
    pub status: Option<String>,
}

impl RecordTemplate {
    /// Template constraining only the organization
    pub fn for_organization(organization: impl Into<String>) -> Self {
        Self {
            organization: Some(organization.into()),
            ..Default::default()
        }
    }

    /// Set (or overwrite) one constraint
    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        *self.slot(field) = Some(value.into());
        self
    }

    /// Raw slot value, including present-but-empty
    pub fn get(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Owner => self.owner.as_deref(),
            RecordField::Name => self.name.as_deref(),
            RecordField::CreatedTime => self.created_time.as_deref(),
            RecordField::Organization => self.organization.as_deref(),
            RecordField::ClientIp => self.client_ip.as_deref(),
            RecordField::User => self.user.as_deref(),
            RecordField::Method => self.method.as_deref(),
            RecordField::RequestUri => self.request_uri.as_deref(),
            RecordField::Action => self.action.as_deref(),
            RecordField::Language => self.language.as_deref(),
            RecordField::Object => self.object.as_deref(),
            RecordField::Response => self.response.as_deref(),
            RecordField::Provider => self.provider.as_deref(),
            RecordField::Block => self.block.as_deref(),
            RecordField::Status => self.status.as_deref(),
        }
    }

    /// Non-empty constraints, in field declaration order
    pub fn constraints(&self) -> Vec<(RecordField, &str)> {
        RecordField::ALL
            .iter()
            .filter_map(|&field| match self.get(field) {
                Some(value) if !value.is_empty() => Some((field, value)),
                _ => None,
            })
            .collect()
    }

    fn slot(&mut self, field: RecordField) -> &mut Option<String> {
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
    fn test_empty_values_are_not_constraints() {
        let template: RecordTemplate = serde_json::from_value(json!({
            "organization": "A",
            "user": "",
            "action": "login"
        }))
        .unwrap();

        assert_eq!(
            template.constraints(),
            vec![(RecordField::Organization, "A"), (RecordField::Action, "login")]
        );
    }

    #[test]
    fn test_default_template_has_no_constraints() {
        assert!(RecordTemplate::default().constraints().is_empty());
        assert_eq!(
            RecordTemplate::for_organization("A").constraints(),
            vec![(RecordField::Organization, "A")]
        );
    }
}
