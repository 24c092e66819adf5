//! # Query Parameter Parser
//!
//! Parses read-path query parameters into a typed list request.

use std::collections::HashMap;

use super::filter::FieldMatch;
use super::paginator::Paginator;
use super::sorter::SortSpec;
use crate::errors::{RecordError, RecordResult};

pub const PAGE_SIZE: &str = "pageSize";
pub const PAGE: &str = "p";
pub const FIELD: &str = "field";
pub const VALUE: &str = "value";
pub const SORT_FIELD: &str = "sortField";
pub const SORT_ORDER: &str = "sortOrder";
pub const ORGANIZATION_NAME: &str = "organizationName";

/// Parsed list request; the presence of both pagination parameters selects
/// paged mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    /// Full dump of the caller's visible records
    Unbounded,
    /// One page of a filtered, sorted result set
    Paged(PageQuery),
}

/// Paged-mode parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub paginator: Paginator,
    pub field_match: Option<FieldMatch>,
    pub sort: Option<SortSpec>,
    /// Scope override, honored for global admins only
    pub organization_name: Option<String>,
}

impl PageQuery {
    pub fn new(paginator: Paginator) -> Self {
        Self {
            paginator,
            field_match: None,
            sort: None,
            organization_name: None,
        }
    }

    pub fn with_field_match(mut self, field_match: FieldMatch) -> Self {
        self.field_match = Some(field_match);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization_name = Some(organization.into());
        self
    }
}

impl ListRequest {
    /// Parse query parameters from a HashMap
    pub fn parse(params: &HashMap<String, String>) -> RecordResult<Self> {
        let get = |key: &str| params.get(key).map(String::as_str).unwrap_or("");

        let (page_size, page) = (get(PAGE_SIZE), get(PAGE));
        if page_size.is_empty() || page.is_empty() {
            return Ok(ListRequest::Unbounded);
        }

        let paginator = Paginator::new(parse_int(PAGE_SIZE, page_size)?, parse_int(PAGE, page)?)?;
        let organization_name = Some(get(ORGANIZATION_NAME))
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(ListRequest::Paged(PageQuery {
            paginator,
            field_match: FieldMatch::parse(get(FIELD), get(VALUE))?,
            sort: SortSpec::parse(get(SORT_FIELD), get(SORT_ORDER))?,
            organization_name,
        }))
    }
}

fn parse_int(name: &str, value: &str) -> RecordResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::invalid(format!("{} must be an integer, got {:?}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordField;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_pagination_is_unbounded() {
        assert_eq!(ListRequest::parse(&params(&[])).unwrap(), ListRequest::Unbounded);
        assert_eq!(
            ListRequest::parse(&params(&[("pageSize", "10")])).unwrap(),
            ListRequest::Unbounded
        );
        assert_eq!(
            ListRequest::parse(&params(&[("p", "1"), ("pageSize", "")])).unwrap(),
            ListRequest::Unbounded
        );
    }

    #[test]
    fn test_full_paged_request() {
        let request = ListRequest::parse(&params(&[
            ("pageSize", "10"),
            ("p", "2"),
            ("field", "action"),
            ("value", "login"),
            ("sortField", "createdTime"),
            ("sortOrder", "descend"),
            ("organizationName", "A"),
        ]))
        .unwrap();

        let ListRequest::Paged(query) = request else {
            panic!("expected paged request");
        };
        assert_eq!(query.paginator.offset(), 10);
        assert_eq!(query.field_match, Some(FieldMatch::new(RecordField::Action, "login")));
        assert_eq!(query.sort, Some(SortSpec::desc(RecordField::CreatedTime)));
        assert_eq!(query.organization_name.as_deref(), Some("A"));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        for (size, page) in [("ten", "1"), ("10", "x"), ("0", "1"), ("-3", "1"), ("10", "0")] {
            let result = ListRequest::parse(&params(&[("pageSize", size), ("p", page)]));
            assert!(
                matches!(result, Err(RecordError::InvalidParameter(_))),
                "accepted pageSize={} p={}",
                size,
                page
            );
        }
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let result = ListRequest::parse(&params(&[
            ("pageSize", "10"),
            ("p", "1"),
            ("sortField", "secret"),
        ]));
        assert!(result.is_err());
    }
}
