//! # Query Engine
//!
//! Combines the filter evaluator, paginator and sort directives into the
//! read paths over a [`RecordStore`].

use std::sync::Arc;

use super::filter::RecordFilter;
use super::params::{ListRequest, PageQuery};
use crate::errors::{RecordError, RecordResult};
use crate::record::{Record, RecordKey, RecordTemplate};
use crate::scope::{CallerContext, Scope, ScopeGuard};
use crate::store::RecordStore;

/// One page of records and the page count of the full result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<Record>,
    pub total_pages: u64,
    pub total_count: usize,
}

/// Outcome of a list request in either mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    All(Vec<Record>),
    Page(Page),
}

/// Read-side engine. Holds no per-call state; clone freely.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn RecordStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Dispatch a parsed list request for `caller`
    pub fn list(&self, caller: &CallerContext, request: &ListRequest) -> RecordResult<Listing> {
        match request {
            ListRequest::Unbounded => {
                let scope = ScopeGuard::visibility(caller);
                self.list_all(&scope).map(Listing::All)
            }
            ListRequest::Paged(query) => {
                let scope =
                    ScopeGuard::resolve_query_scope(caller, query.organization_name.as_deref());
                self.query_page(&scope, query).map(Listing::Page)
            }
        }
    }

    /// Unbounded mode: every record in scope, natural order, no filter
    pub fn list_all(&self, scope: &Scope) -> RecordResult<Vec<Record>> {
        let records = match scope {
            Scope::Global => self.store.get_all()?,
            Scope::Organization(_) => self
                .store
                .find_matching(&RecordFilter::new(&scope.template()))?,
        };

        tracing::debug!(
            event = "RECORDS_DUMPED",
            scope = %scope,
            count = records.len()
        );
        Ok(records)
    }

    /// Paged mode against an already-resolved scope.
    ///
    /// The total is counted over the full filtered set before slicing. Count
    /// and fetch are separate store calls, so a concurrent write may leave
    /// `total_pages` one step behind the returned page.
    pub fn query_page(&self, scope: &Scope, query: &PageQuery) -> RecordResult<Page> {
        let filter = RecordFilter::new(&scope.template()).with_field_match(query.field_match.clone());

        let total_count = self.store.count_matching(&filter)?;
        let paginator = query.paginator;
        let records = self
            .store
            .fetch_page(&filter, paginator.window(), query.sort.as_ref())?;
        let total_pages = paginator.total_pages(total_count);

        tracing::debug!(
            event = "RECORDS_PAGED",
            scope = %scope,
            page = paginator.page(),
            page_size = paginator.page_size(),
            returned = records.len(),
            total_count,
            total_pages
        );

        Ok(Page {
            records,
            total_pages,
            total_count,
        })
    }

    /// Raw key lookup; performs no scope filtering
    pub fn get(&self, key: &RecordKey) -> RecordResult<Record> {
        self.store
            .get_by_key(key)?
            .ok_or_else(|| RecordError::NotFound(key.to_string()))
    }

    /// Query-by-example over every record in scope.
    ///
    /// For an organization scope the template's organization is overwritten
    /// with the scope's, so a caller cannot widen its own visibility.
    pub fn find_by_example(
        &self,
        scope: &Scope,
        template: &RecordTemplate,
    ) -> RecordResult<Vec<Record>> {
        let template = match scope.organization() {
            Some(org) => RecordTemplate {
                organization: Some(org.to_string()),
                ..template.clone()
            },
            None => template.clone(),
        };

        let records = self.store.find_matching(&RecordFilter::new(&template))?;
        tracing::debug!(
            event = "RECORDS_FILTERED",
            scope = %scope,
            constraints = template.constraints().len(),
            count = records.len()
        );
        Ok(records)
    }
}
