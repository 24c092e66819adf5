//! recordtrail - a queryable, scoped audit-record trail
//!
//! Record query and mutation engine with a thin HTTP surface:
//! filter / sort / paginate reads, keyed add / update / delete writes, and
//! per-organization scoping of both.

pub mod cli;
pub mod envelope;
pub mod errors;
pub mod http_server;
pub mod mutation;
pub mod observability;
pub mod query;
pub mod record;
pub mod scope;
pub mod store;

pub use envelope::{Envelope, Status};
pub use errors::{RecordError, RecordResult};
pub use mutation::MutationEngine;
pub use query::{ListRequest, Listing, Page, PageQuery, QueryEngine};
pub use record::{Record, RecordField, RecordKey, RecordTemplate};
pub use scope::{CallerContext, Privilege, Scope, ScopeGuard};
pub use store::{FileRecordStore, MemoryRecordStore, RecordStore, StoreError};
