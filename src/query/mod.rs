//! # Record Query
//!
//! Read paths: filter evaluation, pagination, sorting and the engine that
//! ties them together.

mod engine;
mod filter;
mod paginator;
pub mod params;
mod sorter;

pub use engine::{Listing, Page, QueryEngine};
pub use filter::{FieldMatch, RecordFilter};
pub use paginator::{PageWindow, Paginator};
pub use params::{ListRequest, PageQuery};
pub use sorter::{RecordSorter, SortOrder, SortSpec};
