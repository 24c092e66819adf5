//! Query Pagination Tests
//!
//! Read-path guarantees of the query engine:
//! - offset = (page - 1) * pageSize, and a page past the end is empty
//! - total pages are computed over the full filtered set
//! - filtering is idempotent
//! - sorting is stable across repeated queries

use std::sync::Arc;

use recordtrail::query::{FieldMatch, Paginator, SortSpec};
use recordtrail::{
    CallerContext, ListRequest, Listing, MemoryRecordStore, PageQuery, QueryEngine, Record,
    RecordField, Scope,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn record(org: &str, i: usize) -> Record {
    Record::new("alice", format!("{}-{:02}", org, i), org)
        .with(RecordField::CreatedTime, format!("2024-01-01T00:00:{:02}Z", i))
        .with(RecordField::Action, if i % 2 == 0 { "login" } else { "logout" })
        .with(RecordField::User, if i % 3 == 0 { "bob" } else { "amy" })
}

fn engine(orgs: &[(&str, usize)]) -> QueryEngine {
    let records = orgs
        .iter()
        .flat_map(|(org, n)| (1..=*n).map(move |i| record(org, i)))
        .collect::<Vec<_>>();
    QueryEngine::new(Arc::new(MemoryRecordStore::with_records(records).unwrap()))
}

fn org(name: &str) -> Scope {
    Scope::Organization(name.to_string())
}

fn names(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

// =============================================================================
// Pagination Window Tests
// =============================================================================

/// 25 records in "A", pageSize=10, page=2 returns records 11-20 of 3 pages.
#[test]
fn test_second_page_of_twenty_five() {
    let engine = engine(&[("A", 25), ("B", 7)]);
    let caller = CallerContext::admin("carol", "A");
    let request = ListRequest::Paged(PageQuery::new(Paginator::new(10, 2).unwrap()));

    let Listing::Page(page) = engine.list(&caller, &request).unwrap() else {
        panic!("expected a page");
    };

    assert_eq!(page.total_pages, 3);
    let expected: Vec<_> = (11..=20).map(|i| format!("A-{:02}", i)).collect();
    assert_eq!(names(&page.records), expected);
}

/// Every page follows the offset law; pages past the end are empty.
#[test]
fn test_offset_law_over_all_pages() {
    let engine = engine(&[("A", 23)]);
    let all = engine.list_all(&org("A")).unwrap();

    for page_size in [1i64, 4, 10, 23, 50] {
        for page in 1..=30i64 {
            let paginator = Paginator::new(page_size, page).unwrap();
            let result = engine
                .query_page(&org("A"), &PageQuery::new(paginator))
                .unwrap();

            let offset = ((page - 1) * page_size) as usize;
            assert_eq!(paginator.offset(), offset);
            if offset >= all.len() {
                assert!(result.records.is_empty());
            } else {
                let end = (offset + page_size as usize).min(all.len());
                assert_eq!(result.records, all[offset..end].to_vec());
            }
        }
    }
}

/// The total reflects the override filter, not the page length.
#[test]
fn test_total_pages_counts_filtered_set() {
    let engine = engine(&[("A", 25)]);
    let query = PageQuery::new(Paginator::new(5, 1).unwrap())
        .with_field_match(FieldMatch::new(RecordField::Action, "login"));

    let page = engine.query_page(&org("A"), &query).unwrap();

    assert_eq!(page.total_count, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.records.len(), 5);
    assert!(page.records.iter().all(|r| r.action == "login"));
}

/// Empty organizations report zero pages.
#[test]
fn test_empty_scope_has_zero_pages() {
    let engine = engine(&[("A", 3)]);
    let page = engine
        .query_page(&org("Z"), &PageQuery::new(Paginator::new(10, 1).unwrap()))
        .unwrap();

    assert_eq!(page.total_pages, 0);
    assert!(page.records.is_empty());
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same filter against an unchanged store yields identical results.
#[test]
fn test_filtering_is_idempotent() {
    let engine = engine(&[("A", 25), ("B", 10)]);
    let query = PageQuery::new(Paginator::new(7, 2).unwrap())
        .with_field_match(FieldMatch::new(RecordField::User, "amy"));

    let first = engine.query_page(&org("A"), &query).unwrap();
    for _ in 0..50 {
        assert_eq!(engine.query_page(&org("A"), &query).unwrap(), first);
    }
}

/// Equal sort keys keep natural order, page after page.
#[test]
fn test_sort_is_stable_across_pages() {
    let engine = engine(&[("A", 25)]);
    let sort = SortSpec::desc(RecordField::User);

    let mut collected = Vec::new();
    for p in 1..=3 {
        let query = PageQuery::new(Paginator::new(10, p).unwrap()).with_sort(sort);
        collected.extend(engine.query_page(&org("A"), &query).unwrap().records);
    }

    let bobs: Vec<_> = collected.iter().filter(|r| r.user == "bob").collect();
    let amys: Vec<_> = collected.iter().filter(|r| r.user == "amy").collect();
    assert_eq!(bobs.len() + amys.len(), 25);
    // "bob" > "amy", so descending puts every bob first
    assert!(collected[..bobs.len()].iter().all(|r| r.user == "bob"));
    for group in [bobs, amys] {
        let group_names: Vec<_> = group.iter().map(|r| r.name.clone()).collect();
        let mut sorted = group_names.clone();
        sorted.sort();
        assert_eq!(group_names, sorted);
    }
}

/// Unsorted pages follow insertion order.
#[test]
fn test_natural_order_without_sort_field() {
    let engine = engine(&[("A", 4)]);
    let page = engine
        .query_page(&org("A"), &PageQuery::new(Paginator::new(10, 1).unwrap()))
        .unwrap();

    assert_eq!(names(&page.records), vec!["A-01", "A-02", "A-03", "A-04"]);
}
