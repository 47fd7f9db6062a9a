use crate::domain::{PriceRange, SearchFilter, TransactionMode};
use crate::remote::{CatalogClient, StopReason};
use crate::tests::utils::{
    page_of, query_value, raw_record, search_page, server_error, test_endpoints, MockTransport,
};
use serde_json::json;

fn filter() -> SearchFilter {
    SearchFilter::new("MLA1472", TransactionMode::Buying)
        .with_location("TUxBUENBUGw3M2E1", Some("TUxBQ0NBUGZlZG1sYQ".to_string()))
}

fn client(transport: &MockTransport, max_pages: usize) -> CatalogClient<&MockTransport> {
    CatalogClient::new(transport, test_endpoints(), 50, max_pages)
}

#[test]
fn paginates_until_short_page() {
    let transport = MockTransport::new(vec![
        page_of(50, 0, Some(137)),
        page_of(50, 50, Some(137)),
        page_of(37, 100, Some(137)),
    ]);

    let outcome = client(&transport, 200).fetch_listings(&filter());

    assert_eq!(outcome.records.len(), 137);
    assert_eq!(transport.call_count(), 3);
    assert_eq!(outcome.pages, 3);
    assert_eq!(outcome.reported_total, Some(137));
    assert_eq!(outcome.stop_reason, StopReason::ShortPage);
}

#[test]
fn offsets_advance_by_page_size() {
    let transport = MockTransport::new(vec![page_of(50, 0, None), page_of(50, 50, None), page_of(0, 100, None)]);

    client(&transport, 200).fetch_listings(&filter());

    let offsets: Vec<_> = transport
        .calls()
        .iter()
        .map(|url| query_value(url, "offset").unwrap())
        .collect();
    assert_eq!(offsets, vec!["0", "50", "100"]);
    assert!(transport
        .calls()
        .iter()
        .all(|url| query_value(url, "limit").as_deref() == Some("50")));
}

#[test]
fn failure_after_first_page_returns_partial_results() {
    let transport = MockTransport::new(vec![page_of(50, 0, Some(500)), server_error()]);

    let outcome = client(&transport, 200).fetch_listings(&filter());

    assert_eq!(outcome.records.len(), 50);
    assert_eq!(transport.call_count(), 2);
    assert_eq!(outcome.stop_reason, StopReason::Failed);
}

#[test]
fn failure_on_first_page_returns_nothing() {
    let transport = MockTransport::new(vec![server_error()]);

    let outcome = client(&transport, 200).fetch_listings(&filter());

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.stop_reason, StopReason::Failed);
}

#[test]
fn stops_once_reported_total_is_read() {
    let transport = MockTransport::new(vec![page_of(50, 0, Some(100)), page_of(50, 50, Some(100))]);

    let outcome = client(&transport, 200).fetch_listings(&filter());

    assert_eq!(outcome.records.len(), 100);
    assert_eq!(transport.call_count(), 2);
    assert_eq!(outcome.stop_reason, StopReason::ReachedTotal);
}

#[test]
fn page_ceiling_bounds_the_loop() {
    let pages = (0..10).map(|i| page_of(50, i * 50, None)).collect();
    let transport = MockTransport::new(pages);

    let outcome = client(&transport, 3).fetch_listings(&filter());

    assert_eq!(transport.call_count(), 3);
    assert_eq!(outcome.records.len(), 150);
    assert_eq!(outcome.stop_reason, StopReason::PageLimit);
}

#[test]
fn search_url_carries_every_filter() {
    let transport = MockTransport::new(vec![page_of(1, 0, Some(1))]);
    let filter = filter().with_price(Some(PriceRange::new(100000, 250000)));

    client(&transport, 200).fetch_listings(&filter);

    let url = &transport.calls()[0];
    assert_eq!(url.path(), "/sites/MLA/search");
    assert_eq!(query_value(url, "category").as_deref(), Some("MLA1472"));
    assert_eq!(query_value(url, "buying_mode").as_deref(), Some("buying"));
    assert_eq!(query_value(url, "state").as_deref(), Some("TUxBUENBUGw3M2E1"));
    assert_eq!(query_value(url, "city").as_deref(), Some("TUxBQ0NBUGZlZG1sYQ"));
    assert_eq!(query_value(url, "price").as_deref(), Some("100000-250000"));
}

#[test]
fn partial_price_bound_is_not_sent() {
    let transport = MockTransport::new(vec![page_of(1, 0, Some(1))]);
    let filter = SearchFilter::new("MLA1466", TransactionMode::Rental)
        .with_price(PriceRange::from_bounds(Some(1000), None));

    client(&transport, 200).fetch_listings(&filter);

    let url = &transport.calls()[0];
    assert_eq!(query_value(url, "buying_mode").as_deref(), Some("rental"));
    assert!(query_value(url, "price").is_none());
    assert!(query_value(url, "state").is_none());
}

#[test]
fn undecodable_record_is_skipped_but_page_counts_as_full() {
    let mut records: Vec<_> = (0..49)
        .map(|i| raw_record(&format!("MLA{i}"), Some((-34.6, -58.4))))
        .collect();
    records.push(json!({ "id": "BROKEN", "price": "not a number" }));
    let transport = MockTransport::new(vec![
        Ok(search_page(records, None)),
        page_of(3, 100, None),
    ]);

    let outcome = client(&transport, 200).fetch_listings(&filter());

    assert_eq!(transport.call_count(), 2);
    assert_eq!(outcome.records.len(), 52);
    assert!(outcome.records.iter().all(|r| r.id.as_deref() != Some("BROKEN")));
}

#[test]
fn preview_reads_only_first_page() {
    let transport = MockTransport::new(vec![page_of(50, 0, Some(1234))]);

    let preview = client(&transport, 200)
        .preview(&filter(), 5)
        .expect("preview page");

    assert_eq!(preview.total, Some(1234));
    assert_eq!(preview.sample.len(), 5);
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn preview_failure_is_none() {
    let transport = MockTransport::new(vec![server_error()]);
    assert!(client(&transport, 200).preview(&filter(), 5).is_none());
}
