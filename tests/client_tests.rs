//! Tests for the geocoding client against a mock transport.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use geocode_client::mocks::{fixtures, MockResponse, MockTransport};
use geocode_client::{ApiStatus, GeocodeClient, GeocodeError, GeocodeRecord};

fn client_with(transport: Arc<MockTransport>) -> GeocodeClient {
    GeocodeClient::builder()
        .api_key("test_api_key")
        .show_progress(false)
        .transport(transport)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_geocode_returns_coordinate() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_json(&fixtures::resolved(37.566535, 126.9779692));
    let client = client_with(Arc::clone(&transport));

    let coordinate = client.geocode("Seoul").await.unwrap();

    assert_eq!(coordinate.lat, 37.566535);
    assert_eq!(coordinate.lng, 126.9779692);

    let request = transport.last_request().unwrap();
    assert_eq!(request.path, "json");
    assert_eq!(request.query_value("address"), Some("Seoul"));
    assert_eq!(request.query_value("key"), Some("test_api_key"));
}

#[tokio::test]
async fn test_repeated_lookup_is_served_from_cache() {
    let transport = Arc::new(MockTransport::new());
    transport.set_default(MockResponse::json(&fixtures::resolved(37.5, 127.0)));
    let client = client_with(Arc::clone(&transport));

    let first = client.geocode("Seoul").await.unwrap();
    let second = client.geocode("Seoul").await.unwrap();

    assert_eq!(first, second);
    // The second call must not reach the transport.
    assert_eq!(transport.request_count(), 1);

    let info = client.cache_info().await;
    assert_eq!(info.hits, 1);
    assert_eq!(info.misses, 1);
    assert_eq!(info.current_size, 1);
}

#[tokio::test]
async fn test_addresses_are_cached_verbatim() {
    let transport = Arc::new(MockTransport::new());
    transport.set_default(MockResponse::json(&fixtures::resolved(37.5, 127.0)));
    let client = client_with(Arc::clone(&transport));

    client.geocode("Seoul").await.unwrap();
    client.geocode("seoul").await.unwrap();
    client.geocode("Seoul ").await.unwrap();

    // Case and whitespace variants are distinct cache entries.
    assert_eq!(transport.request_count(), 3);
    assert_eq!(client.cache_info().await.current_size, 3);
}

#[tokio::test]
async fn test_remote_error_status_maps_to_api_error() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_json(&fixtures::status("OVER_QUERY_LIMIT"));
    let client = client_with(transport);

    let error = client.geocode("Seoul").await.unwrap_err();
    assert_eq!(error.status(), Some(&ApiStatus::OverQueryLimit));
}

#[tokio::test]
async fn test_unrecognized_status_passes_through() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_json(&fixtures::status("BRAND_NEW_STATUS"));
    let client = client_with(transport);

    let error = client.geocode("Seoul").await.unwrap_err();
    assert_eq!(
        error.status(),
        Some(&ApiStatus::Other("BRAND_NEW_STATUS".to_string()))
    );
    assert_eq!(error.category(), "BRAND_NEW_STATUS");
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let transport = Arc::new(MockTransport::new());
    transport.set_default(MockResponse::json(&fixtures::status("ZERO_RESULTS")));
    let client = client_with(Arc::clone(&transport));

    assert!(client.geocode("nowhere").await.is_err());
    assert!(client.geocode("nowhere").await.is_err());

    // Both calls reach the transport; the cache stays empty.
    assert_eq!(transport.request_count(), 2);

    let info = client.cache_info().await;
    assert_eq!(info.hits, 0);
    assert_eq!(info.misses, 2);
    assert_eq!(info.current_size, 0);
}

#[tokio::test]
async fn test_empty_address_is_rejected_without_remote_call() {
    let transport = Arc::new(MockTransport::new());
    let client = client_with(Arc::clone(&transport));

    let error = client.geocode("").await.unwrap_err();
    assert!(matches!(error, GeocodeError::Validation { .. }));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_http_error_maps_to_network_error() {
    let transport = Arc::new(MockTransport::new());
    transport.queue(MockResponse::error(503, "unavailable"));
    let client = client_with(transport);

    let error = client.geocode("Seoul").await.unwrap_err();
    assert!(matches!(error, GeocodeError::Network { .. }));
}

#[tokio::test]
async fn test_ok_status_without_results_is_an_error() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_json(&fixtures::status("OK"));
    let client = client_with(transport);

    let error = client.geocode("Seoul").await.unwrap_err();
    assert!(matches!(error, GeocodeError::Serialization { .. }));
}

#[tokio::test]
async fn test_batch_preserves_order_with_partial_failure() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_json(&fixtures::resolved(37.566535, 126.9779692));
    transport.queue_json(&fixtures::status("ZERO_RESULTS"));
    transport.queue_json(&fixtures::resolved(35.1795543, 129.0756416));
    let client = client_with(Arc::clone(&transport));

    let records = client
        .geocode_list(&["Seoul", "???invalid???", "Busan"])
        .await;

    assert_eq!(
        records,
        vec![
            GeocodeRecord {
                addr: "Seoul".to_string(),
                lat: Some(37.566535),
                lng: Some(126.9779692),
            },
            GeocodeRecord {
                addr: "???invalid???".to_string(),
                lat: None,
                lng: None,
            },
            GeocodeRecord {
                addr: "Busan".to_string(),
                lat: Some(35.1795543),
                lng: Some(129.0756416),
            },
        ]
    );
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_batch_empty_input_makes_no_calls() {
    let transport = Arc::new(MockTransport::new());
    let client = client_with(Arc::clone(&transport));

    let addresses: Vec<String> = Vec::new();
    let records = client.geocode_list(&addresses).await;

    assert!(records.is_empty());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_batch_reuses_cache_for_duplicate_addresses() {
    let transport = Arc::new(MockTransport::new());
    transport.set_default(MockResponse::json(&fixtures::resolved(37.5, 127.0)));
    let client = client_with(Arc::clone(&transport));

    let records = client.geocode_list(&["Seoul", "Seoul", "Seoul"]).await;

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(GeocodeRecord::is_resolved));
    assert_eq!(transport.request_count(), 1);

    let info = client.cache_info().await;
    assert_eq!(info.hits, 2);
    assert_eq!(info.misses, 1);
}

#[tokio::test]
async fn test_batch_never_propagates_individual_failures() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_json(&fixtures::status("REQUEST_DENIED"));
    transport.queue(MockResponse::error(500, "boom"));
    transport.queue_json(&fixtures::resolved(1.0, 2.0));
    let client = client_with(Arc::clone(&transport));

    let records = client.geocode_list(&["a", "b", "c"]).await;

    assert_eq!(records.len(), 3);
    assert!(!records[0].is_resolved());
    assert!(!records[1].is_resolved());
    assert!(records[2].is_resolved());
}

#[tokio::test]
async fn test_language_and_region_are_forwarded() {
    let transport = Arc::new(MockTransport::new());
    transport.queue_json(&fixtures::resolved(37.5, 127.0));
    let client = GeocodeClient::builder()
        .api_key("test_api_key")
        .show_progress(false)
        .language("ko")
        .region("kr")
        .transport(transport.clone())
        .build()
        .unwrap();

    client.geocode("Seoul").await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.query_value("language"), Some("ko"));
    assert_eq!(request.query_value("region"), Some("kr"));
}
