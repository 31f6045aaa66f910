//! Integration tests for the HTTP candle source
//!
//! Runs `HttpCandleSource` against a local mock server.

mod common;

use std::time::Duration;

use candles::{CandleSource, FeedError, HttpCandleSource};
use common::{unreachable_base_url, MockFeedServer, MockResponse, SAMPLE_FEED};

#[tokio::test]
async fn test_fetch_parses_feed() {
    let server = MockFeedServer::start(MockResponse::json(SAMPLE_FEED)).await;
    let source = HttpCandleSource::new(&server.base_url(), None).unwrap();

    let candles = source.fetch_candles().await.unwrap();

    verbose_println!("Fetched {} candles", candles.len());
    assert_eq!(candles.len(), 3);
    assert_eq!(candles[0].market_key(), "KRW-BTC");
    assert_eq!(candles[2].open.to_string(), "3000.5");
    assert_eq!(candles[2].source.to_string(), "Upbit");

    server.stop();
}

#[tokio::test]
async fn test_requests_fixed_path() {
    let server = MockFeedServer::start(MockResponse::json("[]")).await;
    let source = HttpCandleSource::new(&format!("{}/", server.base_url()), None).unwrap();

    source.fetch_candles().await.unwrap();
    source.fetch_candles().await.unwrap();

    let lines = server.request_lines();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert_eq!(line, "GET /api/data HTTP/1.1");
    }

    server.stop();
}

#[tokio::test]
async fn test_empty_array_is_success() {
    let server = MockFeedServer::start(MockResponse::json("[]")).await;
    let source = HttpCandleSource::new(&server.base_url(), None).unwrap();

    assert!(source.fetch_candles().await.unwrap().is_empty());

    server.stop();
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockFeedServer::start(MockResponse::json("not json at all")).await;
    let source = HttpCandleSource::new(&server.base_url(), None).unwrap();

    let err = source.fetch_candles().await.unwrap_err();

    assert!(matches!(err, FeedError::DeserializeFailed(_)), "got {:?}", err);
    server.stop();
}

#[tokio::test]
async fn test_object_body_is_decode_error() {
    let server =
        MockFeedServer::start(MockResponse::json(r#"{"status":"error","message":"No data"}"#)).await;
    let source = HttpCandleSource::new(&server.base_url(), None).unwrap();

    let err = source.fetch_candles().await.unwrap_err();

    assert!(matches!(err, FeedError::DeserializeFailed(_)));
    server.stop();
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockFeedServer::start(MockResponse::status(500, r#"{"status":"error"}"#)).await;
    let source = HttpCandleSource::new(&server.base_url(), None).unwrap();

    let err = source.fetch_candles().await.unwrap_err();

    match err {
        FeedError::BadStatus(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected BadStatus, got {:?}", other),
    }
    server.stop();
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let source =
        HttpCandleSource::new(&unreachable_base_url(), Some(Duration::from_secs(5))).unwrap();

    let err = source.fetch_candles().await.unwrap_err();

    assert!(matches!(err, FeedError::RequestFailed(_)), "got {:?}", err);
}
