use super::*;
use crate::client::HttpSourceClient;
use crate::test_helpers::{mount_page, test_config};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(uri: &str, kind: ObjectKind) -> Fetcher {
    let config = Arc::new(test_config(uri));
    let client = Arc::new(HttpSourceClient::new().unwrap());
    Fetcher::new(client, config, kind)
}

#[tokio::test]
async fn fetch_page_builds_url_and_applies_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(header("Accept", "application/json"))
        .and(query_param("per_page", "10"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let records = fetcher
        .fetch_page(1, None, &FetchOptions::new())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn fetch_page_floors_page_and_per_page_at_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("per_page", "1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let records = fetcher
        .fetch_page(0, Some(0), &FetchOptions::new())
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_page_keeps_a_caller_supplied_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut options = FetchOptions::new();
    options
        .headers
        .insert("Accept".to_string(), "application/vnd.api+json".to_string());

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    fetcher.fetch_page(1, None, &options).await.unwrap();
}

#[tokio::test]
async fn fetch_page_normalizes_ordering_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("orderby", "date"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut options = FetchOptions::new();
    options.query.insert("orderby".to_string(), "date".to_string());
    options.query.insert("order".to_string(), "DESC".to_string());

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    fetcher.fetch_page(1, None, &options).await.unwrap();
}

#[tokio::test]
async fn error_envelope_decodes_to_no_records() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "posts",
        9,
        json!({"code": "rest_post_invalid_page_number", "message": "The page number requested is larger than the number of pages available."}),
    )
    .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let records = fetcher
        .fetch_page(9, None, &FetchOptions::new())
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn empty_and_non_array_bodies_decode_to_no_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    assert!(
        fetcher
            .fetch_page(1, None, &FetchOptions::new())
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        fetcher
            .fetch_page(2, None, &FetchOptions::new())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn http_error_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let err = fetcher
        .fetch_page(1, None, &FetchOptions::new())
        .await
        .unwrap_err();

    match err {
        Error::Fetch { url, reason, .. } => {
            assert!(url.contains("/wp-json/wp/v2/posts"));
            assert!(reason.contains("500"));
        }
        other => panic!("expected Fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let result = fetcher.fetch_page(1, None, &FetchOptions::new()).await;

    assert!(matches!(result, Err(Error::Fetch { .. })));
}

#[tokio::test]
async fn invalid_base_url_fails_before_any_request() {
    let fetcher = fetcher_for("not a url", ObjectKind::Post);
    let result = fetcher.fetch_page(1, None, &FetchOptions::new()).await;

    assert!(matches!(result, Err(Error::Config { .. })));
}

#[tokio::test]
async fn get_parses_records_and_counts_malformed_ones() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "posts",
        1,
        json!([{"id": 1, "slug": "one"}, {"id": 0}, {"id": 2, "slug": "two"}]),
    )
    .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let mut cache = RunCache::new();
    let page = fetcher
        .get(1, None, &FetchOptions::new(), &mut cache)
        .await;

    assert_eq!(page.objects.len(), 2);
    assert_eq!(page.skipped, 1);
    assert_eq!(page.record_count(), 3);
    assert_eq!(page.objects[0].slug(), Some("one"));
}

#[tokio::test]
async fn get_stores_parsed_objects_in_the_run_cache() {
    let server = MockServer::start().await;
    mount_page(&server, "media", 1, json!([{"id": 7}, {"id": 8}])).await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Media);
    let mut cache = RunCache::new();
    fetcher.get(1, None, &FetchOptions::new(), &mut cache).await;

    assert_eq!(cache.len(), 2);
    assert!(cache.load("7", ObjectKind::Media).is_some());
    assert!(cache.load("8", ObjectKind::Media).is_some());
    assert!(cache.load("7", ObjectKind::Post).is_none());
}

#[tokio::test]
async fn get_swallows_fetch_failures_into_an_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let mut cache = RunCache::new();
    let page = fetcher
        .get(1, None, &FetchOptions::new(), &mut cache)
        .await;

    assert!(page.is_empty());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn fetch_one_returns_the_single_item_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts/42"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "slug": "answer"})))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let record = fetcher.fetch_one(42, &FetchOptions::new()).await.unwrap();

    assert_eq!(record["id"], 42);
}

#[tokio::test]
async fn fetch_one_missing_item_is_an_error_not_an_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            json!({"code": "rest_post_invalid_id", "message": "Invalid post ID."}),
        ))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let result = fetcher.fetch_one(99, &FetchOptions::new()).await;

    assert!(matches!(result, Err(Error::Fetch { .. })));
}

#[tokio::test]
async fn fetch_one_empty_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server.uri(), ObjectKind::Post);
    let result = fetcher.fetch_one(1, &FetchOptions::new()).await;

    match result {
        Err(Error::Fetch { reason, .. }) => assert!(reason.contains("empty body")),
        other => panic!("expected Fetch, got {other:?}"),
    }
}
