#[path = "common/mod.rs"]
mod common;

use adlib_export::{AdScraper, FetchError, FilterSet, StopReason};
use common::*;
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The blocking client runs on the test thread; the mock server lives on the runtime.
fn start(rt: &Runtime) -> MockServer {
    rt.block_on(MockServer::start())
}

fn page_mock(page: u32, body: serde_json::Value) -> Mock {
    Mock::given(method("GET"))
        .and(path("/list"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

fn no_delay(keywords: &[&str], max_pages: u32) -> FilterSet {
    FilterSet::builder().keywords(keywords).max_pages(max_pages).no_delay().build().unwrap()
}

#[test]
fn paginates_until_empty_page() {
    let rt = Runtime::new().unwrap();
    let server = start(&rt);
    rt.block_on(async {
        page_mock(1, page_body(0, 20)).mount(&server).await;
        page_mock(2, page_body(20, 20)).mount(&server).await;
        page_mock(3, page_body(40, 0)).mount(&server).await;
    });

    let scraper = AdScraper::new().endpoint(format!("{}/list", server.uri())).progress(false);
    let outcome = scraper.fetch(&no_delay(&["shoes", "bags"], 5)).unwrap();

    assert_eq!(outcome.requests, 3);
    assert!(matches!(outcome.stop, StopReason::Exhausted { page: 3 }));
    assert_eq!(titles(&outcome.records), expected_titles(40));

    let received = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(received.len(), 3);
    for req in &received {
        let pairs: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("limit".into(), "20".into())));
        assert!(pairs.contains(&("period".into(), "7".into())));
        assert!(pairs.contains(&("sort_by".into(), "trending".into())));
        assert!(pairs.contains(&("search_keys".into(), "shoes,bags".into())));
        assert!(pairs.iter().all(|(k, _)| k != "countries" && k != "industries"));
    }
}

#[test]
fn sends_session_headers_and_only_present_filters() {
    let rt = Runtime::new().unwrap();
    let server = start(&rt);
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/list"))
            .and(header("origin", "https://ads.tiktok.com"))
            .and(query_param("countries", "US,GB"))
            .and(query_param_is_missing("search_keys"))
            .and(query_param_is_missing("industries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 2)))
            .mount(&server),
    );

    let filters = FilterSet::builder().countries(["us", "gb"]).max_pages(1).no_delay().build().unwrap();
    let outcome = AdScraper::new()
        .endpoint(format!("{}/list", server.uri()))
        .progress(false)
        .fetch(&filters)
        .unwrap();

    assert_eq!(outcome.records.len(), 2, "mock only matches the expected query and headers");
    assert!(matches!(outcome.stop, StopReason::PageLimit));
}

#[test]
fn server_error_keeps_earlier_pages() {
    let rt = Runtime::new().unwrap();
    let server = start(&rt);
    rt.block_on(async {
        page_mock(1, page_body(0, 20)).mount(&server).await;
        Mock::given(method("GET"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
    });

    let outcome = AdScraper::new()
        .endpoint(format!("{}/list", server.uri()))
        .progress(false)
        .fetch(&no_delay(&["shoes"], 5))
        .unwrap();

    assert_eq!(outcome.records.len(), 20);
    assert!(matches!(
        outcome.stop,
        StopReason::Failed { page: 2, error: FetchError::Status { status: 500 } }
    ));
    assert_eq!(rt.block_on(server.received_requests()).unwrap().len(), 2);
}

#[test]
fn malformed_body_is_a_payload_error() {
    let rt = Runtime::new().unwrap();
    let server = start(&rt);
    rt.block_on(
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server),
    );

    let outcome = AdScraper::new()
        .endpoint(format!("{}/list", server.uri()))
        .progress(false)
        .fetch(&no_delay(&["shoes"], 5))
        .unwrap();

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.requests, 1);
    assert!(matches!(outcome.stop, StopReason::Failed { page: 1, error: FetchError::Payload(_) }));
}

#[test]
fn unreachable_endpoint_is_a_transport_error() {
    // Port 9 (discard) on localhost is normally closed.
    let outcome = AdScraper::new()
        .endpoint("http://127.0.0.1:9/list")
        .progress(false)
        .fetch(&no_delay(&["shoes"], 3))
        .unwrap();

    assert!(outcome.records.is_empty());
    assert!(matches!(outcome.stop, StopReason::Failed { page: 1, error: FetchError::Transport(_) }));
}
