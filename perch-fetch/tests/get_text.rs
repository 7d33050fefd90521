use std::time::Duration;

use perch_fetch::{FetchError, PageFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn returns_page_text_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>stream-items-id</html>"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let page = fetcher
        .get_text(&format!("{}/profile", server.uri()))
        .await
        .unwrap();
    assert!(page.contains("stream-items-id"));
}

#[tokio::test]
async fn retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new().unwrap().with_retries(2);
    let page = fetcher.get_text(&server.uri()).await.unwrap();
    assert_eq!(page, "ok");
}

#[tokio::test]
async fn gives_up_after_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new().unwrap().with_retries(1);
    let err = fetcher.get_text(&server.uri()).await.unwrap_err();
    match err {
        FetchError::Status { status, snippet } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(snippet, "down");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_errors_fail_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new().unwrap().with_retries(3);
    let err = fetcher.get_text(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 404));
}

#[tokio::test]
async fn invalid_url_is_a_typed_error() {
    let fetcher = PageFetcher::new().unwrap();
    let err = fetcher.get_text("not a url").await.unwrap_err();
    assert!(matches!(err, FetchError::Url(_)));
}

#[tokio::test]
async fn honors_retry_after_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("slow down"),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new()
        .unwrap()
        .with_retries(1)
        .with_timeout(Duration::from_secs(5));
    let page = fetcher.get_text(&server.uri()).await.unwrap();
    assert_eq!(page, "ok");
}
