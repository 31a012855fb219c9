mod common;

use base64::Engine as _;
use serde_json::Value;
use url_shortener::api::dto::link::LinkResponse;
use url_shortener::domain::repositories::ShortUrlRepository;

const PNG_SIGNATURE: [u8; 4] = [0x89, b'P', b'N', b'G'];

#[tokio::test]
async fn test_link_created() {
    let app = common::test_app();

    let response = app
        .server
        .post("/api/link")
        .form(&[("url", "https://example.com/page"), ("sponsor", "acme")])
        .await;

    assert_eq!(response.status_code(), 201);

    let body: LinkResponse = response.json();
    assert!(body.url.starts_with("http://localhost:8080/"));
    assert_eq!(body.url.len(), "http://localhost:8080/".len() + 12);
    assert!(body.properties.safe);
    assert_eq!(response.header("location"), body.url.as_str());

    let png = base64::engine::general_purpose::STANDARD
        .decode(&body.qr_code)
        .unwrap();
    assert!(png.starts_with(&PNG_SIGNATURE));

    let hash = body.url.rsplit('/').next().unwrap();
    let stored = app.short_urls.find_by_hash(hash).await.unwrap().unwrap();
    assert_eq!(stored.target, "https://example.com/page");
    assert_eq!(stored.properties.sponsor.as_deref(), Some("acme"));
    assert_eq!(stored.properties.country.as_deref(), Some("ES"));
    assert_eq!(stored.properties.ip.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_same_url_returns_same_link() {
    let app = common::test_app();

    let first: LinkResponse = app
        .server
        .post("/api/link")
        .form(&[("url", "https://example.com")])
        .await
        .json();
    let second: LinkResponse = app
        .server
        .post("/api/link")
        .form(&[("url", "https://example.com")])
        .await
        .json();

    assert_eq!(first.url, second.url);
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let app = common::test_app();

    let response = app
        .server
        .post("/api/link")
        .form(&[("url", "ftp://example.com/file")])
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_unreachable_url_rejected() {
    let app = common::test_app();

    let response = app
        .server
        .post("/api/link")
        .form(&[("url", "https://down.example.com")])
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "unreachable_url");
}

#[tokio::test]
async fn test_unsafe_url_forbidden() {
    let app = common::test_app();

    let response = app
        .server
        .post("/api/link")
        .form(&[("url", "https://malware.example.com")])
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "unsafe_url");
}

#[tokio::test]
async fn test_safety_lookup_failure_is_bad_gateway() {
    let app = common::test_app();

    let response = app
        .server
        .post("/api/link")
        .form(&[("url", "https://flaky.example.com")])
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "upstream_error");
}

#[tokio::test]
async fn test_missing_url_field() {
    let app = common::test_app();

    let response = app
        .server
        .post("/api/link")
        .form(&[("sponsor", "acme")])
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_created_link_redirects() {
    let app = common::test_app();

    let body: LinkResponse = app
        .server
        .post("/api/link")
        .form(&[("url", "https://example.com/landing")])
        .await
        .json();
    let path = body.url.trim_start_matches(common::BASE_URL);

    let response = app
        .server
        .get(path)
        .add_header("User-Agent", common::CHROME_UA)
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/landing");
}
