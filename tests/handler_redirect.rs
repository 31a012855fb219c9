mod common;

use chrono::Utc;
use serde_json::Value;
use url_shortener::domain::entities::{ShortUrl, ShortUrlProperties};
use url_shortener::domain::repositories::{ClickRepository, ShortUrlRepository};

async fn seed(app: &common::TestApp, hash: &str, target: &str) {
    app.short_urls
        .save(ShortUrl::new(
            hash.to_string(),
            target.to_string(),
            Utc::now(),
            ShortUrlProperties::default(),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_redirect_success() {
    let app = common::test_app();
    seed(&app, "abc123", "https://example.com/target").await;

    let response = app
        .server
        .get("/abc123")
        .add_header("User-Agent", common::CHROME_UA)
        .add_header("Referer", "https://news.example")
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");

    let clicks = app.clicks.all().await;
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].hash, "abc123");
    assert_eq!(clicks[0].properties.ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(clicks[0].properties.country.as_deref(), Some("ES"));
    assert_eq!(clicks[0].properties.browser.as_deref(), Some("Chrome"));
    assert_eq!(
        clicks[0].properties.referrer.as_deref(),
        Some("https://news.example")
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::test_app();

    let response = app
        .server
        .get("/missing")
        .add_header("User-Agent", common::CHROME_UA)
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert!(app.clicks.all().await.is_empty());
}

#[tokio::test]
async fn test_redirect_limit() {
    let app = common::TestAppBuilder::default().redirect_limit(2).build();
    seed(&app, "abc123", "https://example.com").await;

    for _ in 0..2 {
        let response = app
            .server
            .get("/abc123")
            .add_header("User-Agent", common::CHROME_UA)
            .await;
        assert_eq!(response.status_code(), 307);
    }

    let response = app
        .server
        .get("/abc123")
        .add_header("User-Agent", common::CHROME_UA)
        .await;

    assert_eq!(response.status_code(), 429);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "rate_limited");
    assert_eq!(app.clicks.count_by_hash("abc123").await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_user_agent() {
    let app = common::test_app();
    seed(&app, "abc123", "https://example.com").await;

    let response = app.server.get("/abc123").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_input");
    assert!(app.clicks.all().await.is_empty());
}

#[tokio::test]
async fn test_geolocation_failure() {
    let app = common::TestAppBuilder::default().geo_fails().build();
    seed(&app, "abc123", "https://example.com").await;

    let response = app
        .server
        .get("/abc123")
        .add_header("User-Agent", common::CHROME_UA)
        .await;

    assert_eq!(response.status_code(), 502);
    assert!(app.clicks.all().await.is_empty());
}
