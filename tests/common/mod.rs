#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower::Layer;
use url_shortener::AppError;
use url_shortener::domain::entities::GeoLocation;
use url_shortener::domain::gateways::{
    GeoLocationService, UrlReachabilityService, UrlSafetyService,
};
use url_shortener::infrastructure::cache::NullCache;
use url_shortener::infrastructure::counters::InMemoryRedirectionCountRepository;
use url_shortener::infrastructure::persistence::{
    InMemoryClickRepository, InMemoryShortUrlRepository,
};
use url_shortener::routes::routes;
use url_shortener::state::{AppState, Collaborators, Settings};
use url_shortener::utils::hash::Sha256HashService;

pub const BASE_URL: &str = "http://localhost:8080";
pub const CLIENT_ADDR: &str = "203.0.113.7:12345";
pub const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Answers every lookup with a fixed country, or fails.
pub struct StubGeoLocation {
    pub country: &'static str,
    pub fail: bool,
}

#[async_trait]
impl GeoLocationService for StubGeoLocation {
    async fn get(&self, ip: IpAddr) -> Result<GeoLocation, AppError> {
        if self.fail {
            return Err(AppError::upstream("Geolocation request failed", json!({})));
        }
        Ok(GeoLocation::new(ip.to_string(), self.country))
    }
}

/// Flags URLs containing "malware"; fails for URLs containing "flaky".
pub struct StubSafety;

#[async_trait]
impl UrlSafetyService for StubSafety {
    async fn is_safe(&self, url: &str) -> Result<bool, AppError> {
        if url.contains("flaky") {
            return Err(AppError::upstream("Safe Browsing request failed", json!({})));
        }
        Ok(!url.contains("malware"))
    }
}

/// URLs containing "down" are unreachable.
pub struct StubReachability;

#[async_trait]
impl UrlReachabilityService for StubReachability {
    async fn is_reachable(&self, url: &str) -> bool {
        !url.contains("down")
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub short_urls: Arc<InMemoryShortUrlRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
}

pub struct TestAppBuilder {
    redirect_limit: u64,
    geo_fails: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            redirect_limit: 10,
            geo_fails: false,
        }
    }
}

impl TestAppBuilder {
    pub fn redirect_limit(mut self, limit: u64) -> Self {
        self.redirect_limit = limit;
        self
    }

    pub fn geo_fails(mut self) -> Self {
        self.geo_fails = true;
        self
    }

    pub fn build(self) -> TestApp {
        let short_urls = Arc::new(InMemoryShortUrlRepository::new());
        let clicks = Arc::new(InMemoryClickRepository::new());

        let state = AppState::new(
            Collaborators {
                short_urls: short_urls.clone(),
                clicks: clicks.clone(),
                counts: Arc::new(InMemoryRedirectionCountRepository::new()),
                cache: Arc::new(NullCache::new()),
                hash: Arc::new(Sha256HashService),
                geo_location: Arc::new(StubGeoLocation {
                    country: "ES",
                    fail: self.geo_fails,
                }),
                safety: Arc::new(StubSafety),
                reachability: Arc::new(StubReachability),
            },
            Settings {
                base_url: BASE_URL.to_string(),
                redirect_limit: self.redirect_limit,
                qr_size: 128,
                behind_proxy: false,
                storage: "in-memory",
            },
        );

        let app = routes(state).layer(MockConnectInfoLayer);
        let server = TestServer::new(app).unwrap();

        TestApp {
            server,
            short_urls,
            clicks,
        }
    }
}

pub fn test_app() -> TestApp {
    TestAppBuilder::default().build()
}

/// Inserts the `ConnectInfo` axum's `serve` would provide.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = CLIENT_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
