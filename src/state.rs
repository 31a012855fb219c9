//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    BatchService, BrowserPlatformService, LinkService, QrService, RedirectService,
    RedirectionLimitService, UrlCheckService,
};
use crate::domain::gateways::{
    GeoLocationService, HashService, UrlReachabilityService, UrlSafetyService,
};
use crate::domain::repositories::{
    ClickRepository, RedirectionCountRepository, ShortUrlRepository,
};
use crate::infrastructure::cache::CacheService;

/// Concrete stores and gateways the services are wired from.
pub struct Collaborators {
    pub short_urls: Arc<dyn ShortUrlRepository>,
    pub clicks: Arc<dyn ClickRepository>,
    pub counts: Arc<dyn RedirectionCountRepository>,
    pub cache: Arc<dyn CacheService>,
    pub hash: Arc<dyn HashService>,
    pub geo_location: Arc<dyn GeoLocationService>,
    pub safety: Arc<dyn UrlSafetyService>,
    pub reachability: Arc<dyn UrlReachabilityService>,
}

/// Tunables taken from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub redirect_limit: u64,
    pub qr_size: u32,
    pub behind_proxy: bool,
    /// Reported by `GET /health`.
    pub storage: &'static str,
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub batch_service: Arc<BatchService>,
    pub url_check_service: Arc<UrlCheckService>,
    pub qr_service: Arc<QrService>,
    pub geo_location: Arc<dyn GeoLocationService>,
    pub short_urls: Arc<dyn ShortUrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub behind_proxy: bool,
    pub storage: &'static str,
}

impl AppState {
    pub fn new(deps: Collaborators, settings: Settings) -> Self {
        let link_service = Arc::new(LinkService::new(
            deps.short_urls.clone(),
            deps.hash,
            settings.base_url,
        ));

        let url_check_service = Arc::new(UrlCheckService::new(deps.reachability, deps.safety));

        let limiter = Arc::new(RedirectionLimitService::new(
            settings.redirect_limit,
            deps.counts,
        ));

        let redirect_service = Arc::new(RedirectService::new(
            limiter,
            deps.geo_location.clone(),
            Arc::new(BrowserPlatformService::new()),
            deps.short_urls.clone(),
            deps.clicks,
            deps.cache.clone(),
        ));

        let batch_service = Arc::new(
            BatchService::new(link_service.clone()).with_url_checks(url_check_service.clone()),
        );

        Self {
            link_service,
            redirect_service,
            batch_service,
            url_check_service,
            qr_service: Arc::new(QrService::new(settings.qr_size)),
            geo_location: deps.geo_location,
            short_urls: deps.short_urls,
            cache: deps.cache,
            behind_proxy: settings.behind_proxy,
            storage: settings.storage,
        }
    }
}
