//! Redirect dispatch: the request-time path behind `GET /{id}`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, info, warn};

use crate::application::services::{BrowserPlatformService, RedirectionLimitService};
use crate::domain::entities::{Click, ClickProperties, Redirection, RequestContext};
use crate::domain::gateways::GeoLocationService;
use crate::domain::repositories::{ClickRepository, ShortUrlRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Retries after the first failed click write.
const CLICK_SAVE_RETRIES: usize = 2;

/// Resolves short URLs and logs every redirect before returning it.
///
/// # Pipeline
///
/// 1. Reject with [`AppError::RateLimited`] if the hash is over its limit
///    (nothing else happens, the attempt is not counted)
/// 2. Geolocate the caller
/// 3. Parse the User-Agent header
/// 4. Resolve the target (cache, then store)
/// 5. Persist the [`Click`]
/// 6. Count the attempt against the limit
/// 7. Return the [`Redirection`]
///
/// Step 6 runs whatever the outcome of steps 2-5, so failed attempts also use
/// up quota. A returned redirect always has its click stored.
pub struct RedirectService {
    limiter: Arc<RedirectionLimitService>,
    geo_location: Arc<dyn GeoLocationService>,
    browser_platform: Arc<BrowserPlatformService>,
    short_urls: Arc<dyn ShortUrlRepository>,
    clicks: Arc<dyn ClickRepository>,
    cache: Arc<dyn CacheService>,
}

impl RedirectService {
    pub fn new(
        limiter: Arc<RedirectionLimitService>,
        geo_location: Arc<dyn GeoLocationService>,
        browser_platform: Arc<BrowserPlatformService>,
        short_urls: Arc<dyn ShortUrlRepository>,
        clicks: Arc<dyn ClickRepository>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            limiter,
            geo_location,
            browser_platform,
            short_urls,
            clicks,
            cache,
        }
    }

    /// Dispatches one redirect request for `id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::RateLimited`] - quota exhausted
    /// - [`AppError::Upstream`] - geolocation failed
    /// - [`AppError::InvalidInput`] - missing or blank User-Agent
    /// - [`AppError::NotFound`] - unknown hash
    /// - [`AppError::Internal`] - click could not be stored
    pub async fn redirect(
        &self,
        id: &str,
        context: &RequestContext,
    ) -> Result<Redirection, AppError> {
        if self.limiter.is_over_limit(id) {
            metrics::counter!("redirects_total", "outcome" => "rate_limited").increment(1);
            debug!(hash = id, "Redirect limit reached");
            return Err(AppError::rate_limited(
                "Redirect limit reached for this short URL",
                json!({ "hash": id, "limit": self.limiter.limit() }),
            ));
        }

        let result = self.dispatch(id, context).await;

        let count = self.limiter.increment(id);
        debug!(hash = id, count, "Redirect attempt counted");

        match &result {
            Ok(redirection) => {
                metrics::counter!("redirects_total", "outcome" => "ok").increment(1);
                info!(hash = id, target = %redirection.target, "Redirect");
            }
            Err(e) => {
                metrics::counter!("redirects_total", "outcome" => e.code()).increment(1);
            }
        }

        result
    }

    async fn dispatch(&self, id: &str, context: &RequestContext) -> Result<Redirection, AppError> {
        let geo_location = self.geo_location.get(context.ip).await?;

        let browser_platform = self
            .browser_platform
            .parse(context.user_agent.as_deref().unwrap_or_default())?;

        let redirection = self.resolve(id).await?;

        let click = Click::new(
            id.to_string(),
            Utc::now(),
            ClickProperties {
                ip: Some(geo_location.ip),
                country: Some(geo_location.country),
                browser: Some(browser_platform.browser),
                platform: Some(browser_platform.platform),
                referrer: context.referrer.clone(),
            },
        );
        self.log_click(click).await?;

        Ok(redirection)
    }

    /// Looks up the target, preferring the cache. Cache failures fall back to the store.
    async fn resolve(&self, id: &str) -> Result<Redirection, AppError> {
        match self.cache.get_url(id).await {
            Ok(Some(target)) => {
                debug!(hash = id, "Cache HIT");
                return Ok(Redirection::temporary(target));
            }
            Ok(None) => debug!(hash = id, "Cache MISS"),
            Err(e) => warn!(hash = id, "Cache error: {}", e),
        }

        let short_url = self
            .short_urls
            .find_by_hash(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "hash": id })))?;

        if let Err(e) = self.cache.set_url(id, &short_url.target, None).await {
            warn!(hash = id, "Failed to cache target: {}", e);
        }

        Ok(short_url.redirection())
    }

    /// Stores the click, retrying transient storage failures.
    async fn log_click(&self, click: Click) -> Result<Click, AppError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(5)
            .max_delay(Duration::from_millis(200))
            .take(CLICK_SAVE_RETRIES);

        RetryIf::spawn(
            strategy,
            || {
                let clicks = self.clicks.clone();
                let click = click.clone();
                async move { clicks.save(click).await }
            },
            |e: &AppError| {
                let retry = matches!(e, AppError::Internal { .. });
                if retry {
                    warn!("Click write failed, retrying: {}", e);
                }
                retry
            },
        )
        .await
    }
}
