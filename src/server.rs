//! HTTP server initialization and runtime setup.
//!
//! Selects storage and cache backends, builds the third-party clients and runs
//! the Axum server until Ctrl-C / SIGTERM.

use crate::config::Config;
use crate::domain::repositories::{ClickRepository, ShortUrlRepository};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::counters::InMemoryRedirectionCountRepository;
use crate::infrastructure::persistence::{
    InMemoryClickRepository, InMemoryShortUrlRepository, PgClickRepository, PgShortUrlRepository,
};
use crate::infrastructure::thirdparty::{
    HttpReachabilityService, IpInfoGeoLocationService, SafeBrowsingService, http_client,
};
use crate::routes::app_router;
use crate::state::{AppState, Collaborators, Settings};
use crate::utils::hash::Sha256HashService;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL pool and migrations (or in-memory stores)
/// - Redis cache (or NullCache fallback)
/// - ipinfo, Safe Browsing and reachability clients
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database is unreachable, migrations fail or the
/// listener cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let (short_urls, clicks, storage) = init_storage(&config).await?;
    let cache = init_cache(&config).await;

    let client = http_client(Duration::from_secs(config.upstream_timeout_secs))?;

    let deps = Collaborators {
        short_urls,
        clicks,
        counts: Arc::new(InMemoryRedirectionCountRepository::new()),
        cache,
        hash: Arc::new(Sha256HashService),
        geo_location: Arc::new(IpInfoGeoLocationService::new(
            client.clone(),
            config.ipinfo_base_url.clone(),
            config.ipinfo_api_key.clone(),
        )),
        safety: Arc::new(SafeBrowsingService::new(
            client.clone(),
            config.safebrowsing_base_url.clone(),
            config.google_api_key.clone(),
        )),
        reachability: Arc::new(HttpReachabilityService::new(client)),
    };

    let state = AppState::new(
        deps,
        Settings {
            base_url: config.base_url.clone(),
            redirect_limit: config.redirect_limit,
            qr_size: config.qr_size,
            behind_proxy: config.behind_proxy,
            storage,
        },
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

type Stores = (
    Arc<dyn ShortUrlRepository>,
    Arc<dyn ClickRepository>,
    &'static str,
);

async fn init_storage(config: &Config) -> Result<Stores> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured, short URLs are kept in memory");
        return Ok((
            Arc::new(InMemoryShortUrlRepository::new()),
            Arc::new(InMemoryClickRepository::new()),
            "in-memory",
        ));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    Ok((
        Arc::new(PgShortUrlRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
        "postgres",
    ))
}

async fn init_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
