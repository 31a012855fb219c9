//! CSV batch shortening.

use std::sync::Arc;

use futures::future;
use futures::stream::{self, Stream, StreamExt};
use tracing::debug;

use crate::application::services::{LinkService, UrlCheckService};
use crate::domain::entities::ShortUrlProperties;

/// First row of every batch response.
pub const CSV_HEADER: &str = "original-url,shortened-url";

/// Caller metadata stamped on every short URL of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchContext {
    pub ip: Option<String>,
    pub country: Option<String>,
}

/// Turns a sequence of URLs into CSV rows, one per non-blank input line.
pub struct BatchService {
    link_service: Arc<LinkService>,
    url_checks: Option<Arc<UrlCheckService>>,
}

impl BatchService {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self {
            link_service,
            url_checks: None,
        }
    }

    /// Runs reachability and safety checks on each line before creating it.
    pub fn with_url_checks(mut self, url_checks: Arc<UrlCheckService>) -> Self {
        self.url_checks = Some(url_checks);
        self
    }

    /// Lazily shortens `lines` in order.
    ///
    /// Emits [`CSV_HEADER`] first, then `<url>,<short url>` or
    /// `<url>,ERROR: <message>` for each non-blank line. Failures never end the
    /// stream early. Rows carry no trailing newline.
    pub fn process<I>(
        &self,
        lines: I,
        context: BatchContext,
    ) -> impl Stream<Item = String> + Send + use<I>
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: Send + 'static,
    {
        let link_service = self.link_service.clone();
        let url_checks = self.url_checks.clone();

        let rows = stream::iter(lines)
            .map(|line| line.trim().to_string())
            .filter(|line| future::ready(!line.is_empty()))
            .then(move |url| {
                let link_service = link_service.clone();
                let url_checks = url_checks.clone();
                let context = context.clone();
                async move { shorten_row(&link_service, url_checks.as_deref(), url, context).await }
            });

        stream::once(future::ready(CSV_HEADER.to_string())).chain(rows)
    }
}

async fn shorten_row(
    link_service: &LinkService,
    url_checks: Option<&UrlCheckService>,
    url: String,
    context: BatchContext,
) -> String {
    if let Some(checks) = url_checks
        && let Err(e) = checks.check(&url).await
    {
        return error_row(&url, &e.to_string());
    }

    let properties = ShortUrlProperties {
        ip: context.ip,
        country: context.country,
        sponsor: None,
        safe: url_checks.is_some(),
    };

    match link_service.create(&url, properties).await {
        Ok(short_url) => {
            metrics::counter!("batch_rows_total", "outcome" => "ok").increment(1);
            format!("{},{}", url, link_service.short_url(&short_url.hash))
        }
        Err(e) => error_row(&url, &e.to_string()),
    }
}

fn error_row(url: &str, message: &str) -> String {
    metrics::counter!("batch_rows_total", "outcome" => "error").increment(1);
    debug!(url, "Batch row failed: {}", message);
    format!("{},ERROR: {}", url, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::{
        MockHashService, MockUrlReachabilityService, MockUrlSafetyService,
    };
    use crate::infrastructure::persistence::InMemoryShortUrlRepository;
    use crate::utils::hash::Sha256HashService;

    const BASE_URL: &str = "http://localhost:8080";

    fn sha_links() -> Arc<LinkService> {
        Arc::new(LinkService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            Arc::new(Sha256HashService),
            BASE_URL,
        ))
    }

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    async fn collect(service: &BatchService, input: &[&str]) -> Vec<String> {
        service
            .process(lines(input), BatchContext::default())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_single_row_with_known_hash() {
        let mut hash = MockHashService::new();
        hash.expect_hash().returning(|_| "abc123".to_string());
        let links = Arc::new(LinkService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            Arc::new(hash),
            BASE_URL,
        ));
        let service = BatchService::new(links);

        let rows = collect(&service, &["http://example.com"]).await;

        assert_eq!(
            rows,
            vec![
                CSV_HEADER.to_string(),
                "http://example.com,http://localhost:8080/abc123".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_bad_lines_do_not_abort_batch() {
        let service = BatchService::new(sha_links());

        let rows = collect(
            &service,
            &["https://a.example", "not a url", "https://b.example"],
        )
        .await;

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], CSV_HEADER);
        assert!(rows[1].starts_with("https://a.example,http://localhost:8080/"));
        assert!(rows[2].starts_with("not a url,ERROR: "));
        assert!(rows[3].starts_with("https://b.example,http://localhost:8080/"));
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let service = BatchService::new(sha_links());

        let rows = collect(&service, &["", "  https://a.example  ", "   "]).await;

        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("https://a.example,"));
    }

    #[tokio::test]
    async fn test_empty_input_yields_header_only() {
        let service = BatchService::new(sha_links());
        let rows = collect(&service, &[]).await;

        assert_eq!(rows, vec![CSV_HEADER.to_string()]);
    }

    #[tokio::test]
    async fn test_failed_check_emits_error_row() {
        let mut reachability = MockUrlReachabilityService::new();
        reachability
            .expect_is_reachable()
            .returning(|url| url != "https://down.example");
        let mut safety = MockUrlSafetyService::new();
        safety.expect_is_safe().returning(|_| Ok(true));

        let checks = Arc::new(UrlCheckService::new(
            Arc::new(reachability),
            Arc::new(safety),
        ));
        let service = BatchService::new(sha_links()).with_url_checks(checks);

        let rows = collect(&service, &["https://down.example", "https://up.example"]).await;

        assert_eq!(rows[1], "https://down.example,ERROR: URL is not reachable");
        assert!(rows[2].starts_with("https://up.example,http://localhost:8080/"));
    }
}
