//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{ShortUrl, ShortUrlProperties};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ShortUrlRow {
    hash: String,
    target: String,
    created_at: DateTime<Utc>,
    ip: Option<String>,
    country: Option<String>,
    sponsor: Option<String>,
    safe: bool,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(
            row.hash,
            row.target,
            row.created_at,
            ShortUrlProperties {
                ip: row.ip,
                country: row.country,
                sponsor: row.sponsor,
                safe: row.safe,
            },
        )
    }
}

const SELECT_BY_HASH: &str = r#"
    SELECT hash, target, created_at, ip, country, sponsor, safe
    FROM short_urls
    WHERE hash = $1
"#;

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(SELECT_BY_HASH)
            .bind(hash)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(ShortUrl::from))
    }

    /// Inserts unless the hash already exists, then returns whatever row is stored.
    async fn save(&self, short_url: ShortUrl) -> Result<ShortUrl, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO short_urls (hash, target, created_at, ip, country, sponsor, safe)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (hash) DO NOTHING
            "#,
        )
        .bind(&short_url.hash)
        .bind(&short_url.target)
        .bind(short_url.created)
        .bind(&short_url.properties.ip)
        .bind(&short_url.properties.country)
        .bind(&short_url.properties.sponsor)
        .bind(short_url.properties.safe)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, ShortUrlRow>(SELECT_BY_HASH)
            .bind(&short_url.hash)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }
}
