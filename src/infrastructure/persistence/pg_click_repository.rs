//! PostgreSQL implementation of the click log.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Click;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn save(&self, click: Click) -> Result<Click, AppError> {
        sqlx::query(
            r#"
            INSERT INTO clicks (hash, created_at, ip, country, browser, platform, referrer)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&click.hash)
        .bind(click.created)
        .bind(&click.properties.ip)
        .bind(&click.properties.country)
        .bind(&click.properties.browser)
        .bind(&click.properties.platform)
        .bind(&click.properties.referrer)
        .execute(self.pool.as_ref())
        .await?;

        Ok(click)
    }

    async fn count_by_hash(&self, hash: &str) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE hash = $1")
            .bind(hash)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count.max(0) as u64)
    }
}
