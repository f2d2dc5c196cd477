use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_cache::{CachedFeed, FeedStore, StoreError};
use feed_core::FeedRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::types::{ManagedCacheRow, ManagedFeedImageRow};

/// Feed store backed by a SQLite database
///
/// The pool holds a single long-lived connection and every operation runs in
/// its own transaction, so operations from concurrent callers are applied one
/// at a time in the order they acquire the connection.
pub struct SqliteFeedStore {
    pool: SqlitePool,
}

impl SqliteFeedStore {
    /// Open (creating if missing) the database at `database_url` and migrate it
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Connecting to feed cache database...");
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        crate::migrate::migrate(&pool).await?;
        info!("Feed cache database ready");
        Ok(Self { pool })
    }

    /// Private in-memory database, gone when the store is dropped
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        Self::connect("sqlite::memory:").await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl FeedStore for SqliteFeedStore {
    async fn delete_cached_feed(&self) -> feed_cache::Result<()> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;

        sqlx::query("DELETE FROM feed_images")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;
        let deleted = sqlx::query("DELETE FROM feed_cache")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;

        tx.commit().await.map_err(StoreError::backend)?;
        debug!(rows = deleted.rows_affected(), "Deleted feed cache");
        Ok(())
    }

    async fn insert(&self, feed: &[FeedRecord], timestamp: DateTime<Utc>) -> feed_cache::Result<()> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;

        // Replace, never merge
        sqlx::query("DELETE FROM feed_images")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;
        sqlx::query("DELETE FROM feed_cache")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;

        sqlx::query("INSERT INTO feed_cache (id, timestamp) VALUES (1, ?)")
            .bind(timestamp)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;

        for (position, record) in feed.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO feed_images (cache_id, position, id, description, location, url)
                VALUES (1, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(position as i64)
            .bind(record.id().to_string())
            .bind(record.description())
            .bind(record.location())
            .bind(record.url().as_str())
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;
        }

        tx.commit().await.map_err(StoreError::backend)?;
        debug!(count = feed.len(), "Inserted feed cache");
        Ok(())
    }

    async fn retrieve(&self) -> feed_cache::Result<CachedFeed> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;

        let cache: Option<ManagedCacheRow> =
            sqlx::query_as("SELECT timestamp FROM feed_cache WHERE id = 1")
                .fetch_optional(&mut *tx)
                .await
                .map_err(StoreError::backend)?;

        let Some(cache) = cache else {
            tx.commit().await.map_err(StoreError::backend)?;
            return Ok(CachedFeed::Empty);
        };

        let rows: Vec<ManagedFeedImageRow> = sqlx::query_as(
            r#"
            SELECT id, description, location, url
            FROM feed_images
            WHERE cache_id = 1
            ORDER BY position
            "#,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(StoreError::backend)?;

        tx.commit().await.map_err(StoreError::backend)?;

        let feed = rows
            .into_iter()
            .map(FeedRecord::try_from)
            .collect::<feed_cache::Result<Vec<_>>>()?;
        Ok(CachedFeed::found(feed, cache.timestamp))
    }
}
