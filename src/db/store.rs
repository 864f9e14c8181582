use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;

use crate::error::Result;
use crate::types::{AssociatedWordSample, RawTrendSample};

/// Connection-scoped handle over the two-table trend schema. Cloning is
/// cheap (the pool is internally shared); both binaries hold one.
#[derive(Clone)]
pub struct TrendStore {
    pool: SqlitePool,
}

impl TrendStore {
    /// Open (creating if missing) the database file and bootstrap the
    /// schema. Both statements are idempotent, so the web and poller
    /// binaries can each run this at startup.
    pub async fn open(db_path: &str) -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// In-memory store for tests. A single pooled connection — every pool
    /// connection would otherwise see its own empty `:memory:` database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trends (
                timestamp INTEGER NOT NULL,
                volume INTEGER,
                keyword TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_trends_keyword ON trends (keyword)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS associated_words (
                timestamp INTEGER NOT NULL,
                keyword TEXT NOT NULL,
                associated_word TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_associated_words_keyword ON associated_words (keyword)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn insert_trend(&self, sample: &RawTrendSample) -> Result<()> {
        sqlx::query("INSERT INTO trends (timestamp, volume, keyword) VALUES (?, ?, ?)")
            .bind(sample.timestamp)
            .bind(sample.volume)
            .bind(&sample.keyword)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_associated_word(&self, sample: &AssociatedWordSample) -> Result<()> {
        sqlx::query(
            "INSERT INTO associated_words (timestamp, keyword, associated_word) VALUES (?, ?, ?)",
        )
        .bind(sample.timestamp)
        .bind(&sample.keyword)
        .bind(&sample.associated_word)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Trend rows in `[start, end]` whose keyword recorded `term` (lowercased)
    /// as an associated word at that exact timestamp, ascending by timestamp.
    /// This is the co-occurrence pre-filter the window builder expects.
    pub async fn correlated_samples(
        &self,
        start: i64,
        end: i64,
        term: &str,
    ) -> Result<Vec<RawTrendSample>> {
        let rows = sqlx::query(
            r#"
            SELECT trends.timestamp, trends.volume, trends.keyword
            FROM trends
            WHERE (timestamp BETWEEN ? AND ?) AND trends.keyword IN
                (SELECT keyword FROM associated_words
                 WHERE associated_word = LOWER(?)
                   AND associated_words.timestamp = trends.timestamp)
            ORDER BY timestamp ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(term)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RawTrendSample {
                timestamp: row.get("timestamp"),
                volume: row.get::<Option<i64>, _>("volume").unwrap_or(0),
                keyword: row.get::<Option<String>, _>("keyword").unwrap_or_default(),
                // the schema does not record the source bucket
                bucket: 0,
            })
            .collect())
    }
}
