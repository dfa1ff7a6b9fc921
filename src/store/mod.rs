//! Persistent store for company records.
//!
//! The import pipeline talks to the store through the [`UnicornStore`]
//! trait, so the Postgres connection is an injected collaborator rather
//! than a global. [`PgUnicornStore`] is the real implementation: a single
//! `unicorns` table behind an sqlx pool, with embedded migrations.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::CompanyRecord;

// =============================================================================
// Store Trait
// =============================================================================

/// Operations the import pipeline needs from a persistent store.
///
/// Each call is independent; there is no batching and no atomicity across
/// rows.
#[allow(async_fn_in_trait)]
pub trait UnicornStore {
    /// Delete all existing rows. Returns the number of rows removed.
    async fn clear(&self) -> StoreResult<u64>;

    /// Insert one record.
    async fn insert(&self, record: &CompanyRecord) -> StoreResult<()>;

    /// Total number of rows currently in the store.
    async fn count(&self) -> StoreResult<i64>;

    /// Release the underlying connection.
    async fn close(&self);
}

// =============================================================================
// Postgres Implementation
// =============================================================================

/// Postgres-backed store over the `unicorns` table.
#[derive(Debug, Clone)]
pub struct PgUnicornStore {
    pool: PgPool,
}

impl PgUnicornStore {
    /// Connect to Postgres.
    ///
    /// The import is strictly sequential, so a single connection is enough.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(StoreError::Connect)?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests that manage their own database).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded migrations, creating the `unicorns` table if needed.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// Null Implementation
// =============================================================================

/// Store that accepts everything and keeps nothing.
///
/// Used for dry runs, where validation should proceed without a database
/// connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl UnicornStore for NullStore {
    async fn clear(&self) -> StoreResult<u64> {
        Ok(0)
    }

    async fn insert(&self, _record: &CompanyRecord) -> StoreResult<()> {
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(0)
    }

    async fn close(&self) {}
}

impl UnicornStore for PgUnicornStore {
    async fn clear(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM unicorns")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert(&self, record: &CompanyRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO unicorns
                (company, valuation, date_joined, country, city, industry, select_investors)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&record.company)
        .bind(record.valuation)
        .bind(record.date_joined)
        .bind(&record.country)
        .bind(&record.city)
        .bind(&record.industry)
        .bind(&record.select_investors)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM unicorns")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
