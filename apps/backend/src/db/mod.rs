//! SQLite database operations

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Open an in-memory database, used by the test suites.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // A second connection would see a separate empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Item Repository ===

    /// Get or create an item for its unique (learner, kind, content) key.
    ///
    /// Creation inserts the item and its seed review record in one
    /// transaction. If the key already exists the stored row wins: nothing
    /// is overwritten and the existing id is returned with `created: false`.
    pub async fn get_or_create_item(
        &self,
        item: &NewItem,
        seed: &ReviewState,
        seed_due: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Result<(i64, bool)> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO items (learner_id, content_kind, content_id, front_text, back_text,
                               example_text, image_ref, audio_ref, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (learner_id, content_kind, content_id) DO NOTHING
            "#,
        )
        .bind(item.learner_id)
        .bind(item.content_kind.as_str())
        .bind(item.content_id)
        .bind(&item.front_text)
        .bind(&item.back_text)
        .bind(&item.example_text)
        .bind(&item.image_ref)
        .bind(&item.audio_ref)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let row = sqlx::query(
                r#"
                SELECT id FROM items
                WHERE learner_id = ?1 AND content_kind = ?2 AND content_id = ?3
                "#,
            )
            .bind(item.learner_id)
            .bind(item.content_kind.as_str())
            .bind(item.content_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::Internal("item conflict with no existing row".to_string()))?;

            tx.commit().await?;
            return Ok((row.get("id"), false));
        }

        let item_id = result.last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO review_records (item_id, learner_id, ease_factor, interval_days,
                                        repetition, next_review_date, response_quality,
                                        time_taken_ms, review_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(item_id)
        .bind(item.learner_id)
        .bind(seed.ease_factor)
        .bind(seed.interval_days)
        .bind(seed.repetition)
        .bind(seed_due)
        .bind(0i64)
        .bind(0i64)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((item_id, true))
    }

    /// Get an item by id, scoped to its owning learner
    pub async fn get_item(&self, item_id: i64, learner_id: Uuid) -> Result<Option<DbItem>> {
        let item = sqlx::query_as::<_, DbItem>(
            r#"
            SELECT id, learner_id, content_kind, content_id, front_text, back_text,
                   example_text, image_ref, audio_ref, created_at
            FROM items
            WHERE id = ?1 AND learner_id = ?2
            "#,
        )
        .bind(item_id)
        .bind(learner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Count all items owned by a learner
    pub async fn count_items(&self, learner_id: Uuid) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM items WHERE learner_id = ?1")
            .bind(learner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }

    // === Review History Repository ===

    /// Get the most recent review record for an item.
    ///
    /// The history is append-only; this row is the item's current
    /// scheduling state.
    pub async fn latest_review(&self, item_id: i64) -> Result<Option<DbReviewRecord>> {
        let record = sqlx::query_as::<_, DbReviewRecord>(
            r#"
            SELECT id, item_id, learner_id, ease_factor, interval_days, repetition,
                   next_review_date, response_quality, time_taken_ms, review_date
            FROM review_records
            WHERE item_id = ?1
            ORDER BY review_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Append one review record. Existing records are never updated.
    pub async fn insert_review(&self, record: &NewReviewRecord) -> Result<DbReviewRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO review_records (item_id, learner_id, ease_factor, interval_days,
                                        repetition, next_review_date, response_quality,
                                        time_taken_ms, review_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(record.item_id)
        .bind(record.learner_id)
        .bind(record.ease_factor)
        .bind(record.interval_days)
        .bind(record.repetition)
        .bind(record.next_review_date)
        .bind(record.response_quality)
        .bind(record.time_taken_ms)
        .bind(record.review_date)
        .execute(&self.pool)
        .await?;

        Ok(DbReviewRecord {
            id: result.last_insert_rowid(),
            item_id: record.item_id,
            learner_id: record.learner_id,
            ease_factor: record.ease_factor,
            interval_days: record.interval_days,
            repetition: i64::from(record.repetition),
            next_review_date: record.next_review_date,
            response_quality: i64::from(record.response_quality),
            time_taken_ms: i64::from(record.time_taken_ms),
            review_date: record.review_date,
        })
    }

    /// All history rows for a learner, most recent first.
    ///
    /// Feeds the maturity scan: the first row seen per item is that item's
    /// latest state.
    pub async fn review_history(&self, learner_id: Uuid) -> Result<Vec<ReviewSnapshot>> {
        let rows = sqlx::query_as::<_, ReviewSnapshot>(
            r#"
            SELECT item_id, repetition
            FROM review_records
            WHERE learner_id = ?1
            ORDER BY review_date DESC, id DESC
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // === Due Queue ===

    /// Items whose current state says they are due, soonest first
    pub async fn get_due_items(&self, learner_id: Uuid, limit: i64) -> Result<Vec<DbDueItem>> {
        let now = Utc::now();

        let items = sqlx::query_as::<_, DbDueItem>(
            r#"
            SELECT i.id, i.content_kind, i.content_id, i.front_text, i.back_text,
                   i.example_text, i.image_ref, i.audio_ref,
                   r.ease_factor, r.interval_days, r.repetition, r.next_review_date
            FROM items i
            JOIN review_records r ON r.item_id = i.id
            WHERE i.learner_id = ?1
              AND r.id = (
                  SELECT r2.id FROM review_records r2
                  WHERE r2.item_id = i.id
                  ORDER BY r2.review_date DESC, r2.id DESC
                  LIMIT 1
              )
              AND r.next_review_date <= ?2
            ORDER BY r.next_review_date
            LIMIT ?3
            "#,
        )
        .bind(learner_id)
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Count of due items for a learner
    pub async fn count_due_items(&self, learner_id: Uuid) -> Result<i64> {
        let now = Utc::now();

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as count
            FROM items i
            JOIN review_records r ON r.item_id = i.id
            WHERE i.learner_id = ?1
              AND r.id = (
                  SELECT r2.id FROM review_records r2
                  WHERE r2.item_id = i.id
                  ORDER BY r2.review_date DESC, r2.id DESC
                  LIMIT 1
              )
              AND r.next_review_date <= ?2
            "#,
        )
        .bind(learner_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("count"))
    }
}
