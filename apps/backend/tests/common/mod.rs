//! Common test utilities and fixtures for integration tests.
//!
//! Every test context opens its own in-memory SQLite database and runs the
//! migrations against it, so the suites are hermetic: no external services,
//! no shared state between tests, no cleanup step.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use lexora_backend::db::Database;
use lexora_backend::models::{ContentKind, NewItem, NewReviewRecord};
use lexora_backend::services::locks::ReviewLocks;
use lexora_backend::{router, AppState};
use srs_core::Sm2;

/// Test context owning an in-memory database and the application router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context with a fresh, migrated database.
    ///
    /// # Panics
    /// Panics if the in-memory database cannot be opened or migrated.
    pub async fn new() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");

        db.run_migrations().await.expect("Failed to run migrations");

        let db = Arc::new(db);

        let state = AppState {
            db: db.clone(),
            scheduler: Sm2::default(),
            review_locks: Arc::new(ReviewLocks::new()),
        };

        let app = router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Insert a vocabulary item with its seed review record and return its id.
    ///
    /// Use this when the item is setup for the behavior under test rather
    /// than the thing being tested.
    pub async fn seed_item(&self, learner_id: Uuid, content_id: i64) -> i64 {
        let scheduler = Sm2::default();
        let now = Utc::now();
        let seed = scheduler.seed(now);

        let item = NewItem {
            learner_id,
            content_kind: ContentKind::Vocabulary,
            content_id,
            front_text: format!("Front {}", content_id),
            back_text: format!("Back {}", content_id),
            example_text: None,
            image_ref: None,
            audio_ref: None,
        };

        let (item_id, _) = self
            .db
            .get_or_create_item(&item, &seed.new_state, seed.next_due, now)
            .await
            .expect("Failed to create test item");

        item_id
    }

    /// Append a review record with a chosen due date, making it the item's
    /// latest state.
    ///
    /// The history is append-only, so tests move an item's due date by
    /// appending a newer row rather than editing an existing one.
    pub async fn push_review_state(
        &self,
        item_id: i64,
        learner_id: Uuid,
        repetition: u32,
        next_review_date: DateTime<Utc>,
    ) {
        let record = NewReviewRecord {
            item_id,
            learner_id,
            ease_factor: 2.5,
            interval_days: 1,
            repetition,
            next_review_date,
            response_quality: 4,
            time_taken_ms: 2000,
            review_date: Utc::now(),
        };

        self.db
            .insert_review(&record)
            .await
            .expect("Failed to append review record");
    }
}

/// Submit a review through the API and return the recorded row.
///
/// # Panics
/// Panics if the submission is rejected.
pub async fn submit_review(
    server: &TestServer,
    item_id: i64,
    learner_id: Uuid,
    quality: i64,
) -> serde_json::Value {
    let response = server
        .post("/api/reviews")
        .json(&fixtures::submit_review_request(item_id, learner_id, quality))
        .await;

    response.assert_status_ok();
    response.json()
}
