//! Review submission and due queue endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;
use srs_core::sm2::ScheduleOutcome;

/// Due items returned when the caller does not pass a limit.
const DEFAULT_DUE_LIMIT: i64 = 100;

/// POST /api/reviews
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<ReviewRecord>> {
    // Validate quality before touching storage
    let quality = u8::try_from(payload.quality)
        .ok()
        .and_then(Quality::from_value)
        .ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "quality must be between 0 and 5, got {}",
                payload.quality
            ))
        })?;

    // Serialize with other submissions for the same item
    let _guard = state.review_locks.acquire(payload.item_id).await;

    // The item must exist and belong to this learner
    let item = state
        .db
        .get_item(payload.item_id, payload.learner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("item {} not found", payload.item_id)))?;

    // The latest history entry is the current scheduling state
    let current_state = state
        .db
        .latest_review(item.id)
        .await?
        .map(|r| r.to_state())
        .unwrap_or_else(|| state.scheduler.initial_state());

    let now = Utc::now();
    let outcome: ScheduleOutcome = state.scheduler.schedule(&current_state, quality, now);

    // Append the new record; history rows are never mutated
    let record = state
        .db
        .insert_review(&NewReviewRecord {
            item_id: item.id,
            learner_id: payload.learner_id,
            ease_factor: outcome.new_state.ease_factor,
            interval_days: outcome.new_state.interval_days,
            repetition: outcome.new_state.repetition,
            next_review_date: outcome.next_due,
            response_quality: quality.to_value(),
            time_taken_ms: payload.time_taken_ms,
            review_date: now,
        })
        .await?;

    Ok(Json(record.to_api_record()))
}

/// GET /api/reviews/due
pub async fn due(
    State(state): State<AppState>,
    Query(query): Query<DueItemsQuery>,
) -> Result<Json<DueItemsResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_DUE_LIMIT).max(0);

    let items = state.db.get_due_items(query.learner_id, limit).await?;

    Ok(Json(DueItemsResponse {
        items: items.into_iter().map(|i| i.to_api_due_item()).collect(),
    }))
}

/// GET /api/reviews/due/count
pub async fn due_count(
    State(state): State<AppState>,
    Query(query): Query<LearnerQuery>,
) -> Result<Json<DueCountResponse>> {
    let count = state.db.count_due_items(query.learner_id).await?;

    Ok(Json(DueCountResponse { count }))
}
