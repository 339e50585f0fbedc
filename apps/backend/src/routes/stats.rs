//! Learner statistics endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::services::stats::classify_history;
use crate::AppState;

/// GET /api/stats
pub async fn learner_stats(
    State(state): State<AppState>,
    Query(query): Query<LearnerQuery>,
) -> Result<Json<LearnerStatsResponse>> {
    // Item and due counts come straight from the store; the maturity
    // buckets come from one scan over the history.
    let total_items = state.db.count_items(query.learner_id).await?;
    let due_items = state.db.count_due_items(query.learner_id).await?;

    let history = state.db.review_history(query.learner_id).await?;
    let counts = classify_history(&history);

    Ok(Json(LearnerStatsResponse {
        total_items,
        due_items,
        new_items: counts.new,
        learning_items: counts.learning,
        mature_items: counts.mature,
    }))
}
