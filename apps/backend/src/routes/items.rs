//! Item creation endpoints

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/items
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<Json<CreateItemResponse>> {
    let now = Utc::now();
    let seed = state.scheduler.seed(now);

    let (item_id, created) = state
        .db
        .get_or_create_item(&payload.to_new_item(), &seed.new_state, seed.next_due, now)
        .await?;

    Ok(Json(CreateItemResponse { item_id, created }))
}

/// POST /api/items/bulk
pub async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<BulkCreateRequest>,
) -> Result<Json<BulkCreateResponse>> {
    let mut created = 0;
    let mut existing = 0;
    let mut failed = 0;

    for entry in &payload.items {
        let now = Utc::now();
        let seed = state.scheduler.seed(now);
        let item = entry.to_new_item(payload.learner_id);

        match state
            .db
            .get_or_create_item(&item, &seed.new_state, seed.next_due, now)
            .await
        {
            Ok((_, true)) => created += 1,
            Ok((_, false)) => existing += 1,
            Err(e) => {
                // Best-effort import: items already committed stay committed.
                tracing::warn!(
                    "bulk import: skipping {} {}: {}",
                    entry.content_kind.as_str(),
                    entry.content_id,
                    e
                );
                failed += 1;
            }
        }
    }

    Ok(Json(BulkCreateResponse {
        // The flag covers the batch sweep itself; per-item failures only
        // show up in the counts.
        success: true,
        created,
        existing,
        failed,
    }))
}
