//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Create an item creation request body.
pub fn create_item_request(
    learner_id: Uuid,
    content_kind: &str,
    content_id: i64,
) -> serde_json::Value {
    json!({
        "learner_id": learner_id,
        "content_kind": content_kind,
        "content_id": content_id,
        "front_text": format!("Front {}", content_id),
        "back_text": format!("Back {}", content_id),
    })
}

/// Create an item creation request body carrying example and media fields.
pub fn create_item_request_with_media(
    learner_id: Uuid,
    content_kind: &str,
    content_id: i64,
) -> serde_json::Value {
    json!({
        "learner_id": learner_id,
        "content_kind": content_kind,
        "content_id": content_id,
        "front_text": format!("Front {}", content_id),
        "back_text": format!("Back {}", content_id),
        "example_text": "An example sentence.",
        "image_ref": "images/example.png",
        "audio_ref": "audio/example.mp3",
    })
}

/// Create one entry for a bulk import request.
pub fn bulk_entry(content_kind: &str, content_id: i64) -> serde_json::Value {
    json!({
        "content_kind": content_kind,
        "content_id": content_id,
        "front_text": format!("Front {}", content_id),
        "back_text": format!("Back {}", content_id),
    })
}

/// Create a bulk import request body.
pub fn bulk_create_request(learner_id: Uuid, items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "learner_id": learner_id,
        "items": items,
    })
}

/// Create a review submission request body.
pub fn submit_review_request(item_id: i64, learner_id: Uuid, quality: i64) -> serde_json::Value {
    json!({
        "item_id": item_id,
        "learner_id": learner_id,
        "quality": quality,
        "time_taken_ms": 2000,
    })
}
