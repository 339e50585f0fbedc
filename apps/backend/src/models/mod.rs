//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from srs-core
pub use srs_core::types::{ContentKind, Item, Maturity, Quality, ReviewState};

// === Database Entity Types ===

/// Item stored in SQLite
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbItem {
    pub id: i64,
    pub learner_id: Uuid,
    pub content_kind: String,
    pub content_id: i64,
    pub front_text: String,
    pub back_text: String,
    pub example_text: Option<String>,
    pub image_ref: Option<String>,
    pub audio_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbItem {
    /// Convert to API item type
    pub fn to_api_item(&self) -> Item {
        Item {
            id: self.id,
            content_kind: ContentKind::from_str(&self.content_kind).unwrap_or_default(),
            content_id: self.content_id,
            front_text: self.front_text.clone(),
            back_text: self.back_text.clone(),
            example_text: self.example_text.clone(),
            image_ref: self.image_ref.clone(),
            audio_ref: self.audio_ref.clone(),
        }
    }
}

/// Review history entry stored in SQLite
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReviewRecord {
    pub id: i64,
    pub item_id: i64,
    pub learner_id: Uuid,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: i64,
    pub next_review_date: DateTime<Utc>,
    pub response_quality: i64,
    pub time_taken_ms: i64,
    pub review_date: DateTime<Utc>,
}

impl DbReviewRecord {
    /// Convert to the core scheduling state this record captured
    pub fn to_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetition: self.repetition as u32,
            next_review_date: Some(self.next_review_date),
        }
    }

    /// Convert to API review record type
    pub fn to_api_record(&self) -> ReviewRecord {
        ReviewRecord {
            id: self.id,
            item_id: self.item_id,
            learner_id: self.learner_id,
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetition: self.repetition as u32,
            next_review_date: self.next_review_date,
            response_quality: self.response_quality as u8,
            time_taken_ms: self.time_taken_ms as u64,
            review_date: self.review_date,
        }
    }
}

/// Item joined with its current scheduling state, as read by the due queue
#[derive(Debug, Clone, FromRow)]
pub struct DbDueItem {
    pub id: i64,
    pub content_kind: String,
    pub content_id: i64,
    pub front_text: String,
    pub back_text: String,
    pub example_text: Option<String>,
    pub image_ref: Option<String>,
    pub audio_ref: Option<String>,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: i64,
    pub next_review_date: DateTime<Utc>,
}

impl DbDueItem {
    /// Convert to API due item type
    pub fn to_api_due_item(&self) -> DueItem {
        DueItem {
            item: Item {
                id: self.id,
                content_kind: ContentKind::from_str(&self.content_kind).unwrap_or_default(),
                content_id: self.content_id,
                front_text: self.front_text.clone(),
                back_text: self.back_text.clone(),
                example_text: self.example_text.clone(),
                image_ref: self.image_ref.clone(),
                audio_ref: self.audio_ref.clone(),
            },
            state: ReviewState {
                ease_factor: self.ease_factor,
                interval_days: self.interval_days,
                repetition: self.repetition as u32,
                next_review_date: Some(self.next_review_date),
            },
        }
    }
}

/// Minimal history row consumed by the maturity scan
#[derive(Debug, Clone, FromRow)]
pub struct ReviewSnapshot {
    pub item_id: i64,
    pub repetition: i64,
}

/// Fields required to create an item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub learner_id: Uuid,
    pub content_kind: ContentKind,
    pub content_id: i64,
    pub front_text: String,
    pub back_text: String,
    pub example_text: Option<String>,
    pub image_ref: Option<String>,
    pub audio_ref: Option<String>,
}

/// Fields appended as one review history entry
#[derive(Debug, Clone)]
pub struct NewReviewRecord {
    pub item_id: i64,
    pub learner_id: Uuid,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: u32,
    pub next_review_date: DateTime<Utc>,
    pub response_quality: u8,
    pub time_taken_ms: u32,
    pub review_date: DateTime<Utc>,
}

// === API Request/Response Types ===

/// A review history entry as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: i64,
    pub item_id: i64,
    pub learner_id: Uuid,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: u32,
    pub next_review_date: DateTime<Utc>,
    pub response_quality: u8,
    pub time_taken_ms: u64,
    pub review_date: DateTime<Utc>,
}

/// A due item with its current scheduling state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueItem {
    pub item: Item,
    pub state: ReviewState,
}

// Item types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub learner_id: Uuid,
    pub content_kind: ContentKind,
    pub content_id: i64,
    pub front_text: String,
    pub back_text: String,
    pub example_text: Option<String>,
    pub image_ref: Option<String>,
    pub audio_ref: Option<String>,
}

impl CreateItemRequest {
    /// Convert to the insert type
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            learner_id: self.learner_id,
            content_kind: self.content_kind,
            content_id: self.content_id,
            front_text: self.front_text.clone(),
            back_text: self.back_text.clone(),
            example_text: self.example_text.clone(),
            image_ref: self.image_ref.clone(),
            audio_ref: self.audio_ref.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemResponse {
    pub item_id: i64,
    pub created: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkCreateRequest {
    pub learner_id: Uuid,
    pub items: Vec<BulkItemEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkItemEntry {
    pub content_kind: ContentKind,
    pub content_id: i64,
    pub front_text: String,
    pub back_text: String,
    pub example_text: Option<String>,
    pub image_ref: Option<String>,
    pub audio_ref: Option<String>,
}

impl BulkItemEntry {
    /// Convert to the insert type for the given learner
    pub fn to_new_item(&self, learner_id: Uuid) -> NewItem {
        NewItem {
            learner_id,
            content_kind: self.content_kind,
            content_id: self.content_id,
            front_text: self.front_text.clone(),
            back_text: self.back_text.clone(),
            example_text: self.example_text.clone(),
            image_ref: self.image_ref.clone(),
            audio_ref: self.audio_ref.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    pub success: bool,
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

// Review types
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub item_id: i64,
    pub learner_id: Uuid,
    pub quality: i64,
    pub time_taken_ms: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueItemsQuery {
    pub learner_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueItemsResponse {
    pub items: Vec<DueItem>,
}

/// Query carrying only the learner, for count and stats endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerQuery {
    pub learner_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueCountResponse {
    pub count: i64,
}

// Stats types
#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerStatsResponse {
    pub total_items: i64,
    pub due_items: i64,
    pub new_items: i64,
    pub learning_items: i64,
    pub mature_items: i64,
}
