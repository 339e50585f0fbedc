//! Core types for the spaced-repetition scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recall quality reported after a review.
///
/// Maps to the 0-5 scale used by SM-2: 0 no recall, 1 incorrect but familiar,
/// 2 incorrect but easy once shown, 3 correct with difficulty, 4 correct with
/// hesitation, 5 perfect recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    NoRecall,
    IncorrectFamiliar,
    IncorrectEasy,
    CorrectHard,
    CorrectHesitant,
    Perfect,
}

impl Quality {
    /// Convert to the numeric 0-5 value.
    pub fn to_value(self) -> u8 {
        match self {
            Self::NoRecall => 0,
            Self::IncorrectFamiliar => 1,
            Self::IncorrectEasy => 2,
            Self::CorrectHard => 3,
            Self::CorrectHesitant => 4,
            Self::Perfect => 5,
        }
    }

    /// Create from a numeric value. Returns `None` outside 0-5.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoRecall),
            1 => Some(Self::IncorrectFamiliar),
            2 => Some(Self::IncorrectEasy),
            3 => Some(Self::CorrectHard),
            4 => Some(Self::CorrectHesitant),
            5 => Some(Self::Perfect),
            _ => None,
        }
    }

    /// Qualities 3 and above count as a successful recall.
    pub fn is_successful(self) -> bool {
        self.to_value() >= 3
    }
}

/// Content category an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Vocabulary,
    Grammar,
}

impl Default for ContentKind {
    fn default() -> Self {
        Self::Vocabulary
    }
}

impl ContentKind {
    /// Get the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "vocabulary" => Some(Self::Vocabulary),
            "grammar" => Some(Self::Grammar),
            _ => None,
        }
    }
}

/// Maturity bucket derived from an item's consecutive-success count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maturity {
    New,
    Learning,
    Mature,
}

impl Maturity {
    /// Classify by repetition count: 0 new, 1-2 learning, 3+ mature.
    pub fn from_repetition(repetition: u32) -> Self {
        match repetition {
            0 => Self::New,
            1..=2 => Self::Learning,
            _ => Self::Mature,
        }
    }
}

/// A reviewable item: one piece of content scheduled for one learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub content_kind: ContentKind,
    pub content_id: i64,
    pub front_text: String,
    pub back_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
}

/// Scheduling state of an item at a point in its review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            ease_factor: 2.5,
            interval_days: 0,
            repetition: 0,
            next_review_date: None,
        }
    }
}
